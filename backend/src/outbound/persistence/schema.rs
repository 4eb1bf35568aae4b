//! Diesel table definitions for the forum schema.
//!
//! These mirror `migrations/*_create_forum_schema/up.sql` and must be kept in
//! step with it. Case-insensitive uniqueness lives in `lower(...)` indexes
//! that Diesel does not model.

diesel::table! {
    /// Registered users keyed by their canonical nickname.
    users (nickname) {
        nickname -> Text,
        fullname -> Text,
        about -> Text,
        email -> Text,
    }
}

diesel::table! {
    /// Forums with denormalised thread and post counters.
    forums (slug) {
        slug -> Text,
        title -> Text,
        /// Canonical nickname of the creating user.
        owner -> Text,
        posts -> Int8,
        threads -> Int8,
    }
}

diesel::table! {
    /// Threads; `slug` is optional and unique ignoring case when present.
    threads (id) {
        id -> Int8,
        title -> Text,
        author -> Text,
        forum -> Text,
        message -> Text,
        votes -> Int4,
        slug -> Nullable<Text>,
        created -> Timestamptz,
    }
}

diesel::table! {
    /// Posts with their materialised ancestor path.
    posts (id) {
        id -> Int8,
        parent -> Nullable<Int8>,
        author -> Text,
        message -> Text,
        is_edited -> Bool,
        forum -> Text,
        thread -> Int8,
        created -> Timestamptz,
        /// Root-first ancestor ids ending with the post itself.
        path -> Array<Int8>,
        /// `path` with every segment negated; ascending order of this column
        /// is descending tree order.
        path_desc -> Array<Int8>,
    }
}

diesel::table! {
    /// One voice per user per thread.
    votes (thread, nickname) {
        thread -> Int8,
        nickname -> Text,
        voice -> Int4,
    }
}

diesel::table! {
    /// Users who created a thread or post in a forum.
    forum_users (forum, nickname) {
        forum -> Text,
        nickname -> Text,
    }
}

diesel::joinable!(forums -> users (owner));
diesel::joinable!(threads -> forums (forum));
diesel::joinable!(posts -> threads (thread));
diesel::joinable!(votes -> threads (thread));
diesel::joinable!(forum_users -> forums (forum));

diesel::allow_tables_to_appear_in_same_query!(forum_users, forums, posts, threads, users, votes,);
