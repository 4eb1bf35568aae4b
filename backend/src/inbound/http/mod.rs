//! HTTP inbound adapter exposing the forum REST endpoints.

use actix_web::web;

pub mod error;
pub mod forums;
pub mod health;
pub mod posts;
pub mod service;
pub mod state;
pub mod threads;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Register every `/api` route on `cfg`.
///
/// Shared by the server and the HTTP tests so both see the same routing
/// table.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(users::create_user)
            .service(users::get_user)
            .service(users::update_user)
            .service(forums::create_forum)
            .service(forums::get_forum)
            .service(forums::create_thread)
            .service(forums::list_threads)
            .service(forums::list_users)
            .service(threads::create_posts)
            .service(threads::vote)
            .service(threads::get_thread)
            .service(threads::update_thread)
            .service(threads::list_posts)
            .service(posts::post_details)
            .service(posts::update_post)
            .service(service::status)
            .service(service::clear),
    );
}
