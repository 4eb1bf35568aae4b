//! Forum domain: entities, ports, and services.
//!
//! Purpose: hold every rule of the forum independent of transport and
//! storage. Inbound adapters call the driving ports in [`ports`]; outbound
//! adapters implement the driven ports bundled in [`ports::StorePorts`].
//!
//! Public surface:
//! - Entities: [`User`], [`Forum`], [`Thread`], [`Post`], [`Status`].
//! - Identity: [`IdentityResolver`] maps caller spellings to stored records.
//! - Rules: [`check_parent`] and [`place`] guard reply placement,
//!   [`materialize`] orders post listings.
//! - Services: one per resource, assembled by [`ForumServices`].
//! - Errors: [`Error`] with a stable [`ErrorCode`].

mod clock;
pub mod error;
pub mod forum;
mod forum_service;
pub mod hierarchy;
mod identity;
mod maintenance_service;
pub mod outcome;
pub mod ports;
pub mod post;
mod post_service;
pub mod post_tree;
mod reset_gate;
mod services;
mod slug;
pub mod status;
pub mod thread;
mod thread_service;
pub mod trace_id;
pub mod user;
mod user_service;
pub mod vote;

pub use self::error::{Error, ErrorCode};
pub use self::forum::{Forum, ForumDraft};
pub use self::forum_service::ForumService;
pub use self::hierarchy::{HierarchyViolation, Placement, check_parent, place};
pub use self::identity::IdentityResolver;
pub use self::maintenance_service::MaintenanceService;
pub use self::outcome::CreateOutcome;
pub use self::post::{Post, PostDetails, PostDraft, PostId, PostPatch, PostPath, Related};
pub use self::post_service::PostService;
pub use self::post_tree::{PostListing, PostSort, materialize};
pub use self::reset_gate::ResetGate;
pub use self::services::ForumServices;
pub use self::slug::SlugError;
pub use self::status::Status;
pub use self::thread::{NewThread, Thread, ThreadDraft, ThreadId, ThreadLocator, ThreadPatch};
pub use self::thread_service::ThreadService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::user::{Nickname, User, UserPatch, UserProfile, UserValidationError, fold_case};
pub use self::user_service::UserService;
pub use self::vote::{InvalidVoice, Voice, VoteDraft};
