//! Thin wrappers binding the gateway to one backend resource each.
//!
//! Services shape payloads and paths; they do not validate, transform or
//! translate errors.

mod comments;
mod communities;
mod posts;
mod profiles;
mod users;

pub use comments::CommentsService;
pub use communities::CommunitiesService;
pub use posts::PostsService;
pub use profiles::ProfilesService;
pub use users::UsersService;
