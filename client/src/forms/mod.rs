//! Input forms: each collects fields, validates them, issues exactly one
//! service call and reports the outcome as [`Feedback`](crate::feedback::Feedback).

mod account;
mod comment;
mod community;
mod login;
mod post;
mod signup;
mod status;

pub use account::DeleteAccountForm;
pub use comment::{NewCommentForm, delete_comment};
pub use community::{DeleteCommunityForm, NewCommunityForm};
pub use login::LoginForm;
pub use post::{EditPostForm, NewPostForm, delete_post};
pub use signup::SignupForm;
pub use status::{FormPhase, FormStatus, InFlight};
