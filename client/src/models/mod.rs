mod comment;
mod community;
mod post;
mod profile;

pub use comment::Comment;
pub use community::Community;
pub use post::Post;
pub use profile::Profile;
