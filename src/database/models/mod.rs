pub mod account;
pub mod comment;
pub mod post;

pub use account::{Account, DEFAULT_ROLE_CODE, NewAccount};
pub use comment::{Comment, NewComment};
pub use post::{NewPost, Post};
