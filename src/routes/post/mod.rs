mod handler;
pub mod model;

pub use handler::{create_one_post, delete_one_post, get_all_posts, get_one_post, update_one_post};
