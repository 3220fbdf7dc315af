mod handler;
pub mod model;

pub use handler::{create_one_comment, delete_one_comment, get_comment_graph};
