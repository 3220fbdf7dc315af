mod handler;
pub mod model;

pub use handler::{login_account, logout_account, refresh_token, register_account, reset_password};
