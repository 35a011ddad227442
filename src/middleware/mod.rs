pub mod auth;
pub mod response;

pub use auth::{auth_middleware, CurrentUser};
