//! RPC surface: the `user_v1` schema and its handler

pub mod converter;
pub mod handler;
pub mod user_v1;

pub use handler::UserV1Handler;
pub use user_v1::{Code, Status, UserV1};
