//! Application layer - use cases on top of the domain ports

pub mod identity;

pub use identity::{UserService, UserServiceInterface};
