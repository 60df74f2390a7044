//! Identity module — user account use-cases
//!
//! Contains the `UserService` which orchestrates user creation and lookup.

pub mod service;

pub use service::{UserService, UserServiceInterface};
