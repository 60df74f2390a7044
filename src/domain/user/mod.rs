//! User aggregate
//!
//! Contains the User entity, the creation value object, and the repository interface.

pub mod model;
pub mod repository;

pub use model::{Role, User, UserFields};
pub use repository::UserRepositoryInterface;
