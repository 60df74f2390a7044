//! Health check endpoint

pub mod handlers;

pub use handlers::*;
