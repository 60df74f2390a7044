//! # Auth Service
//!
//! User account registry exposed through the `user_v1.UserV1` RPC surface
//! (Create, Get, Update, Delete), served as JSON over HTTP and backed by
//! PostgreSQL.
//!
//! ## Architecture
//!
//! - **domain**: `User`, `UserFields`, `Role`, the repository port and errors
//! - **application**: the user service
//! - **infrastructure**: PostgreSQL repository (sea-orm), in-memory repository
//! - **interfaces**: wire schema, RPC handler, HTTP router
//! - **config** / **server**: configuration and process runtime

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use infrastructure::{init_database, DatabaseConfig, InMemoryUserRepository, UserRepository};

pub use interfaces::http::create_api_router;
pub use interfaces::rpc::{Code, Status, UserV1, UserV1Handler};
