//! HTTP interface
//!
//! - `common`: JSON extractor and `Status` responses
//! - `modules`: route handlers and middleware
//! - `router`: router assembly with Swagger documentation

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_api_router, rpc_routes, ApiDoc};
