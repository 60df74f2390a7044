//! Users module — the `user_v1.UserV1` RPC methods over HTTP

pub mod handlers;

pub use handlers::*;
