//! Prometheus metrics endpoint and RPC metrics middleware

pub mod handlers;
pub mod middleware;

pub use handlers::*;
pub use middleware::rpc_metrics_middleware;
