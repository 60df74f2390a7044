//! Shared HTTP plumbing for the RPC transport

pub mod rpc_json;
pub mod status;

pub use rpc_json::RpcJson;
pub use status::http_status;
