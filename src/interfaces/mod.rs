//! Interface layer: the RPC surface and its HTTP transport

pub mod http;
pub mod rpc;
