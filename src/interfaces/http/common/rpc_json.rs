//! JSON extractor for RPC requests
//!
//! `RpcJson<T>` works like `axum::Json<T>`, but a body that fails to parse
//! is rejected with an `INVALID_ARGUMENT` status instead of axum's plain
//! text rejection, so clients always receive a `Status` on failure.

use axum::extract::{FromRequest, Request};
use axum::Json;
use serde::de::DeserializeOwned;

use crate::interfaces::rpc::Status;

pub struct RpcJson<T>(pub T);

impl<S, T> FromRequest<S> for RpcJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Status;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                Status::invalid_argument(format!("Invalid JSON: {}", rejection.body_text()))
            })?;

        Ok(RpcJson(value))
    }
}
