//! `user_v1.UserV1` route handlers
//!
//! One POST route per RPC method. Handlers only unwrap the JSON body and
//! delegate to the `UserV1` implementation held in state.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::interfaces::http::common::RpcJson;
use crate::interfaces::rpc::user_v1::{
    CreateRequest, CreateResponse, DeleteRequest, Empty, GetRequest, GetResponse, UpdateRequest,
};
use crate::interfaces::rpc::{Status, UserV1};

pub const CREATE_PATH: &str = "/user_v1.UserV1/Create";
pub const GET_PATH: &str = "/user_v1.UserV1/Get";
pub const UPDATE_PATH: &str = "/user_v1.UserV1/Update";
pub const DELETE_PATH: &str = "/user_v1.UserV1/Delete";

/// User RPC state
#[derive(Clone)]
pub struct UserV1State {
    pub user_v1: Arc<dyn UserV1>,
}

#[utoipa::path(
    post,
    path = "/user_v1.UserV1/Create",
    tag = "UserV1",
    request_body = CreateRequest,
    responses(
        (status = 200, description = "User created", body = CreateResponse),
        (status = 400, description = "Missing or invalid fields", body = Status),
        (status = 500, description = "Storage failure", body = Status)
    )
)]
pub async fn create_user(
    State(state): State<UserV1State>,
    RpcJson(request): RpcJson<CreateRequest>,
) -> Result<Json<CreateResponse>, Status> {
    state.user_v1.create(request).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/user_v1.UserV1/Get",
    tag = "UserV1",
    request_body = GetRequest,
    responses(
        (status = 200, description = "User details", body = GetResponse),
        (status = 404, description = "No user with this id", body = Status),
        (status = 500, description = "Storage failure", body = Status)
    )
)]
pub async fn get_user(
    State(state): State<UserV1State>,
    RpcJson(request): RpcJson<GetRequest>,
) -> Result<Json<GetResponse>, Status> {
    state.user_v1.get(request).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/user_v1.UserV1/Update",
    tag = "UserV1",
    request_body = UpdateRequest,
    responses(
        (status = 200, description = "Accepted", body = Empty),
        (status = 400, description = "User ID is required", body = Status)
    )
)]
pub async fn update_user(
    State(state): State<UserV1State>,
    RpcJson(request): RpcJson<UpdateRequest>,
) -> Result<Json<Empty>, Status> {
    state.user_v1.update(request).await.map(Json)
}

#[utoipa::path(
    post,
    path = "/user_v1.UserV1/Delete",
    tag = "UserV1",
    request_body = DeleteRequest,
    responses(
        (status = 200, description = "Accepted", body = Empty),
        (status = 400, description = "User ID is required", body = Status)
    )
)]
pub async fn delete_user(
    State(state): State<UserV1State>,
    RpcJson(request): RpcJson<DeleteRequest>,
) -> Result<Json<Empty>, Status> {
    state.user_v1.delete(request).await.map(Json)
}
