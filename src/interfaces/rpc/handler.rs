//! `UserV1` implementation backed by the user service
//!
//! Validates request shape, delegates to the service, converts results to
//! wire messages. This is the only place domain errors become `Status`.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{error, info, warn};
use validator::Validate;

use super::user_v1::{
    Code, CreateRequest, CreateResponse, DeleteRequest, Empty, GetRequest, GetResponse, Status,
    UpdateRequest, UserV1,
};
use crate::application::UserServiceInterface;
use crate::domain::{DomainError, StorageError};

impl From<DomainError> for Status {
    fn from(err: DomainError) -> Self {
        match &err {
            DomainError::InvalidArgument(msg) => Status::invalid_argument(msg.clone()),
            DomainError::Storage(StorageError::NotFound { .. }) => Status::not_found(err.to_string()),
            DomainError::QueryBuild(_) | DomainError::Storage(StorageError::Database(_)) => {
                Status::internal(err.to_string())
            }
        }
    }
}

/// `true` for failures caused by the request itself.
fn is_client_error(err: &DomainError) -> bool {
    matches!(err, DomainError::InvalidArgument(_))
}

fn record_failure(method: &'static str, status: &Status) {
    metrics::counter!("rpc_errors_total", "method" => method, "code" => status.code.as_str())
        .increment(1);
}

fn require_id(id: i64) -> Result<i64, Status> {
    if id == 0 {
        return Err(Status::new(Code::InvalidArgument, "User ID is required"));
    }
    Ok(id)
}

pub struct UserV1Handler {
    service: Arc<dyn UserServiceInterface>,
}

impl UserV1Handler {
    pub fn new(service: Arc<dyn UserServiceInterface>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl UserV1 for UserV1Handler {
    async fn create(&self, request: CreateRequest) -> Result<CreateResponse, Status> {
        let Some(info) = request.info else {
            let status = Status::invalid_argument("User fields are required");
            record_failure("Create", &status);
            return Err(status);
        };

        if let Err(errors) = info.validate() {
            let status = Status::invalid_argument(errors.to_string());
            record_failure("Create", &status);
            return Err(status);
        }

        info!(
            name = %info.name,
            email = %info.email,
            role = ?info.role,
            "Creating user"
        );

        match self.service.create(info.into()).await {
            Ok(id) => {
                info!(user_id = id, "User created");
                Ok(CreateResponse { id })
            }
            Err(e) => {
                if is_client_error(&e) {
                    warn!(error = %e, "Rejected user creation");
                } else {
                    error!(error = %e, "Failed to create user");
                }
                let status = Status::from(e);
                record_failure("Create", &status);
                Err(status)
            }
        }
    }

    async fn get(&self, request: GetRequest) -> Result<GetResponse, Status> {
        info!(user_id = request.id, "Getting user");

        match self.service.get(request.id).await {
            Ok(user) => Ok(GetResponse {
                user: Some(user.into()),
            }),
            Err(e) => {
                error!(error = %e, user_id = request.id, "Failed to get user");
                let status = Status::from(e);
                record_failure("Get", &status);
                Err(status)
            }
        }
    }

    async fn update(&self, request: UpdateRequest) -> Result<Empty, Status> {
        let id = require_id(request.id).inspect_err(|status| record_failure("Update", status))?;

        info!(user_id = id, "Updating user");
        Ok(Empty {})
    }

    async fn delete(&self, request: DeleteRequest) -> Result<Empty, Status> {
        let id = require_id(request.id).inspect_err(|status| record_failure("Delete", status))?;

        info!(user_id = id, "Deleting user");
        Ok(Empty {})
    }
}
