//! API router with Swagger UI

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::modules::health::{self, HealthState};
use super::modules::metrics::{self, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::users::{self, UserV1State};
use crate::interfaces::rpc::user_v1;
use crate::interfaces::rpc::UserV1;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
    ),
    components(
        schemas(
            health::HealthResponse,
            health::ComponentHealth,
            user_v1::Role,
            user_v1::Timestamp,
            user_v1::UserFields,
            user_v1::User,
            user_v1::CreateRequest,
            user_v1::CreateResponse,
            user_v1::GetRequest,
            user_v1::GetResponse,
            user_v1::UpdateRequest,
            user_v1::DeleteRequest,
            user_v1::Empty,
            user_v1::Code,
            user_v1::Status,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "UserV1", description = "user_v1.UserV1 RPC methods as JSON over HTTP"),
    ),
    info(
        title = "Auth Service API",
        version = "1.0.0",
        description = "User account registry: create and fetch users"
    )
)]
pub struct ApiDoc;

/// The four `user_v1.UserV1` routes
pub fn rpc_routes(user_v1: Arc<dyn UserV1>) -> Router {
    Router::new()
        .route(users::CREATE_PATH, post(users::create_user))
        .route(users::GET_PATH, post(users::get_user))
        .route(users::UPDATE_PATH, post(users::update_user))
        .route(users::DELETE_PATH, post(users::delete_user))
        .with_state(UserV1State { user_v1 })
}

/// Create the full router: RPC routes, health, metrics, docs, middleware.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(
    user_v1: Arc<dyn UserV1>,
    health_state: HealthState,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let mut router = Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(health_routes)
        .merge(rpc_routes(user_v1));

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(metrics::prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(metrics::rpc_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
}
