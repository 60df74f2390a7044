//! Request metrics middleware
//!
//! RPC routes (`/<service>/<method>`) are recorded as
//! `rpc_requests_total{service, method, status}` and
//! `rpc_request_duration_seconds{service, method}`. Everything else
//! (health, docs, metrics) goes to `http_requests_total{method, path, status}`.
//! Requests that match no route share `path="unmatched"`, so label values
//! only ever come from the route table.

use std::time::Instant;

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Method, Request},
    middleware::Next,
    response::Response,
};

pub const UNMATCHED_PATH: &str = "unmatched";

/// Split an RPC route into `(service, method)`.
pub fn rpc_labels(path: &str) -> Option<(String, String)> {
    let (service, method) = path.strip_prefix('/')?.split_once('/')?;
    if !service.contains('.') || method.is_empty() || method.contains('/') {
        return None;
    }
    Some((service.to_string(), method.to_string()))
}

fn method_label(method: &Method) -> &'static str {
    match *method {
        Method::GET => "GET",
        Method::POST => "POST",
        Method::PUT => "PUT",
        Method::DELETE => "DELETE",
        Method::PATCH => "PATCH",
        Method::HEAD => "HEAD",
        Method::OPTIONS => "OPTIONS",
        _ => "OTHER",
    }
}

pub async fn rpc_metrics_middleware(request: Request<Body>, next: Next) -> Response {
    let http_method = method_label(request.method());
    let matched = request
        .extensions()
        .get::<MatchedPath>()
        .map(|mp| mp.as_str().to_string());

    let start = Instant::now();
    let response = next.run(request).await;
    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16().to_string();

    let rpc = matched.as_deref().and_then(rpc_labels);

    match rpc {
        Some((service, method)) => {
            metrics::counter!(
                "rpc_requests_total",
                "service" => service.clone(),
                "method" => method.clone(),
                "status" => status
            )
            .increment(1);
            metrics::histogram!("rpc_request_duration_seconds", "service" => service, "method" => method)
                .record(elapsed);
        }
        None => {
            let path = matched.unwrap_or_else(|| UNMATCHED_PATH.to_string());
            metrics::counter!("http_requests_total", "method" => http_method, "path" => path, "status" => status)
                .increment(1);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{middleware, routing::post, Router};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    async fn send(app: &Router, uri: &str) {
        app.clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn unknown_paths_do_not_create_new_series() {
        let recorder = PrometheusBuilder::new().build_recorder();
        let handle = recorder.handle();
        let _guard = metrics::set_default_local_recorder(&recorder);

        let app = Router::new()
            .route("/user_v1.UserV1/Get", post(|| async { "ok" }))
            .layer(middleware::from_fn(rpc_metrics_middleware));

        for i in 0..10 {
            send(&app, &format!("/other.svc{i}/m{i}")).await;
            send(&app, &format!("/junk/{i}")).await;
        }
        send(&app, "/user_v1.UserV1/Get").await;

        let rendered = handle.render();
        assert!(rendered.contains(r#"path="unmatched""#));
        assert!(rendered.contains(r#"service="user_v1.UserV1",method="Get""#));
        assert!(!rendered.contains("other.svc"));
        assert!(!rendered.contains("junk"));
    }

    #[test]
    fn extension_methods_share_one_label() {
        let custom = Method::from_bytes(b"BREW").unwrap();
        assert_eq!(method_label(&custom), "OTHER");
        assert_eq!(method_label(&Method::POST), "POST");
    }

    #[test]
    fn rpc_routes_are_split_into_service_and_method() {
        assert_eq!(
            rpc_labels("/user_v1.UserV1/Create"),
            Some(("user_v1.UserV1".to_string(), "Create".to_string()))
        );
    }

    #[test]
    fn plain_routes_are_not_rpc() {
        assert_eq!(rpc_labels("/health"), None);
        assert_eq!(rpc_labels("/api-docs/openapi.json"), None);
        assert_eq!(rpc_labels("/user_v1.UserV1/"), None);
    }
}
