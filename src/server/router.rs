use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    middleware,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::error;

use crate::metrics;

mod orgs;

use super::context::request_id;
use super::state::{HealthReport, ServeState, ServiceInfo};

pub fn build_router(state: ServeState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/livez", get(live_handler))
        .route("/readyz", get(ready_handler))
        .route("/metrics", get(metrics_handler))
        .merge(orgs::router())
        .layer(middleware::from_fn(request_id))
        .layer(cors_layer())
        .with_state(state)
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

#[derive(Serialize)]
struct HealthBody {
    status: &'static str,
    #[serde(flatten)]
    info: ServiceInfo,
    #[serde(flatten)]
    report: HealthReport,
}

async fn health_handler(State(state): State<ServeState>) -> Json<HealthBody> {
    Json(HealthBody {
        status: "ok",
        info: state.info().clone(),
        report: state.health(),
    })
}

async fn live_handler(State(state): State<ServeState>) -> impl IntoResponse {
    let report = state.health();
    (check_status(report.live), Json(report))
}

async fn ready_handler(State(state): State<ServeState>) -> impl IntoResponse {
    let report = state.health();
    (check_status(report.ready), Json(report))
}

fn check_status(ok: bool) -> StatusCode {
    if ok {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

async fn metrics_handler() -> impl IntoResponse {
    match metrics::render() {
        Ok((content_type, body)) => match HeaderValue::from_str(&content_type) {
            Ok(content_type) => ([(header::CONTENT_TYPE, content_type)], body).into_response(),
            Err(err) => {
                error!(?err, "failed to build content-type header for metrics");
                (StatusCode::INTERNAL_SERVER_ERROR, "metric encode error").into_response()
            }
        },
        Err(err) => {
            error!(?err, "failed to render prometheus metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "metric encode error").into_response()
        }
    }
}
