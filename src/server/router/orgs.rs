use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use org_registry::{OrgRequest, OrgResponse};

use crate::errors::{ServiceError, ServiceResult};
use crate::server::context::CallerContext;
use crate::server::state::ServeState;

pub(crate) fn router() -> Router<ServeState> {
    Router::new()
        .route("/OrgService/Create", post(create_handler))
        .route("/OrgService/Delete", post(delete_handler))
        .route("/OrgService/List", post(list_handler))
}

fn body(payload: Result<Json<OrgRequest>, JsonRejection>) -> ServiceResult<OrgRequest> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| ServiceError::BadRequest(rejection.body_text()))
}

async fn create_handler(
    State(state): State<ServeState>,
    CallerContext(ctx): CallerContext,
    payload: Result<Json<OrgRequest>, JsonRejection>,
) -> ServiceResult<Json<OrgResponse>> {
    let req = body(payload)?;
    Ok(Json(state.orgs().create(&ctx, &req).await?))
}

async fn delete_handler(
    State(state): State<ServeState>,
    CallerContext(ctx): CallerContext,
    payload: Result<Json<OrgRequest>, JsonRejection>,
) -> ServiceResult<Json<OrgResponse>> {
    let req = body(payload)?;
    Ok(Json(state.orgs().delete(&ctx, &req).await?))
}

/// Takes no body; any payload sent by the caller is ignored.
async fn list_handler(State(state): State<ServeState>) -> ServiceResult<Json<OrgResponse>> {
    Ok(Json(state.orgs().list().await?))
}
