//! Lookup route.
//!
//! Wires the `get_by_ids` endpoint onto an axum [`Router`] and maps protocol
//! errors onto HTTP responses.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde_json::json;
use tracing::debug;

use analytics_catalog::Catalog;
use analytics_protocol::{GetByIdsRequest, GetByIdsResponse, ProtocolError, GET_BY_IDS_PATH};

/// Build the router serving the lookup endpoint over `catalog`.
pub fn router(catalog: Arc<Catalog>) -> Router {
    Router::new()
        .route(GET_BY_IDS_PATH, post(get_by_ids))
        .with_state(catalog)
}

/// `POST /analytics/get_by_ids`
///
/// The body is read raw; [`GetByIdsRequest::from_slice`] decides what counts
/// as malformed.
async fn get_by_ids(
    State(catalog): State<Arc<Catalog>>,
    body: Bytes,
) -> Result<Json<GetByIdsResponse>, ApiError> {
    let request = GetByIdsRequest::from_slice(&body)?;
    let analytics = catalog.get_by_ids(&request.ids);

    debug!(
        requested = request.ids.len(),
        matched = analytics.len(),
        "Served get_by_ids"
    );

    Ok(Json(GetByIdsResponse::new(analytics)))
}

/// HTTP-facing wrapper around [`ProtocolError`].
#[derive(Debug)]
pub struct ApiError(pub ProtocolError);

impl From<ProtocolError> for ApiError {
    fn from(err: ProtocolError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        debug!(%status, error = %self.0, "Rejected get_by_ids request");
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
