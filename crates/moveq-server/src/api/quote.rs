use axum::{body::Bytes, extract::State, response::IntoResponse, Extension, Json};
use moveq_core::{Quote, QuoteRequest};
use serde::Serialize;

use super::{parse_json_object, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Serialize)]
pub(super) struct QuoteData {
    pub quote: Quote,
}

/// `POST /api/v1/quote/preview`: price a submitted quote form.
///
/// The body is the raw form as a JSON object. Distance failures never reach
/// the client; they price as zero miles.
pub(super) async fn preview_quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let Some(form) = parse_json_object(&body) else {
        return Err(ApiError::new(req_id.0, "bad_request", "Invalid JSON"));
    };

    let request = QuoteRequest::from_form(&form);
    let quote = state.calculator.calculate_quote(&request).await;

    Ok(Json(ApiResponse::success(QuoteData { quote }, req_id.0)))
}
