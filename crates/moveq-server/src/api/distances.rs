use axum::{
    body::Bytes,
    extract::{Query, State},
    response::IntoResponse,
    Extension, Json,
};
use moveq_core::{parse_distance_miles, round_money, DistanceRecord, MAX_DISTANCE_MILES};
use moveq_quote::{DistanceError, DistanceSource};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{parse_json_object, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct DistanceQuery {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
}

#[derive(Debug, Serialize)]
pub(super) struct DistanceItem {
    pub origin: String,
    pub destination: String,
    pub distance_mi: Decimal,
    pub distance_text: String,
    pub cached: bool,
}

#[derive(Debug, Serialize)]
pub(super) struct DistanceData {
    pub distance: DistanceItem,
}

#[derive(Debug, Serialize)]
pub(super) struct SavedRecordData {
    pub message: &'static str,
    pub record: DistanceRecord,
}

/// `GET /api/v1/distance?origin=..&destination=..`
pub(super) async fn lookup_distance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<DistanceQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let resolved = state
        .calculator
        .resolver()
        .resolve(&params.origin, &params.destination)
        .await
        .map_err(|e| map_distance_error(req_id.0.clone(), &e))?;

    let item = DistanceItem {
        origin: params.origin,
        destination: params.destination,
        distance_mi: round_money(resolved.miles),
        distance_text: resolved.text,
        cached: resolved.source == DistanceSource::Cache,
    };

    Ok(Json(ApiResponse::success(
        DistanceData { distance: item },
        req_id.0,
    )))
}

/// `POST /api/v1/distances`: store a distance the browser already computed.
///
/// Find-or-create on the trimmed `(from, to)` pair; an existing record is
/// returned untouched. `distance` must parse to a non-negative number of
/// miles no greater than [`MAX_DISTANCE_MILES`].
pub(super) async fn save_distance(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    body: Bytes,
) -> Result<impl IntoResponse, ApiError> {
    let Some(form) = parse_json_object(&body) else {
        return Err(ApiError::new(req_id.0, "bad_request", "Invalid JSON."));
    };

    let field = |key: &str| -> String {
        match form.get(key) {
            Some(serde_json::Value::String(s)) => s.trim().to_string(),
            Some(serde_json::Value::Number(n)) => n.to_string(),
            _ => String::new(),
        }
    };
    let from = field("from");
    let to = field("to");
    let distance = field("distance");

    if from.is_empty() || to.is_empty() || distance.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "Missing required fields.",
        ));
    }
    if parse_distance_miles(&distance).is_none() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "Invalid distance.",
        ));
    }

    let existing = state.store.find(&from, &to).await.map_err(|e| {
        tracing::error!(error = %e, "failed to look up distance record");
        ApiError::new(req_id.0.clone(), "internal_error", "Server error.")
    })?;

    if let Some(record) = existing {
        return Ok(Json(ApiResponse::success(
            SavedRecordData {
                message: "Record already exists.",
                record,
            },
            req_id.0,
        )));
    }

    let record = state.store.create(&from, &to, &distance).await.map_err(|e| {
        tracing::error!(error = %e, "failed to save distance record");
        ApiError::new(req_id.0.clone(), "internal_error", "Server error.")
    })?;
    tracing::info!(record_id = record.id, "distance record saved");

    Ok(Json(ApiResponse::success(
        SavedRecordData {
            message: "Record saved successfully.",
            record,
        },
        req_id.0,
    )))
}

fn map_distance_error(request_id: String, error: &DistanceError) -> ApiError {
    match error {
        DistanceError::InvalidInput => ApiError::new(
            request_id,
            "validation_error",
            "origin and destination are required",
        ),
        DistanceError::RouteNotFound(_) => {
            ApiError::new(request_id, "not_found", "no route between these addresses")
        }
        DistanceError::ProviderUnavailable(_) | DistanceError::MalformedDistance(_) => {
            tracing::warn!(error = %error, "distance lookup failed");
            ApiError::new(request_id, "bad_gateway", "distance lookup unavailable")
        }
    }
}
