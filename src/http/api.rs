//! REST handlers for the config API.
//!
//! # Responsibilities
//! - `GET /api/config` — resolved record for a customer, no auth
//! - `POST /api/config` — partial update, bearer-gated
//!
//! # Design Decisions
//! - A missing `customer_id` targets the default customer
//! - A missing or malformed JSON body on POST counts as an empty partial;
//!   the update then just rewrites the resolved record

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::http::error::AppError;
use crate::http::server::AppState;
use crate::records::ConfigRecord;

/// Query selecting which customer a request targets.
#[derive(Debug, Deserialize)]
pub struct CustomerQuery {
    pub customer_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UpdateResponse {
    pub ok: bool,
    pub customer_id: String,
    pub config: ConfigRecord,
}

pub(crate) fn bearer_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

pub async fn get_config(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Json<ConfigRecord>, AppError> {
    let customer_id = query
        .customer_id
        .unwrap_or_else(|| state.default_customer_id.clone());
    let record = state.resolver.resolve(&customer_id)?;
    Ok(Json(record))
}

pub async fn update_config(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<UpdateResponse>, AppError> {
    state.auth.authorize(bearer_header(&headers))?;

    let customer_id = query
        .customer_id
        .unwrap_or_else(|| state.default_customer_id.clone());
    let partial: Map<String, Value> = serde_json::from_slice(&body).unwrap_or_default();

    let record = state.resolver.update(&customer_id, &partial)?;

    Ok(Json(UpdateResponse {
        ok: true,
        customer_id,
        config: record,
    }))
}
