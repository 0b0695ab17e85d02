//! HTML form surface over the same operations.
//!
//! # Responsibilities
//! - `GET /config` — render the resolved record in an editable form
//! - `POST /config` — gate, update, redirect back to the form
//! - `GET /` — send operators to the default customer's form
//!
//! # Design Decisions
//! - Everything arrives as text; empty fields are dropped before the
//!   update so clearing an input never overwrites a stored value
//! - `alert_enabled` is coerced at this boundary: only "1", "true" and
//!   "True" enable

use axum::extract::{Form, Query, State};
use axum::http::HeaderMap;
use axum::response::{Html, Redirect};
use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::http::api::{bearer_header, CustomerQuery};
use crate::http::error::AppError;
use crate::http::server::AppState;

/// Fields posted by the HTML form.
#[derive(Debug, Deserialize)]
pub struct FormFields {
    pub customer_id: Option<String>,
    pub ratio: Option<String>,
    pub min_ratio: Option<String>,
    pub min_coins: Option<String>,
    pub min_sec_left: Option<String>,
    pub alert_enabled: Option<String>,
}

pub async fn root_redirect(State(state): State<AppState>) -> Redirect {
    Redirect::to(&form_url(&state.default_customer_id))
}

pub async fn show_form(
    State(state): State<AppState>,
    Query(query): Query<CustomerQuery>,
) -> Result<Html<String>, AppError> {
    let customer_id = query
        .customer_id
        .unwrap_or_else(|| state.default_customer_id.clone());
    let record = state.resolver.resolve(&customer_id)?;

    let html = state.templates.render(
        "config_form",
        &json!({
            "customer_id": customer_id,
            "save_url": "/config",
            "cfg": record,
            "alert_enabled_flag": if record.alert_enabled { "1" } else { "0" },
        }),
    )?;
    Ok(Html(html))
}

pub async fn submit_form(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(fields): Form<FormFields>,
) -> Result<Redirect, AppError> {
    state.auth.authorize(bearer_header(&headers))?;

    let customer_id = fields
        .customer_id
        .unwrap_or_else(|| state.default_customer_id.clone());

    let mut partial = Map::new();
    for (name, value) in [
        ("ratio", fields.ratio),
        ("min_ratio", fields.min_ratio),
        ("min_coins", fields.min_coins),
        ("min_sec_left", fields.min_sec_left),
    ] {
        if let Some(v) = value {
            if !v.is_empty() {
                partial.insert(name.to_string(), Value::String(v));
            }
        }
    }
    if let Some(v) = fields.alert_enabled {
        if !v.is_empty() {
            let enabled = matches!(v.as_str(), "1" | "true" | "True");
            partial.insert("alert_enabled".to_string(), Value::Bool(enabled));
        }
    }

    state.resolver.update(&customer_id, &partial)?;
    Ok(Redirect::to(&form_url(&customer_id)))
}

fn form_url(customer_id: &str) -> String {
    format!("/config?customer_id={customer_id}")
}
