//! Record model and field coercion.
//!
//! # Responsibilities
//! - Define the closed set of tunable fields and their defaults
//! - Merge raw stored/submitted values over the defaults
//! - Coerce each field to its declared type
//!
//! # Design Decisions
//! - Absent fields fill from defaults; present fields must coerce or the
//!   whole merge fails
//! - Unknown keys are dropped, never stored
//! - `min_sec_left` truncates fractional input (10.9 → 10), no rounding

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from field coercion.
#[derive(Debug, Error)]
pub enum RecordError {
    /// A present field failed numeric or boolean coercion.
    #[error("invalid value for field '{field}': {value}")]
    InvalidFieldValue { field: &'static str, value: Value },
}

/// The closed set of tunable field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Ratio,
    MinCoins,
    MinRatio,
    MinSecLeft,
    AlertEnabled,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Ratio,
        Field::MinCoins,
        Field::MinRatio,
        Field::MinSecLeft,
        Field::AlertEnabled,
    ];

    /// Wire/storage name of the field.
    pub fn name(self) -> &'static str {
        match self {
            Field::Ratio => "ratio",
            Field::MinCoins => "min_coins",
            Field::MinRatio => "min_ratio",
            Field::MinSecLeft => "min_sec_left",
            Field::AlertEnabled => "alert_enabled",
        }
    }

    /// Look up a field by its wire name. Unknown names return `None`.
    pub fn from_name(name: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.name() == name)
    }
}

/// One customer's tuning record. Every field always has a value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigRecord {
    /// Target alert ratio.
    pub ratio: f64,

    /// Minimum coin threshold.
    pub min_coins: f64,

    /// Minimum acceptable ratio.
    pub min_ratio: f64,

    /// Minimum seconds remaining threshold.
    pub min_sec_left: i64,

    /// Whether alerts fire at all.
    pub alert_enabled: bool,
}

impl Default for ConfigRecord {
    fn default() -> Self {
        Self {
            ratio: 1.5,
            min_coins: 100.0,
            min_ratio: 1.5,
            min_sec_left: 20,
            alert_enabled: true,
        }
    }
}

impl ConfigRecord {
    /// Merge raw fields over the built-in defaults.
    ///
    /// Keys absent (or null) in `raw` keep their defaults and unknown keys
    /// are ignored. A present key that fails coercion is a hard error; the
    /// caller gets no record at all.
    pub fn from_raw(raw: &Map<String, Value>) -> Result<Self, RecordError> {
        let mut record = Self::default();
        for field in Field::ALL {
            let Some(value) = raw.get(field.name()) else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            match field {
                Field::Ratio => record.ratio = coerce_float(field, value)?,
                Field::MinCoins => record.min_coins = coerce_float(field, value)?,
                Field::MinRatio => record.min_ratio = coerce_float(field, value)?,
                Field::MinSecLeft => record.min_sec_left = coerce_float(field, value)? as i64,
                Field::AlertEnabled => record.alert_enabled = coerce_bool(value),
            }
        }
        Ok(record)
    }

    /// Flatten back into the stored field-map form.
    pub fn to_raw(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("ratio".to_string(), Value::from(self.ratio));
        map.insert("min_coins".to_string(), Value::from(self.min_coins));
        map.insert("min_ratio".to_string(), Value::from(self.min_ratio));
        map.insert("min_sec_left".to_string(), Value::from(self.min_sec_left));
        map.insert("alert_enabled".to_string(), Value::from(self.alert_enabled));
        map
    }
}

/// Coerce a raw value to a float. Numeric strings parse; anything else
/// present is an error rather than a silent default.
fn coerce_float(field: Field, value: &Value) -> Result<f64, RecordError> {
    match value {
        Value::Number(n) => n.as_f64().ok_or_else(|| invalid(field, value)),
        Value::String(s) => s.trim().parse().map_err(|_| invalid(field, value)),
        _ => Err(invalid(field, value)),
    }
}

/// Coerce a raw value to a bool.
///
/// JSON bools pass through (REST path); of the form strings only "1",
/// "true" and "True" enable (HTML path); numbers enable when nonzero.
fn coerce_bool(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::String(s) => matches!(s.as_str(), "1" | "true" | "True"),
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        _ => false,
    }
}

fn invalid(field: Field, value: &Value) -> RecordError {
    RecordError::InvalidFieldValue {
        field: field.name(),
        value: value.clone(),
    }
}
