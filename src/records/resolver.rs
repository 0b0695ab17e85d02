//! Record resolution and updates.
//!
//! # Responsibilities
//! - Resolve a complete record for any customer id (stored entry →
//!   default-customer entry → built-in defaults)
//! - Apply partial updates read-modify-write against the store
//!
//! # Design Decisions
//! - Resolution never touches storage and never fails on missing data
//! - Updates overlay only non-null, non-empty keys, coerce the merged
//!   whole before writing, and persist the complete record
//! - A single in-process lock serializes the load/mutate/save sequence;
//!   cross-process writers still race (last save wins)

use std::sync::{Mutex, PoisonError};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::records::record::{ConfigRecord, Field, RecordError};
use crate::records::store::{RecordStore, StoreError};

/// Errors from applying an update.
#[derive(Debug, Error)]
pub enum UpdateError {
    /// A submitted field failed coercion; nothing was persisted.
    #[error(transparent)]
    Record(#[from] RecordError),

    /// Persisting the updated table failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Resolves complete config records from the store.
pub struct ConfigResolver {
    store: RecordStore,
    default_customer_id: String,
    write_lock: Mutex<()>,
}

impl ConfigResolver {
    pub fn new(store: RecordStore, default_customer_id: impl Into<String>) -> Self {
        Self {
            store,
            default_customer_id: default_customer_id.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn default_customer_id(&self) -> &str {
        &self.default_customer_id
    }

    /// Produce the fully populated record for a customer.
    ///
    /// Customers without a stored record resolve through the default
    /// customer's record; fields missing there fill from built-in
    /// defaults. Read-only: storage is never mutated.
    pub fn resolve(&self, customer_id: &str) -> Result<ConfigRecord, RecordError> {
        let table = self.store.load();
        let empty = Map::new();
        let raw = table
            .get(customer_id)
            .or_else(|| table.get(&self.default_customer_id))
            .unwrap_or(&empty);
        ConfigRecord::from_raw(raw)
    }

    /// Apply a partial update and persist the result.
    ///
    /// Only known keys carrying a non-null, non-empty value override the
    /// stored entry. The merged record is coerced as a whole before
    /// anything is written, so one bad value rejects the entire update.
    pub fn update(
        &self,
        customer_id: &str,
        partial: &Map<String, Value>,
    ) -> Result<ConfigRecord, UpdateError> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let mut table = self.store.load();
        let mut raw = table.get(customer_id).cloned().unwrap_or_default();
        for (key, value) in partial {
            if Field::from_name(key).is_none() || value.is_null() {
                continue;
            }
            if matches!(value, Value::String(s) if s.is_empty()) {
                continue;
            }
            raw.insert(key.clone(), value.clone());
        }

        let record = ConfigRecord::from_raw(&raw)?;
        table.insert(customer_id.to_string(), record.to_raw());
        self.store.save(&table)?;

        tracing::debug!(customer_id = %customer_id, "Config record updated");
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn resolver_in(dir: &TempDir) -> ConfigResolver {
        let store = RecordStore::new(dir.path().join("config_store.json"));
        ConfigResolver::new(store, "DEFAULT")
    }

    fn partial(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_unknown_customer_without_default_gets_defaults() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        let record = resolver.resolve("anyone").unwrap();
        assert_eq!(record, ConfigRecord::default());
    }

    #[test]
    fn test_unknown_customer_falls_back_to_default_customer() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        resolver
            .update("DEFAULT", &partial(json!({"ratio": 3.0})))
            .unwrap();

        let record = resolver.resolve("anyone").unwrap();
        assert_eq!(record.ratio, 3.0);
    }

    #[test]
    fn test_stored_record_beats_default_customer() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        resolver
            .update("DEFAULT", &partial(json!({"ratio": 3.0})))
            .unwrap();
        resolver
            .update("acme", &partial(json!({"ratio": 9.0})))
            .unwrap();

        assert_eq!(resolver.resolve("acme").unwrap().ratio, 9.0);
        assert_eq!(resolver.resolve("other").unwrap().ratio, 3.0);
    }

    #[test]
    fn test_update_round_trip_keeps_other_fields() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        let before = resolver.resolve("acme").unwrap();

        resolver
            .update("acme", &partial(json!({"ratio": 2.0})))
            .unwrap();
        let after = resolver.resolve("acme").unwrap();

        assert_eq!(after.ratio, 2.0);
        assert_eq!(after.min_coins, before.min_coins);
        assert_eq!(after.min_ratio, before.min_ratio);
        assert_eq!(after.min_sec_left, before.min_sec_left);
        assert_eq!(after.alert_enabled, before.alert_enabled);
    }

    #[test]
    fn test_update_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        let payload = partial(json!({"ratio": 2.0, "alert_enabled": false}));

        let once = resolver.update("acme", &payload).unwrap();
        let twice = resolver.update("acme", &payload).unwrap();
        assert_eq!(once, twice);
        assert_eq!(resolver.resolve("acme").unwrap(), once);
    }

    #[test]
    fn test_unknown_keys_change_nothing() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        let before = resolver.resolve("acme").unwrap();

        resolver.update("acme", &partial(json!({"bogus": 1}))).unwrap();
        assert_eq!(resolver.resolve("acme").unwrap(), before);
    }

    #[test]
    fn test_empty_string_values_do_not_override() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        resolver
            .update("acme", &partial(json!({"ratio": 4.0})))
            .unwrap();

        resolver.update("acme", &partial(json!({"ratio": ""}))).unwrap();
        assert_eq!(resolver.resolve("acme").unwrap().ratio, 4.0);
    }

    // The all-or-nothing policy on invalid values is an assumed contract;
    // the live system was never observed under partial-apply.
    #[test]
    fn test_update_rejects_whole_payload_on_bad_value() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);
        let before = resolver.resolve("acme").unwrap();

        let err = resolver
            .update("acme", &partial(json!({"min_coins": 7, "ratio": "fast"})))
            .unwrap_err();
        assert!(matches!(err, UpdateError::Record(_)));

        // Nothing from the payload landed, not even the valid part.
        assert_eq!(resolver.resolve("acme").unwrap(), before);
    }

    #[test]
    fn test_default_customer_scenario() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver_in(&dir);

        resolver
            .update(
                "DEFAULT",
                &partial(json!({"min_coins": 50, "min_sec_left": 10.9})),
            )
            .unwrap();

        let record = resolver.resolve("anyone").unwrap();
        assert_eq!(record.min_coins, 50.0);
        assert_eq!(record.min_sec_left, 10);
        assert_eq!(record.ratio, 1.5);
        assert_eq!(record.min_ratio, 1.5);
        assert!(record.alert_enabled);
    }
}
