//! Manually entered emissions figures, keyed by scope.
//!
//! A scope is either the literal `"national"` or a region identifier.
//! Scope strings are exact matches (`"nairobi"` and `"Nairobi"` are
//! distinct scopes), and nothing checks that a scope names a region that
//! actually exists. Entries never expire; last write wins.

use dashmap::DashMap;

use crate::errors::AppError;

#[derive(Default)]
pub struct OverrideStore {
    values: DashMap<String, f64>,
}

impl OverrideStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` for `scope`, overwriting any prior entry. Negative
    /// values are rejected before any mutation.
    pub fn set(&self, scope: &str, value: f64) -> Result<f64, AppError> {
        if value < 0.0 {
            return Err(AppError::NegativeEmissions(value));
        }
        self.values.insert(scope.to_string(), value);
        Ok(value)
    }

    pub fn get(&self, scope: &str) -> Option<f64> {
        self.values.get(scope).map(|v| *v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let store = OverrideStore::new();
        assert_eq!(store.get("national"), None);
        store.set("national", 999.9).unwrap();
        assert_eq!(store.get("national"), Some(999.9));
    }

    #[test]
    fn test_negative_value_rejected_without_mutation() {
        let store = OverrideStore::new();
        store.set("Nairobi", 56.7).unwrap();
        let err = store.set("Nairobi", -1.0).unwrap_err();
        assert!(matches!(err, AppError::NegativeEmissions(v) if v == -1.0));
        assert_eq!(store.get("Nairobi"), Some(56.7));
    }

    #[test]
    fn test_last_write_wins() {
        let store = OverrideStore::new();
        store.set("Mombasa", 10.0).unwrap();
        store.set("Mombasa", 20.5).unwrap();
        assert_eq!(store.get("Mombasa"), Some(20.5));
    }

    #[test]
    fn test_scopes_are_case_sensitive() {
        let store = OverrideStore::new();
        store.set("Nairobi", 56.7).unwrap();
        assert_eq!(store.get("nairobi"), None);
    }

    #[test]
    fn test_zero_is_accepted() {
        let store = OverrideStore::new();
        store.set("Turkana", 0.0).unwrap();
        assert_eq!(store.get("Turkana"), Some(0.0));
    }
}
