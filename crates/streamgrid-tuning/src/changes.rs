//! Config change-sets produced by the tuning engine.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{TuningError, TuningResult};

/// A set of configuration option overrides and removals.
///
/// Produced fresh by each tuning call and merged into the job's persisted
/// configuration by the caller; the engine retains nothing across calls.
///
/// Invariant: a key never appears in both sets. Overriding a previously
/// removed key cancels the removal. Removing a previously overridden key is
/// rejected, since it indicates a logic bug in the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigChanges {
    overrides: BTreeMap<String, String>,
    removals: BTreeSet<String>,
}

impl ConfigChanges {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an override, cancelling any pending removal of the same key.
    pub fn put(&mut self, key: &str, value: impl Into<String>) -> &mut Self {
        self.removals.remove(key);
        self.overrides.insert(key.to_string(), value.into());
        self
    }

    /// Record a removal.
    pub fn remove(&mut self, key: &str) -> TuningResult<&mut Self> {
        if self.overrides.contains_key(key) {
            return Err(TuningError::Configuration(format!(
                "option {key} cannot be both overridden and removed"
            )));
        }
        self.removals.insert(key.to_string());
        Ok(self)
    }

    /// Override entries, in sorted key order.
    pub fn overrides(&self) -> &BTreeMap<String, String> {
        &self.overrides
    }

    /// Removed keys, in sorted order.
    pub fn removals(&self) -> &BTreeSet<String> {
        &self.removals
    }

    /// True when the change-set carries no overrides and no removals.
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty() && self.removals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_records_override() {
        let mut changes = ConfigChanges::new();
        changes.put("a.key", "1");
        assert_eq!(changes.overrides().get("a.key").unwrap(), "1");
        assert!(changes.removals().is_empty());
        assert!(!changes.is_empty());
    }

    #[test]
    fn put_cancels_pending_removal() {
        let mut changes = ConfigChanges::new();
        changes.remove("a.key").unwrap();
        changes.put("a.key", "1");
        assert!(changes.removals().is_empty());
        assert!(changes.overrides().contains_key("a.key"));
    }

    #[test]
    fn removing_an_overridden_key_is_an_error() {
        let mut changes = ConfigChanges::new();
        changes.put("a.key", "1");
        assert!(matches!(
            changes.remove("a.key"),
            Err(TuningError::Configuration(_))
        ));
        // The failed removal leaves the change-set untouched.
        assert!(changes.removals().is_empty());
        assert_eq!(changes.overrides().len(), 1);
    }

    #[test]
    fn views_iterate_in_sorted_order() {
        let mut changes = ConfigChanges::new();
        changes.put("b.key", "2");
        changes.put("a.key", "1");
        changes.remove("d.key").unwrap();
        changes.remove("c.key").unwrap();

        let keys: Vec<_> = changes.overrides().keys().cloned().collect();
        assert_eq!(keys, ["a.key", "b.key"]);
        let removed: Vec<_> = changes.removals().iter().cloned().collect();
        assert_eq!(removed, ["c.key", "d.key"]);
    }

    #[test]
    fn fresh_change_set_is_empty() {
        assert!(ConfigChanges::new().is_empty());
    }
}
