//! Shared snapshot of the attendance rules.

use std::sync::{Arc, RwLock};

use crate::models::AttendanceRules;

/// Holds the current rules and hands out immutable snapshots.
///
/// Rules are only ever replaced whole. A snapshot taken before a replace
/// keeps the old rules for as long as the holder needs them.
///
/// # Example
///
/// ```
/// use attendance_engine::models::AttendanceRules;
/// use attendance_engine::services::RulesStore;
///
/// let store = RulesStore::new(AttendanceRules::default());
/// let before = store.snapshot();
///
/// store.replace(AttendanceRules { radius_meters: 80.0, ..AttendanceRules::default() });
///
/// assert_eq!(before.radius_meters, 50.0);
/// assert_eq!(store.snapshot().radius_meters, 80.0);
/// ```
#[derive(Debug)]
pub struct RulesStore {
    current: RwLock<Arc<AttendanceRules>>,
}

impl RulesStore {
    /// Creates a store holding `rules`.
    pub fn new(rules: AttendanceRules) -> Self {
        Self {
            current: RwLock::new(Arc::new(rules)),
        }
    }

    /// Returns the current rules.
    pub fn snapshot(&self) -> Arc<AttendanceRules> {
        // a poisoned lock still holds a complete Arc
        Arc::clone(&self.current.read().unwrap_or_else(|e| e.into_inner()))
    }

    /// Replaces the rules.
    pub fn replace(&self, rules: AttendanceRules) {
        *self.current.write().unwrap_or_else(|e| e.into_inner()) = Arc::new(rules);
    }
}

impl Default for RulesStore {
    fn default() -> Self {
        Self::new(AttendanceRules::default())
    }
}
