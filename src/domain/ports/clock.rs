//! Clock port - wall-clock time for unit-name timestamps

use chrono::NaiveDateTime;

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}
