//! Availability sub-record shared by vehicles and materials.
//!
//! Stored as JSONB in the `availability` column of each catalog table.

use equipmart_core::types::{CalendarDate, Timestamp};
use equipmart_core::validation::FieldViolation;
use serde::{Deserialize, Serialize};

/// When a listing can be booked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Availability {
    pub is_available: bool,
    pub available_from: Option<Timestamp>,
    pub available_until: Option<Timestamp>,
    #[serde(default)]
    pub blocked_dates: Vec<CalendarDate>,
}

impl Default for Availability {
    fn default() -> Self {
        Self {
            is_available: true,
            available_from: None,
            available_until: None,
            blocked_dates: Vec::new(),
        }
    }
}

impl Availability {
    /// Reject a window that ends before it starts.
    pub fn window_violation(&self) -> Option<FieldViolation> {
        match (self.available_from, self.available_until) {
            (Some(from), Some(until)) if until < from => Some(FieldViolation::new(
                "availableUntil",
                "availableUntil must not be before availableFrom",
            )),
            _ => None,
        }
    }

    /// Sort and dedupe blocked dates so the stored record is canonical.
    pub fn normalized(mut self) -> Self {
        self.blocked_dates.sort_unstable();
        self.blocked_dates.dedup();
        self
    }
}
