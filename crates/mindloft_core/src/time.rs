//! Wall-clock helpers and the persisted date format.
//!
//! # Responsibility
//! - Provide the single source of truth for how timestamps are rendered to
//!   and parsed from storage.
//!
//! # Invariants
//! - The persisted format has minute precision, no seconds, no timezone.
//!   Round-tripping a date through it truncates to the minute.

use chrono::{Local, NaiveDateTime};
use log::warn;

/// Minute-precision format used for every persisted timestamp column.
pub const DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Returns the current local wall-clock time.
pub fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

/// Renders a date in the persisted format, dropping seconds.
pub fn format_date(date: NaiveDateTime) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parses a date in the persisted format.
///
/// Returns `None` on malformed input; the failure is logged, not propagated,
/// so a corrupt timestamp column degrades to an absent value.
pub fn parse_date(value: &str) -> Option<NaiveDateTime> {
    match NaiveDateTime::parse_from_str(value, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(err) => {
            warn!("event=date_parse module=time status=error value={value} error={err}");
            None
        }
    }
}
