//! Database utility functions.

use chrono::NaiveDate;

use crate::db::{DbError, DbResult};

/// Wire format for release dates.
pub const RELEASE_DATE_FORMAT: &str = "%d.%m.%Y";

/// Parse a `DD.MM.YYYY` release date.
pub fn parse_release_date(value: &str) -> DbResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), RELEASE_DATE_FORMAT).map_err(|e| {
        DbError::MalformedInput {
            message: format!("release date '{}' is not in DD.MM.YYYY format: {}", value, e),
        }
    })
}

/// Format a release date as `DD.MM.YYYY`.
pub fn format_release_date(date: NaiveDate) -> String {
    date.format(RELEASE_DATE_FORMAT).to_string()
}

/// Reject empty identity fields (group or song name).
pub fn require_non_empty(field: &str, value: &str) -> DbResult<()> {
    if value.is_empty() {
        return Err(DbError::MalformedInput {
            message: format!("{} must not be empty", field),
        });
    }
    Ok(())
}
