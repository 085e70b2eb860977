//! Display formatting helpers.

use chrono::{DateTime, Utc};

/// `dd/mm/yyyy hh:mm`, the format the platform has always shown on chat
/// cards and messages.
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    at.format("%d/%m/%Y %H:%M").to_string()
}
