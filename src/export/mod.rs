//! GPX and TCX serialization of aligned trackpoints.
//!
//! The alignment core is schema-agnostic; this module is the only place
//! that knows XML vocabulary. Both writers stream to any [`std::io::Write`]
//! and omit heart-rate and cadence sub-fields when the value is exactly
//! zero (the points themselves are always written).

mod gpx;
mod tcx;

pub use gpx::write_gpx;
pub use tcx::write_tcx;

use chrono::DateTime;

use crate::error::{ExportError, Result};

/// Format epoch seconds as an ISO 8601 UTC timestamp (no zone suffix).
fn iso_timestamp(seconds: i64) -> Result<String> {
    let time = DateTime::from_timestamp(seconds, 0)
        .ok_or(ExportError::InvalidTimestamp { seconds })?;
    Ok(time.format("%Y-%m-%dT%H:%M:%S").to_string())
}
