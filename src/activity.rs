//! Activity records parsed from merged export documents.
//!
//! The band sync service produces two JSON documents per activity: a
//! summary (scalar stats) and a detail record (the raw channel strings).
//! [`merge_documents`] folds the summary into the detail conservatively,
//! and [`Activity::from_json`] decodes the merged document into one
//! immutable activity record. Any decode failure aborts the whole activity;
//! there is no partial recovery.

use serde_json::Value;

use crate::channel::{self, RawChannel};
use crate::error::{ExportError, Result};

/// One activity's scalar metadata plus its decoded sensor channels.
///
/// Owned exclusively by one export operation and never mutated after
/// parsing; alignment builds fresh aggregates instead of touching it.
#[derive(Debug, Clone)]
pub struct Activity {
    /// Activity start, epoch seconds. Doubles as the track identifier.
    pub start_time: i64,
    pub end_time: i64,
    /// Recorded elapsed duration in seconds.
    pub cost_time: i64,
    pub avg_heart_rate: f64,
    pub max_heart_rate: f64,
    pub min_heart_rate: f64,
    pub calorie: f64,
    pub total_step: i64,
    /// Time deltas shared by the position and altitude channels.
    pub time: RawChannel,
    /// Latitude/longitude deltas at 1e8 fixed point.
    pub position: RawChannel,
    /// Absolute altitude at 1e2 fixed point.
    pub altitude: RawChannel,
    /// Heart-rate deltas with their own time grid.
    pub heart_rate: RawChannel,
    /// Absolute stride and cadence with their own time grid.
    pub gait: RawChannel,
    /// Cumulative-distance deltas with their own time grid.
    pub distance: RawChannel,
}

impl Activity {
    /// Parse an activity from a merged summary+detail document.
    ///
    /// Scalar fields accept JSON numbers or numeric strings; a missing or
    /// non-numeric scalar is fatal. Channel fields must be present but may
    /// be `null` or empty, which decodes as an empty channel.
    pub fn from_json(doc: &Value) -> Result<Self> {
        Ok(Self {
            start_time: require_i64(doc, "trackid")?,
            end_time: require_i64(doc, "end_time")?,
            cost_time: require_i64(doc, "run_time")?,
            avg_heart_rate: require_f64(doc, "avg_heart_rate")?,
            max_heart_rate: require_f64(doc, "max_heart_rate")?,
            min_heart_rate: require_f64(doc, "min_heart_rate")?,
            calorie: require_f64(doc, "calorie")?,
            total_step: require_i64(doc, "total_step")?,
            time: decode_field(doc, "time", channel::TIME)?,
            position: decode_field(doc, "longitude_latitude", channel::POSITION)?,
            altitude: decode_field(doc, "altitude", channel::ALTITUDE)?,
            heart_rate: decode_field(doc, "heart_rate", channel::HEART_RATE)?,
            gait: decode_field(doc, "gait", channel::GAIT)?,
            distance: decode_field(doc, "distance", channel::DISTANCE)?,
        })
    }

    /// Total recorded distance in meters, summed from the raw channel.
    pub fn total_distance(&self) -> i64 {
        self.distance.column(0).iter().flatten().sum()
    }
}

/// Conservatively merge the summary document into the detail document.
///
/// Keys already present in the detail win; objects merge recursively;
/// everything else is copied only where the detail has no value.
pub fn merge_documents(detail: &mut Value, summary: &Value) {
    let (Value::Object(detail), Value::Object(summary)) = (detail, summary) else {
        return;
    };
    for (key, value) in summary {
        match detail.get_mut(key) {
            None => {
                detail.insert(key.clone(), value.clone());
            }
            Some(existing) if existing.is_object() && value.is_object() => {
                merge_documents(existing, value);
            }
            Some(_) => {}
        }
    }
}

fn field<'a>(doc: &'a Value, name: &'static str) -> Result<&'a Value> {
    doc.get(name).ok_or(ExportError::MissingField { field: name })
}

fn require_i64(doc: &Value, name: &'static str) -> Result<i64> {
    let value = field(doc, name)?;
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ExportError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}

fn require_f64(doc: &Value, name: &'static str) -> Result<f64> {
    let value = field(doc, name)?;
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
    .ok_or_else(|| ExportError::InvalidField {
        field: name,
        value: value.to_string(),
    })
}

fn decode_field(doc: &Value, name: &'static str, layout: channel::FieldLayout) -> Result<RawChannel> {
    match field(doc, name)? {
        Value::Null => channel::decode(name, "", layout),
        Value::String(raw) => channel::decode(name, raw, layout),
        other => Err(ExportError::InvalidField {
            field: name,
            value: other.to_string(),
        }),
    }
}
