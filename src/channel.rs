//! Raw channel decoding and gap filling.
//!
//! Band exports store each sensor channel as a `;`-separated string where
//! each field is either a bare integer or a `,`-joined tuple whose first
//! sub-field is a time delta. This module decodes those strings into
//! per-column integer arrays, converts the legacy "no data" sentinel into
//! `None` at the decode boundary, and provides the forward-fill pass that
//! runs on every column before interpolation.

use crate::error::{ExportError, Result};

/// Legacy sentinel marking an absent sample inside a raw channel.
///
/// Never a legitimate data value; decoding maps it to `None` and
/// [`encode`] maps `None` back.
pub const NO_VALUE: i64 = -2_000_000;

/// Describes how the fields of one raw channel string are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    /// Whether the first sub-field of each tuple is a time delta.
    /// An empty delta sub-field decodes as `1`.
    pub time_delta: bool,
    /// Sub-field indices that carry values, in output column order.
    pub columns: &'static [usize],
}

/// `time`: bare time deltas for the position and altitude channels.
pub const TIME: FieldLayout = FieldLayout {
    time_delta: true,
    columns: &[],
};

/// `longitude_latitude`: latitude/longitude delta pairs, timed by `time`.
pub const POSITION: FieldLayout = FieldLayout {
    time_delta: false,
    columns: &[0, 1],
};

/// `altitude`: bare centimeter values, timed by `time`.
pub const ALTITUDE: FieldLayout = FieldLayout {
    time_delta: false,
    columns: &[0],
};

/// `heart_rate`: `delta,bpm-delta` tuples.
pub const HEART_RATE: FieldLayout = FieldLayout {
    time_delta: true,
    columns: &[1],
};

/// `gait`: `delta,_,stride,cadence` tuples (the second sub-field is unused).
pub const GAIT: FieldLayout = FieldLayout {
    time_delta: true,
    columns: &[2, 3],
};

/// `distance`: `delta,meter-delta` tuples.
pub const DISTANCE: FieldLayout = FieldLayout {
    time_delta: true,
    columns: &[1],
};

/// One decoded channel: a shared time-delta column plus value columns.
///
/// All columns have the same length (one entry per raw field);
/// `time_deltas` is empty for layouts without an embedded delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawChannel {
    /// Raw time deltas, one per field.
    pub time_deltas: Vec<i64>,
    /// Value columns; `None` marks a missing sample.
    pub columns: Vec<Vec<Option<i64>>>,
}

impl RawChannel {
    /// Borrow one value column by layout position.
    ///
    /// Returns an empty slice for columns the layout does not define.
    pub fn column(&self, index: usize) -> &[Option<i64>] {
        self.columns.get(index).map_or(&[], Vec::as_slice)
    }

    /// Number of decoded fields.
    pub fn len(&self) -> usize {
        self.columns
            .first()
            .map_or(self.time_deltas.len(), Vec::len)
    }

    /// Whether the channel decoded zero fields.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Decode one raw channel string.
///
/// Splits on `;`, discards empty fields, then splits each field on `,` and
/// extracts the sub-fields the layout names. Malformed tokens and fields
/// that are too short are fatal for the whole activity. An empty input
/// string decodes to an empty channel.
pub fn decode(channel: &'static str, raw: &str, layout: FieldLayout) -> Result<RawChannel> {
    let mut time_deltas = Vec::new();
    let mut columns: Vec<Vec<Option<i64>>> = vec![Vec::new(); layout.columns.len()];

    for field in raw.split(';').filter(|field| !field.is_empty()) {
        let parts: Vec<&str> = field.split(',').collect();

        if layout.time_delta {
            let token = parts[0];
            let delta = if token.is_empty() {
                1
            } else {
                parse_token(channel, token)?
            };
            time_deltas.push(delta);
        }

        for (slot, &index) in layout.columns.iter().enumerate() {
            let token = parts.get(index).ok_or_else(|| ExportError::ShortField {
                channel,
                field: field.to_string(),
                index,
            })?;
            let value = parse_token(channel, token)?;
            columns[slot].push((value != NO_VALUE).then_some(value));
        }
    }

    Ok(RawChannel {
        time_deltas,
        columns,
    })
}

/// Re-encode a channel with the same delta scheme it was decoded from.
///
/// Sub-fields the layout leaves unused are written as `0`; missing samples
/// are written back as [`NO_VALUE`]. Decoding the result yields the original
/// channel.
pub fn encode(channel: &RawChannel, layout: FieldLayout) -> String {
    let rows = channel
        .time_deltas
        .len()
        .max(channel.columns.iter().map(Vec::len).max().unwrap_or(0));
    let width = layout
        .columns
        .iter()
        .copied()
        .max()
        .map_or(0, |max| max + 1)
        .max(usize::from(layout.time_delta))
        .max(1);

    let mut fields = Vec::with_capacity(rows);
    for row in 0..rows {
        let mut parts = vec!["0".to_string(); width];
        if layout.time_delta {
            parts[0] = channel
                .time_deltas
                .get(row)
                .copied()
                .unwrap_or(1)
                .to_string();
        }
        for (slot, &index) in layout.columns.iter().enumerate() {
            let value = channel.columns[slot]
                .get(row)
                .copied()
                .flatten()
                .unwrap_or(NO_VALUE);
            parts[index] = value.to_string();
        }
        fields.push(parts.join(","));
    }
    fields.join(";")
}

/// Replace missing samples with the nearest preceding valid value.
///
/// A leading run of missing samples takes the first valid value found
/// anywhere in the column; an all-missing column fills with [`NO_VALUE`]
/// so callers can still treat it as "no data". Idempotent.
pub fn forward_fill(values: &[Option<i64>]) -> Vec<i64> {
    let mut last = values
        .iter()
        .flatten()
        .next()
        .copied()
        .unwrap_or(NO_VALUE);
    values
        .iter()
        .map(|value| {
            if let Some(v) = *value {
                last = v;
            }
            last
        })
        .collect()
}

/// Running sum, turning per-sample deltas into absolute values.
pub fn accumulate(deltas: &[i64]) -> Vec<i64> {
    let mut total = 0;
    deltas
        .iter()
        .map(|delta| {
            total += delta;
            total
        })
        .collect()
}

fn parse_token(channel: &'static str, token: &str) -> Result<i64> {
    token
        .trim()
        .parse()
        .map_err(|_| ExportError::MalformedChannel {
            channel,
            token: token.to_string(),
        })
}
