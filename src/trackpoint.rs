//! Trackpoint assembly from aligned channels.

use serde::{Deserialize, Serialize};

use crate::align::AlignedTrack;

/// Fixed-point divisor for latitude/longitude (degrees at 1e8).
const COORDINATE_SCALE: f64 = 100_000_000.0;
/// Fixed-point divisor for altitude (meters at 1e2).
const ALTITUDE_SCALE: f64 = 100.0;

/// A position sample in floating degrees and meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
}

/// One row of the final output, immutable once assembled.
///
/// Serializers decide which sub-fields to render; points with a zero heart
/// rate or cadence are still assembled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    /// Absolute epoch seconds.
    pub time: i64,
    pub position: Position,
    pub heart_rate: i64,
    pub stride: i64,
    pub cadence: i64,
    /// Cumulative distance in meters.
    pub distance: i64,
}

/// Zip the aligned channels index-by-index into trackpoints.
///
/// Applies the fixed unit scales and offsets each canonical timestamp by
/// the activity start so trackpoint times are absolute epoch seconds.
pub fn track_points(track: &AlignedTrack, start_time: i64) -> Vec<TrackPoint> {
    (0..track.times.len())
        .map(|i| TrackPoint {
            time: track.times[i] + start_time,
            position: Position {
                lat: track.lat[i] as f64 / COORDINATE_SCALE,
                lon: track.lon[i] as f64 / COORDINATE_SCALE,
                alt: track.alt[i] as f64 / ALTITUDE_SCALE,
            },
            heart_rate: track.heart_rate[i],
            stride: track.stride[i],
            cadence: track.cadence[i],
            distance: track.distance[i],
        })
        .collect()
}
