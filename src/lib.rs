//! # trackalign
//!
//! Converts fitness-band activity exports into time-aligned GPX/TCX tracks.
//!
//! Band exports store every sensor channel (position, altitude, heart rate,
//! gait, distance) as its own delta-encoded string, each sampled on its own
//! irregular grid. This library provides:
//! - Delta decoding of raw channel strings
//! - Forward filling of missing samples
//! - Integer piecewise-linear interpolation
//! - Timeline unification across heterogeneous channels
//! - Optional redistribution of spurious recording gaps
//! - GPX 1.1 and TCX serialization
//!
//! ## Quick Start
//!
//! ```rust
//! use trackalign::channel::{self, accumulate, decode, forward_fill};
//! use trackalign::{canonical_timeline, resample};
//!
//! // A heart-rate channel: time deltas plus bpm deltas.
//! let hr = decode("heart_rate", "0,70;5,2;5,2", channel::HEART_RATE).unwrap();
//! let times = accumulate(&hr.time_deltas);
//! assert_eq!(times, vec![0, 5, 10]);
//!
//! let timeline = canonical_timeline(&[times.as_slice()]);
//! let bpm = resample(&accumulate(&forward_fill(hr.column(0))), &times, &timeline);
//! assert_eq!(bpm, vec![70, 72, 74]);
//! ```

use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{ExportError, Result};

// Raw channel decoding and gap filling
pub mod channel;
pub use channel::{accumulate, decode, encode, forward_fill, FieldLayout, RawChannel, NO_VALUE};

// Integer piecewise-linear interpolation
pub mod interpolate;
pub use interpolate::Interpolator;

// Timeline unification and resampling
pub mod align;
pub use align::{align_track, canonical_timeline, redistribute_gaps, resample, AlignedTrack};

// Activity records parsed from export documents
pub mod activity;
pub use activity::{merge_documents, Activity};

// Trackpoint assembly
pub mod trackpoint;
pub use trackpoint::{track_points, Position, TrackPoint};

// GPX/TCX serialization
pub mod export;
pub use export::{write_gpx, write_tcx};

/// Process-wide export configuration, set once at startup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Redistribute spurious recording gaps so total elapsed time matches
    /// the activity's recorded duration. Off by default; only firmware
    /// revisions that drop sensor pauses from the channels need it.
    pub fix_time_gaps: bool,
}
