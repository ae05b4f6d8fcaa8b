//! Multi-channel timeline alignment.
//!
//! Each sensor channel in a band export samples on its own irregular grid:
//! heart-rate timestamps, step timestamps, and position timestamps are three
//! independently delta-encoded sequences that rarely agree. This module
//! unions those grids into one canonical ascending timeline, optionally
//! redistributes spurious recording gaps, and resamples every channel onto
//! the shared timeline so the columns can be zipped into trackpoints.

use std::collections::BTreeSet;

use log::{debug, warn};
use serde::Serialize;

use crate::activity::Activity;
use crate::channel::{accumulate, forward_fill};
use crate::interpolate::Interpolator;
use crate::ExportConfig;

/// Safety cap on gap-redistribution rounds. Each productive round shrinks a
/// gap by at least one second, so hitting the cap means something is off
/// with the input; the residual excess is logged and left unresolved.
const MAX_REDISTRIBUTION_ROUNDS: usize = 10_000;

/// All channels resampled onto one shared timeline.
///
/// Every column has the same length as `times`; index `i` across the
/// columns describes one instant. Values keep the export's fixed-point
/// scales (latitude/longitude at 1e8, altitude at 1e2); trackpoint assembly
/// divides them back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AlignedTrack {
    /// Canonical timeline, seconds relative to the activity start.
    pub times: Vec<i64>,
    pub lat: Vec<i64>,
    pub lon: Vec<i64>,
    pub alt: Vec<i64>,
    pub heart_rate: Vec<i64>,
    pub stride: Vec<i64>,
    pub cadence: Vec<i64>,
    pub distance: Vec<i64>,
}

/// Ascending, de-duplicated union of per-channel timestamp arrays.
pub fn canonical_timeline(channels: &[&[i64]]) -> Vec<i64> {
    let mut union = BTreeSet::new();
    for times in channels {
        union.extend(times.iter().copied());
    }
    union.into_iter().collect()
}

/// Resample one channel onto the canonical timeline.
///
/// An empty timeline produces empty output; a channel with no samples
/// resamples to zeros; a channel with exactly one sample repeats that
/// sample for every timeline point. Anything else interpolates.
pub fn resample(values: &[i64], src_times: &[i64], timeline: &[i64]) -> Vec<i64> {
    if timeline.is_empty() {
        return Vec::new();
    }
    let len = src_times.len().min(values.len());
    match len {
        0 => vec![0; timeline.len()],
        1 => vec![values[0]; timeline.len()],
        _ => {
            let Some(interp) = Interpolator::new(&src_times[..len], &values[..len]) else {
                return vec![0; timeline.len()];
            };
            timeline.iter().map(|&t| interp.value_at(t)).collect()
        }
    }
}

/// Shrink spurious recording gaps until total elapsed time matches the
/// activity's recorded duration.
///
/// Some firmware revisions drop a sensor pause from every channel, leaving
/// the unified timeline longer than the recorded elapsed time. Each round
/// finds the single largest inter-sample gap (measured from an implicit
/// origin at zero), shrinks it by at most `excess` seconds without
/// collapsing it below one second, and shifts every timestamp at or after
/// the gap's right boundary backward in every channel. Stops when the
/// excess is resolved or no gap can shrink further.
pub fn redistribute_gaps(channel_times: &mut [Vec<i64>], cost_time: i64) {
    let mut timeline = union_of(channel_times);
    let Some(&last) = timeline.last() else {
        return;
    };

    let mut excess = last - cost_time;
    let mut rounds = 0;
    while excess > 0 {
        rounds += 1;
        if rounds > MAX_REDISTRIBUTION_ROUNDS {
            warn!(
                "gap redistribution stopped after {MAX_REDISTRIBUTION_ROUNDS} rounds \
                 with {excess}s unresolved"
            );
            return;
        }

        let mut largest_gap = 0;
        let mut gap_end = 0;
        let mut previous = 0;
        for &time in &timeline {
            if time - previous > largest_gap {
                largest_gap = time - previous;
                gap_end = time;
            }
            previous = time;
        }

        let shrink = (largest_gap - 1).min(excess);
        if shrink <= 0 {
            debug!("gap redistribution converged with {excess}s unresolved");
            return;
        }

        for times in channel_times.iter_mut() {
            for time in times.iter_mut() {
                if *time >= gap_end {
                    *time -= shrink;
                }
            }
        }
        excess -= shrink;
        timeline = union_of(channel_times);
    }
}

/// Align every channel of an activity onto the canonical timeline.
///
/// Per-channel time deltas are accumulated into absolute timestamps, gaps
/// are optionally redistributed (before resampling, since redistribution
/// shifts the per-channel timestamps the resampler consumes), every value
/// column is forward-filled, cumulative channels (position, heart rate,
/// distance) get a running-sum transform, and everything is resampled onto
/// the union timeline. The input activity is not mutated.
pub fn align_track(activity: &Activity, config: &ExportConfig) -> AlignedTrack {
    let mut channel_times = [
        accumulate(&activity.time.time_deltas),
        accumulate(&activity.heart_rate.time_deltas),
        accumulate(&activity.gait.time_deltas),
        accumulate(&activity.distance.time_deltas),
    ];

    if config.fix_time_gaps {
        redistribute_gaps(&mut channel_times, activity.cost_time);
    }

    let [position_times, hr_times, step_times, distance_times] = channel_times;
    let timeline = canonical_timeline(&[
        position_times.as_slice(),
        hr_times.as_slice(),
        step_times.as_slice(),
        distance_times.as_slice(),
    ]);
    debug!(
        "unified {} position / {} hr / {} step / {} distance samples onto {} timeline points",
        position_times.len(),
        hr_times.len(),
        step_times.len(),
        distance_times.len(),
        timeline.len()
    );

    let lat = cumulative_column(activity.position.column(0));
    let lon = cumulative_column(activity.position.column(1));
    let alt = absolute_column(activity.altitude.column(0));
    let heart_rate = cumulative_column(activity.heart_rate.column(0));
    let stride = absolute_column(activity.gait.column(0));
    let cadence = absolute_column(activity.gait.column(1));
    let distance = cumulative_column(activity.distance.column(0));

    AlignedTrack {
        lat: resample(&lat, &position_times, &timeline),
        lon: resample(&lon, &position_times, &timeline),
        alt: resample(&alt, &position_times, &timeline),
        heart_rate: resample(&heart_rate, &hr_times, &timeline),
        stride: resample(&stride, &step_times, &timeline),
        cadence: resample(&cadence, &step_times, &timeline),
        distance: resample(&distance, &distance_times, &timeline),
        times: timeline,
    }
}

/// Gap-fill a column whose samples are deltas of a cumulative series, then
/// accumulate it into absolute values.
fn cumulative_column(values: &[Option<i64>]) -> Vec<i64> {
    accumulate(&forward_fill(values))
}

/// Gap-fill a column whose samples are already absolute.
fn absolute_column(values: &[Option<i64>]) -> Vec<i64> {
    forward_fill(values)
}

fn union_of(channel_times: &[Vec<i64>]) -> Vec<i64> {
    let slices: Vec<&[i64]> = channel_times.iter().map(Vec::as_slice).collect();
    canonical_timeline(&slices)
}
