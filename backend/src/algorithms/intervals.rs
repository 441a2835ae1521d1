//! Interval algebra.
//!
//! Set operations over interval collections: window clipping, pairwise
//! overlap, and union with coalescing. Everything here is pure: the
//! functions read their arguments, allocate their results, and share no
//! state, so they are safe to call from any thread.
//!
//! `overlap_duration` is deliberately the full cross product, O(|A|·|B|).
//! The inputs are failure and outage interval sets whose cardinality per
//! query window is small; the quadratic form keeps the code obviously
//! correct.

use crate::models::TimeInterval;

/// Sum of interval durations after clipping each interval to `window`.
///
/// Intervals fully outside the window contribute zero; intervals straddling
/// a boundary contribute only their in-window portion.
pub fn clipped_duration(intervals: &[TimeInterval], window: &TimeInterval) -> qtty::Seconds {
    let total = intervals
        .iter()
        .map(|interval| clipped_len(interval, window))
        .sum();
    qtty::Seconds::new(total)
}

/// Clipped length of a single interval against a window, in seconds.
fn clipped_len(interval: &TimeInterval, window: &TimeInterval) -> f64 {
    let start = interval.start.value().max(window.start.value());
    let end = interval.end.value().min(window.end.value());
    (end - start).max(0.0)
}

/// Sum over every pair `(a, b)` of the length of `a ∩ b ∩ window`.
pub fn overlap_duration(
    a: &[TimeInterval],
    b: &[TimeInterval],
    window: &TimeInterval,
) -> qtty::Seconds {
    let mut total = 0.0;

    for left in a {
        for right in b {
            let start = left
                .start
                .value()
                .max(right.start.value())
                .max(window.start.value());
            let end = left
                .end
                .value()
                .min(right.end.value())
                .min(window.end.value());
            total += (end - start).max(0.0);
        }
    }

    qtty::Seconds::new(total)
}

/// Union of several interval lists.
///
/// Flattens the lists, sorts by start, then merges any interval whose start
/// is at or before the running merge's end. Touching intervals coalesce; a
/// gap leaves them separate.
pub fn union(lists: &[&[TimeInterval]]) -> Vec<TimeInterval> {
    let mut flattened: Vec<TimeInterval> = lists
        .iter()
        .flat_map(|list| list.iter().copied())
        .collect();

    if flattened.is_empty() {
        return vec![];
    }

    flattened.sort_by(|a, b| {
        a.start
            .value()
            .partial_cmp(&b.start.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(flattened.len());
    let mut current = flattened[0];

    for interval in flattened.into_iter().skip(1) {
        if interval.start.value() <= current.end.value() {
            if interval.end.value() > current.end.value() {
                current.end = interval.end;
            }
        } else {
            merged.push(current);
            current = interval;
        }
    }
    merged.push(current);

    merged
}

/// Merge intervals separated by gaps of at most `tolerance` seconds.
///
/// Like [`union`] with slack: a gap no wider than the tolerance joins its
/// neighbours into one span. Used for event-derived intervals where brief
/// reconnections should not split a single outage.
pub fn merge_with_tolerance(intervals: &[TimeInterval], tolerance: f64) -> Vec<TimeInterval> {
    if intervals.is_empty() {
        return vec![];
    }

    let mut sorted = intervals.to_vec();
    sorted.sort_by(|a, b| {
        a.start
            .value()
            .partial_cmp(&b.start.value())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut merged: Vec<TimeInterval> = Vec::with_capacity(sorted.len());
    let mut current = sorted[0];

    for interval in sorted.into_iter().skip(1) {
        if interval.start.value() - current.end.value() <= tolerance {
            if interval.end.value() > current.end.value() {
                current.end = interval.end;
            }
        } else {
            merged.push(current);
            current = interval;
        }
    }
    merged.push(current);

    merged
}
