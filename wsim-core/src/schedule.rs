//! Sampling intervals for a timed pumping test.

use log::debug;

/// Opening readings of a test: three 1-minute, three 5-minute and four
/// 10-minute intervals, 58 minutes in all.
pub const OPENING_INTERVALS: [u32; 10] = [1, 1, 1, 5, 5, 5, 10, 10, 10, 10];

/// Interval between readings until the stabilization time.
pub const STABILIZATION_INTERVAL: u32 = 15;

/// Interval between readings after the stabilization time.
pub const HOURLY_INTERVAL: u32 = 60;

/// Minute durations between consecutive readings of a test lasting
/// `total_hours`, fine-grained at the start and coarser later on.
///
/// The durations add up to `total_hours * 60` whenever the test lasts at
/// least one hour and stabilizes before it ends. Shorter tests still get all
/// the opening intervals, and a late stabilization time stretches the test
/// to it.
pub fn schedule(stabilization_minutes: u32, total_hours: u32) -> Vec<u32> {
    let mut intervals = OPENING_INTERVALS.to_vec();
    let mut elapsed: u32 = intervals.iter().sum();

    elapsed = extend_until(
        &mut intervals,
        elapsed,
        stabilization_minutes,
        STABILIZATION_INTERVAL,
    );
    let total_minutes = total_hours.saturating_mul(60);
    elapsed = extend_until(&mut intervals, elapsed, total_minutes, HOURLY_INTERVAL);

    debug!(
        "Scheduled {} readings over {} minutes (stabilization at {})",
        intervals.len(),
        elapsed,
        stabilization_minutes
    );
    intervals
}

/// Append `step`-minute intervals until `elapsed` reaches `limit`, cutting
/// the last one short so it lands on `limit` exactly.
fn extend_until(intervals: &mut Vec<u32>, mut elapsed: u32, limit: u32, step: u32) -> u32 {
    while elapsed < limit {
        let interval = step.min(limit - elapsed);
        intervals.push(interval);
        elapsed += interval;
    }
    elapsed
}
