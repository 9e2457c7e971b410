//! Random partition of a total into capped, non-negative increments.

use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use wsim_utils::numbers::round3;

/// Below this, a remaining excess or residual counts as zero.
pub const TOLERANCE: f64 = 1e-6;

/// Non-fatal conditions met while partitioning a total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PartitionAdvisory {
    /// `max_per_item * n < total`: values were clamped and do not add up to the total.
    Infeasible {
        total: f64,
        n: usize,
        max_per_item: f64,
    },
    /// The final correction found no item able to absorb the residual.
    PartialPrecisionLoss { residual: f64 },
}

/// Values produced by [`distribute`], plus any advisory raised on the way.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub values: Vec<f64>,
    pub advisory: Option<PartitionAdvisory>,
}

impl Partition {
    pub fn sum(&self) -> f64 {
        self.values.iter().sum()
    }

    fn with_advisory(values: Vec<f64>, advisory: PartitionAdvisory) -> Self {
        warn!("{:?}", advisory);
        Partition {
            values,
            advisory: Some(advisory),
        }
    }
}

/// Split `total` into `n` random non-negative values, each at most
/// `max_per_item`, summing to `total` within [`TOLERANCE`].
///
/// Values are rounded to 3 decimal places, so the sum is exact only for
/// totals given with at most 3 decimals. Any finer remainder comes back as
/// [`PartitionAdvisory::PartialPrecisionLoss`]. A non-positive cap is
/// ignored and the total is split evenly.
pub fn distribute<R: Rng + ?Sized>(
    total: f64,
    n: usize,
    max_per_item: f64,
    rng: &mut R,
) -> Partition {
    if n == 0 {
        return Partition::default();
    }
    let count = n as f64;

    if max_per_item <= 0.0 {
        return Partition {
            values: vec![total / count; n],
            advisory: None,
        };
    }

    if max_per_item * count < total {
        let value = (total / count).min(max_per_item);
        return Partition::with_advisory(
            vec![value; n],
            PartitionAdvisory::Infeasible {
                total,
                n,
                max_per_item,
            },
        );
    }

    let weights: Vec<f64> = (0..n).map(|_| rng.gen::<f64>()).collect();
    let weight_sum: f64 = weights.iter().sum();
    let mut values: Vec<f64> = if weight_sum > 0.0 {
        weights.iter().map(|w| w / weight_sum * total).collect()
    } else {
        vec![total / count; n]
    };

    let mut excess = 0.0;
    for value in values.iter_mut() {
        if *value > max_per_item {
            excess += *value - max_per_item;
            *value = max_per_item;
        }
    }

    let mut below_max: Vec<usize> = (0..n).filter(|&i| values[i] < max_per_item).collect();
    let mut passes = 0;
    while excess > TOLERANCE && !below_max.is_empty() {
        passes += 1;
        let share = excess / below_max.len() as f64;
        let mut remaining = 0.0;
        let mut still_below = Vec::with_capacity(below_max.len());
        for &i in &below_max {
            let added = share.min(max_per_item - values[i]);
            values[i] += added;
            remaining += share - added;
            if values[i] < max_per_item {
                still_below.push(i);
            }
        }
        excess = remaining;
        below_max = still_below;
    }
    debug!("Redistributed excess in {} passes, {:e} left", passes, excess);

    // once on the raw values, then again after rounding; whatever the
    // rounded pass cannot place is what the caller loses
    absorb_residual(&mut values, total, max_per_item, |v| v);
    let mut values: Vec<f64> = values.into_iter().map(round3).collect();
    let unresolved = absorb_residual(&mut values, total, max_per_item, round3);

    match unresolved {
        Some(residual) => Partition::with_advisory(
            values,
            PartitionAdvisory::PartialPrecisionLoss { residual },
        ),
        None => Partition {
            values,
            advisory: None,
        },
    }
}

/// Move `total - sum(values)` onto the first value that stays inside
/// `[0, max_per_item]`. Returns the residual left over when no value can
/// take it, or when `finish` rounds part of it away.
fn absorb_residual(
    values: &mut [f64],
    total: f64,
    max_per_item: f64,
    finish: fn(f64) -> f64,
) -> Option<f64> {
    let residual = leftover(values, total)?;
    let bounds = 0.0..=max_per_item;
    match values
        .iter()
        .position(|v| bounds.contains(&finish(v + residual)))
    {
        Some(i) => {
            values[i] = finish(values[i] + residual);
            leftover(values, total)
        }
        None => Some(residual),
    }
}

fn leftover(values: &[f64], total: f64) -> Option<f64> {
    let residual = total - values.iter().sum::<f64>();
    (residual.abs() > TOLERANCE).then_some(residual)
}
