//! Noisy monotonic progressions between two readings.

use rand::Rng;

/// Amplitude of the reading noise added to each intermediate step.
pub const NOISE: f64 = 0.01;

/// `n` values walking from `start` to `end` in random-sized steps, each
/// intermediate value perturbed by up to [`NOISE`].
///
/// The first value is `start` and the last is exactly `end`. With `n <= 1`
/// only `[end]` is returned.
pub fn progress<R: Rng + ?Sized>(n: usize, start: f64, end: f64, rng: &mut R) -> Vec<f64> {
    if n <= 1 {
        return vec![end];
    }

    let (distance, sign) = if start > end {
        (start - end, -1.0)
    } else {
        (end - start, 1.0)
    };

    // strictly positive weights so every step moves towards `end`
    let weights: Vec<f64> = (0..n - 1).map(|_| rng.gen_range(f64::EPSILON..1.0)).collect();
    let weight_sum: f64 = weights.iter().sum();

    let mut values = Vec::with_capacity(n);
    values.push(start);
    let mut current = start;
    for weight in weights {
        let step = weight / weight_sum * distance * sign;
        let noise = rng.gen_range(-NOISE..=NOISE);
        current += step + noise;
        values.push(current);
    }

    if let Some(last) = values.last_mut() {
        *last = end;
    }
    values
}
