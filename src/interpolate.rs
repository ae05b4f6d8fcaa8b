//! Integer piecewise-linear interpolation.

/// Piecewise-linear interpolator over integer samples.
///
/// Slopes are precomputed with floor division, and a zero-width interval is
/// treated as having width 1, so its "slope" is the raw value difference.
/// Both conventions come from the band firmware's own fixed-point encoding
/// and are preserved exactly; downstream consumers depend on the numbers.
#[derive(Debug)]
pub struct Interpolator<'a> {
    xs: &'a [i64],
    ys: &'a [i64],
    slopes: Vec<i64>,
}

impl<'a> Interpolator<'a> {
    /// Build an interpolator over equal-length samples ascending by `xs`.
    ///
    /// Returns `None` for fewer than two samples or mismatched lengths;
    /// callers handle those degenerate cases with flat fallbacks instead.
    pub fn new(xs: &'a [i64], ys: &'a [i64]) -> Option<Self> {
        if xs.len() != ys.len() || xs.len() < 2 {
            return None;
        }
        let slopes = xs
            .windows(2)
            .zip(ys.windows(2))
            .map(|(x, y)| (y[1] - y[0]).div_euclid((x[1] - x[0]).max(1)))
            .collect();
        Some(Self { xs, ys, slopes })
    }

    /// Value at `x`, flat-extrapolated outside the sample range.
    ///
    /// Queries at a sample point return that sample's value exactly.
    pub fn value_at(&self, x: i64) -> i64 {
        let upper = self.xs.partition_point(|&sample| sample <= x);
        if upper == 0 {
            return self.ys[0];
        }
        let i = upper - 1;
        if i >= self.slopes.len() {
            return self.ys[self.ys.len() - 1];
        }
        self.ys[i] + self.slopes[i] * (x - self.xs[i])
    }
}
