//! Running statistics accumulator.

use mjd_core::Real;

/// Incremental mean/variance accumulator (Welford's update).
///
/// Used to reduce discounted Monte Carlo payoffs to a price and its
/// standard error without storing the samples.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    mean: Real,
    m2: Real,
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean. Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (Bessel-corrected) variance. Returns `None` for fewer than
    /// 2 samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count >= 2).then(|| self.m2 / (self.count as Real - 1.0))
    }

    /// Standard deviation. Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `σ / √n`. Returns `None` for fewer than
    /// 2 samples.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}
