use mjd_core::{ensure, errors::Result, Real, Size, Time};

/// Evenly spaced time points `0 = t_0 < t_1 < … < t_n = T`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeGrid {
    times: Vec<Time>,
}

impl TimeGrid {
    /// Create a uniform grid from 0 to `end` with `steps` intervals.
    ///
    /// The last point is exactly `end`.
    pub fn uniform(end: Time, steps: Size) -> Result<Self> {
        ensure!(
            end.is_finite() && end > 0.0,
            "time grid end must be positive and finite, got {end}"
        );
        ensure!(steps > 0, "time grid needs at least one step");
        let mut times: Vec<Time> = (0..=steps)
            .map(|i| end * i as Real / steps as Real)
            .collect();
        // i / steps can round below 1 for the last point.
        times[steps] = end;
        Ok(Self { times })
    }

    /// Number of time points (= steps + 1).
    pub fn size(&self) -> Size {
        self.times.len()
    }

    /// Number of intervals.
    pub fn steps(&self) -> Size {
        self.times.len() - 1
    }

    /// Time of the `i`-th point.
    pub fn time(&self, i: Size) -> Time {
        self.times[i]
    }

    /// Uniform step length.
    pub fn dt(&self) -> Time {
        self.end() / self.steps() as Real
    }

    /// Last time point.
    pub fn end(&self) -> Time {
        self.times[self.times.len() - 1]
    }

    /// All time points.
    pub fn times(&self) -> &[Time] {
        &self.times
    }
}
