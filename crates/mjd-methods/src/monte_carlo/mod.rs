//! Monte Carlo simulation framework.
//!
//! # Overview
//!
//! * [`PathGenerator`]: draws a [`PathSet`] of a jump-diffusion process
//! * [`PathSet`] / [`Path`]: simulated trajectories on a shared time grid
//! * [`PathPricer`]: trait for evaluating payoffs on a path
//! * [`mc_european_price`]: discounted-payoff estimator with standard error

use crate::time_grid::TimeGrid;
use mjd_core::{ensure, errors::Result, fail, Price, Rate, Real, Size, Time};
use mjd_instruments::ContractTerms;
use mjd_math::{SimulationRng, Statistics};
use mjd_processes::{MertonJumpDiffusionProcess, ModelParameters};

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A borrowed view of one simulated trajectory.
#[derive(Debug, Clone, Copy)]
pub struct Path<'a> {
    times: &'a [Time],
    values: &'a [Price],
}

impl<'a> Path<'a> {
    /// Time points (including t = 0).
    pub fn times(&self) -> &'a [Time] {
        self.times
    }

    /// Process values at each time point.
    pub fn values(&self) -> &'a [Price] {
        self.values
    }

    /// The initial value.
    pub fn front(&self) -> Price {
        self.values[0]
    }

    /// The terminal value.
    pub fn back(&self) -> Price {
        self.values[self.values.len() - 1]
    }

    /// Number of points (steps + 1).
    pub fn len(&self) -> Size {
        self.values.len()
    }

    /// `true` if the path holds no samples.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ─── PathSet ──────────────────────────────────────────────────────────────────

/// `n_paths` trajectories of `n_steps + 1` samples on one uniform grid.
///
/// Stored path-major in a single buffer. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathSet {
    grid: TimeGrid,
    n_paths: Size,
    values: Vec<Price>,
}

impl PathSet {
    /// Build a path set from externally produced trajectories.
    ///
    /// Each row must have one value per grid point.
    pub fn from_paths(grid: TimeGrid, paths: Vec<Vec<Price>>) -> Result<Self> {
        let width = grid.size();
        let n_paths = paths.len();
        let mut values = Vec::with_capacity(n_paths * width);
        for (i, row) in paths.into_iter().enumerate() {
            ensure!(
                row.len() == width,
                "path {i} has {} samples, grid has {width} points",
                row.len()
            );
            values.extend(row);
        }
        Ok(Self {
            grid,
            n_paths,
            values,
        })
    }

    /// The shared time grid (`n_steps + 1` evenly spaced points).
    pub fn time_grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Number of trajectories.
    pub fn n_paths(&self) -> Size {
        self.n_paths
    }

    /// Number of time steps per trajectory.
    pub fn n_steps(&self) -> Size {
        self.grid.steps()
    }

    /// Simulation horizon `T`.
    pub fn maturity(&self) -> Time {
        self.grid.end()
    }

    /// `true` if the set holds no trajectories.
    pub fn is_empty(&self) -> bool {
        self.n_paths == 0
    }

    /// The `i`-th trajectory, if any.
    pub fn path(&self, i: Size) -> Option<Path<'_>> {
        let width = self.grid.size();
        self.values.get(i * width..(i + 1) * width).map(|values| Path {
            times: self.grid.times(),
            values,
        })
    }

    /// Iterator over all trajectories.
    pub fn paths(&self) -> impl Iterator<Item = Path<'_>> + '_ {
        let times = self.grid.times();
        self.values
            .chunks_exact(self.grid.size())
            .map(move |values| Path { times, values })
    }

    /// Last sample of every trajectory.
    pub fn terminal_values(&self) -> Vec<Price> {
        self.paths().map(|p| p.back()).collect()
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates path sets of a Merton jump-diffusion process.
///
/// Random numbers are consumed time step by time step; within a step each
/// path draws its Gaussian shock, then its jump count, then one normal per
/// jump. With a fixed seed the output is bit-identical across runs.
pub struct PathGenerator {
    process: MertonJumpDiffusionProcess,
    grid: TimeGrid,
    rng: SimulationRng,
}

impl PathGenerator {
    /// Create a generator over `grid`, seeded with `seed` (`None` seeds
    /// from OS entropy).
    pub fn new(process: MertonJumpDiffusionProcess, grid: TimeGrid, seed: Option<u64>) -> Self {
        Self {
            process,
            grid,
            rng: SimulationRng::new(seed),
        }
    }

    /// Simulate `n_paths` trajectories.
    pub fn generate(&mut self, n_paths: Size) -> Result<PathSet> {
        ensure!(n_paths > 0, "number of paths must be positive");
        let width = self.grid.size();
        let dt = self.grid.dt();
        let sampler = self.process.jump_count_sampler(dt)?;

        let mut values = vec![0.0; n_paths * width];
        let s0 = self.process.initial_value();
        for p in 0..n_paths {
            values[p * width] = s0;
        }
        for step in 1..width {
            for p in 0..n_paths {
                let prev = values[p * width + step - 1];
                values[p * width + step] = self.process.step(prev, dt, &sampler, &mut self.rng);
            }
        }

        Ok(PathSet {
            grid: self.grid.clone(),
            n_paths,
            values,
        })
    }
}

/// Simulate `n_paths` Merton trajectories from `s0` over `[0, maturity]`
/// with `n_steps` equal steps.
pub fn simulate_paths(
    params: &ModelParameters,
    s0: Price,
    rate: Rate,
    maturity: Time,
    n_steps: Size,
    n_paths: Size,
    seed: Option<u64>,
) -> Result<PathSet> {
    ensure!(n_paths > 0, "number of paths must be positive");
    let process = MertonJumpDiffusionProcess::new(s0, rate, *params)?;
    let grid = TimeGrid::uniform(maturity, n_steps)?;
    tracing::debug!(n_paths, n_steps, maturity, ?seed, "simulating Merton paths");
    let paths = PathGenerator::new(process, grid, seed).generate(n_paths)?;
    tracing::debug!(n_paths, "path simulation finished");
    Ok(paths)
}

// ─── PathPricer ───────────────────────────────────────────────────────────────

/// A trait for computing the discounted payoff from a sample path.
pub trait PathPricer {
    /// Evaluate the discounted payoff for a given path.
    fn value(&self, path: &Path<'_>) -> Real;
}

/// European pricer: `payoff(S_T)·exp(−rT)`.
#[derive(Debug, Clone)]
pub struct EuropeanPathPricer {
    terms: ContractTerms,
    discount: Real,
}

impl EuropeanPathPricer {
    /// Create a European pricer for validated contract terms.
    pub fn new(terms: ContractTerms) -> Result<Self> {
        terms.validate()?;
        Ok(Self {
            discount: terms.discount(),
            terms,
        })
    }
}

impl PathPricer for EuropeanPathPricer {
    fn value(&self, path: &Path<'_>) -> Real {
        self.terms.payoff().value(path.back()) * self.discount
    }
}

// ─── Estimator ────────────────────────────────────────────────────────────────

/// A Monte Carlo price with its standard error.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonteCarloEstimate {
    /// Sample mean of the discounted payoffs.
    pub price: Price,
    /// Standard error of the mean; NaN for a single path.
    pub std_error: Real,
    /// Number of paths used.
    pub samples: Size,
}

/// Monte Carlo price of a European option from simulated paths.
///
/// The path set must be non-empty and span exactly the contract's maturity.
pub fn mc_european_price(paths: &PathSet, terms: &ContractTerms) -> Result<MonteCarloEstimate> {
    terms.validate()?;
    ensure!(!paths.is_empty(), "cannot price from an empty path set");
    let tolerance = 1e-12 * terms.maturity.max(1.0);
    ensure!(
        (paths.maturity() - terms.maturity).abs() <= tolerance,
        "path set spans {} years but the contract matures in {}",
        paths.maturity(),
        terms.maturity
    );

    let pricer = EuropeanPathPricer::new(*terms)?;
    let mut stats = Statistics::new();
    stats.extend(paths.paths().map(|p| pricer.value(&p)));

    let Some(price) = stats.mean() else {
        fail!("no payoff samples accumulated");
    };
    let estimate = MonteCarloEstimate {
        price,
        std_error: stats.error_estimate().unwrap_or(Real::NAN),
        samples: stats.samples(),
    };
    tracing::debug!(
        price = estimate.price,
        std_error = estimate.std_error,
        samples = estimate.samples,
        "Monte Carlo estimate"
    );
    Ok(estimate)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
