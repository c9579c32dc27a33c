//! Repeated-sampling simulation.
//!
//! The stateful, steppable heart of the engine: draw samples without
//! replacement from a [`Population`](crate::population::Population),
//! compute per-sample statistics and confidence intervals, and accumulate
//! run-level coverage.
//!
//! # Stepping model
//!
//! The simulator owns no timing. [`Simulator::advance`] is a synchronous,
//! atomic state transition invoked once per tick by whatever scheduler the
//! caller prefers — a UI timer for animation, or a tight loop
//! ([`Simulator::run_to_completion`]) for batch and test use. Cancellation
//! happens at tick boundaries and preserves everything recorded so far;
//! restarting clears the run and begins a fresh sequence against the same
//! population.
//!
//! # Example
//!
//! ```
//! use statlab::population::{synthesize, PopulationConfig};
//! use statlab::random::create_rng;
//! use statlab::simulate::{Simulator, SimulatorConfig};
//!
//! let mut rng = create_rng(42);
//! let pop = synthesize(&PopulationConfig::default(), &mut rng).unwrap();
//! let mut sim = Simulator::new(pop, SimulatorConfig::default()).unwrap();
//!
//! sim.start();
//! sim.run_to_completion(&mut rng);
//!
//! let run = sim.run();
//! assert_eq!(run.len(), 100);
//! let coverage = run.coverage().unwrap();
//! assert!(coverage > 0.8 && coverage <= 1.0);
//! ```

use crate::error::EngineError;
use crate::population::Population;
use crate::random::sample_without_replacement;
use crate::special::t_quantile;
use rand::Rng;

/// What each draw records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SamplingMode {
    /// Full records: sample statistics plus a t confidence interval.
    ConfidenceIntervals,
    /// Sample means only — the mode used to demonstrate the sampling
    /// distribution of the mean empirically.
    MeansOnly,
}

/// Simulation parameters, validated by [`Simulator::new`].
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatorConfig {
    /// Observations per sample; `2..=population size`.
    pub sample_size: usize,
    /// Number of draws before the run completes.
    pub draws: usize,
    /// Confidence level in (0, 1); used in interval mode.
    pub confidence: f64,
    pub mode: SamplingMode,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            sample_size: 25,
            draws: 100,
            confidence: 0.95,
            mode: SamplingMode::ConfidenceIntervals,
        }
    }
}

/// One drawn sample: distinct population indices plus derived statistics.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Distinct indices into the population, in draw order.
    pub indices: Vec<usize>,
    /// Sample mean x̄.
    pub mean: f64,
    /// Bessel-corrected sample standard deviation.
    pub std_dev: f64,
    /// Standard error s/√n.
    pub std_error: f64,
}

/// A two-sided t confidence interval around one sample mean.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
    /// Whether the population's true mean lies inside `[lower, upper]`.
    pub contains_true_mean: bool,
}

/// One simulation step's output.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawRecord {
    pub sample: Sample,
    /// `None` in [`SamplingMode::MeansOnly`].
    pub interval: Option<ConfidenceInterval>,
}

/// Append-only record of a simulation's draws and running coverage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimulationRun {
    records: Vec<DrawRecord>,
    covered: usize,
}

impl SimulationRun {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[DrawRecord] {
        &self.records
    }

    /// Fraction of recorded intervals containing the true mean, or `None`
    /// if no intervals have been recorded yet.
    pub fn coverage(&self) -> Option<f64> {
        let intervals = self
            .records
            .iter()
            .filter(|r| r.interval.is_some())
            .count();
        if intervals == 0 {
            None
        } else {
            Some(self.covered as f64 / intervals as f64)
        }
    }

    /// The sample means in draw order (the empirical sampling
    /// distribution of the mean).
    pub fn means(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.sample.mean).collect()
    }

    fn clear(&mut self) {
        self.records.clear();
        self.covered = 0;
    }
}

/// Simulator lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SimulatorState {
    /// No active run; `advance` is a no-op.
    Idle,
    /// Draws in progress.
    Running,
}

/// Steppable sampling simulator.
///
/// Owns its population and its [`SimulationRun`]; both are plain values
/// readable at any tick boundary.
#[derive(Debug, Clone)]
pub struct Simulator {
    population: Population,
    config: SimulatorConfig,
    /// Two-tailed t critical value; fixed by (confidence, sample size),
    /// so computed once instead of per draw. `None` in means-only mode.
    critical_value: Option<f64>,
    run: SimulationRun,
    state: SimulatorState,
}

impl Simulator {
    /// Validates the configuration against the population and builds an
    /// idle simulator.
    ///
    /// # Errors
    /// Configuration errors for a sample size outside
    /// `2..=population size`, zero draws, or (in interval mode) a
    /// confidence level outside (0, 1).
    pub fn new(population: Population, config: SimulatorConfig) -> Result<Self, EngineError> {
        if config.sample_size < 2 || config.sample_size > population.len() {
            return Err(EngineError::SampleSizeOutOfRange {
                sample_size: config.sample_size,
                population_size: population.len(),
            });
        }
        if config.draws == 0 {
            return Err(EngineError::InvalidDrawCount);
        }

        let critical_value = match config.mode {
            SamplingMode::MeansOnly => None,
            SamplingMode::ConfidenceIntervals => {
                if !(config.confidence > 0.0 && config.confidence < 1.0) {
                    return Err(EngineError::InvalidConfidenceLevel {
                        level: config.confidence,
                    });
                }
                let df = (config.sample_size - 1) as f64;
                let upper_tail = (1.0 + config.confidence) / 2.0;
                Some(t_quantile(upper_tail, df))
            }
        };

        Ok(Self {
            population,
            config,
            critical_value,
            run: SimulationRun::default(),
            state: SimulatorState::Idle,
        })
    }

    pub fn state(&self) -> SimulatorState {
        self.state
    }

    pub fn config(&self) -> &SimulatorConfig {
        &self.config
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn run(&self) -> &SimulationRun {
        &self.run
    }

    /// Whether all configured draws have been recorded.
    pub fn is_complete(&self) -> bool {
        self.run.len() >= self.config.draws
    }

    /// The theoretical standard error of the sample mean, `σ/√n` with the
    /// population-convention σ. Consumers compare the empirical spread of
    /// recorded means against this.
    pub fn theoretical_std_error(&self) -> f64 {
        self.population.std_dev() / (self.config.sample_size as f64).sqrt()
    }

    /// Clears any previous run and enters `Running`.
    pub fn start(&mut self) {
        self.run.clear();
        self.state = SimulatorState::Running;
    }

    /// Stops at the current tick boundary, preserving the run so far.
    pub fn cancel(&mut self) {
        self.state = SimulatorState::Idle;
    }

    /// Performs one draw: sample without replacement, compute statistics,
    /// build the interval (in interval mode), append to the run.
    ///
    /// Returns `true` if a draw was recorded; `false` when idle. After
    /// the final draw the simulator transitions back to `Idle`.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> bool {
        if self.state != SimulatorState::Running {
            return false;
        }

        let n = self.config.sample_size;
        let indices = sample_without_replacement(n, self.population.len(), rng);
        let values: Vec<f64> = indices.iter().map(|&i| self.population.value(i)).collect();

        let nf = n as f64;
        let mean = values.iter().sum::<f64>() / nf;
        let ss: f64 = values.iter().map(|&v| (v - mean) * (v - mean)).sum();
        let std_dev = (ss / (nf - 1.0)).sqrt();
        let std_error = std_dev / nf.sqrt();

        let interval = self.critical_value.map(|t_star| {
            let margin = t_star * std_error;
            let lower = mean - margin;
            let upper = mean + margin;
            let true_mean = self.population.mean();
            ConfidenceInterval {
                mean,
                lower,
                upper,
                contains_true_mean: lower <= true_mean && true_mean <= upper,
            }
        });

        if matches!(interval, Some(ci) if ci.contains_true_mean) {
            self.run.covered += 1;
        }

        self.run.records.push(DrawRecord {
            sample: Sample {
                indices,
                mean,
                std_dev,
                std_error,
            },
            interval,
        });

        if self.is_complete() {
            self.state = SimulatorState::Idle;
        }
        true
    }

    /// Drives `advance` until the run completes. For batch and test use;
    /// interactive callers tick `advance` themselves.
    pub fn run_to_completion<R: Rng>(&mut self, rng: &mut R) {
        while self.advance(rng) {}
    }
}

// ============================================================================
// Tests
// ============================================================================
