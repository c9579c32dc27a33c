//! # statlab
//!
//! Statistical simulation and inference engine for interactive statistics
//! lessons.
//!
//! The crate synthesizes finite populations with exact target parameters,
//! draws repeated random samples from them, builds confidence intervals
//! and tracks their empirical coverage, and computes the inferential
//! statistics the lessons teach: chi-square independence, Pearson
//! correlation with significance, ordinary-least-squares regression, and
//! descriptive quantiles with outlier detection. It knows nothing about
//! rendering — every result is a plain record a chart layer can consume.
//!
//! ## Modules
//!
//! - [`random`] — seeded RNG, Box-Muller deviates, sampling without replacement
//! - [`special`] — Normal, Student-t, and chi-square CDFs and quantiles
//! - [`describe`] — mean/variance, median, quantiles, mode, IQR outliers
//! - [`population`] — exact-mean population synthesis (with skew)
//! - [`simulate`] — steppable sampling simulator with coverage tracking
//! - [`crosstab`] — contingency tables and the chi-square independence test
//! - [`regress`] — Pearson correlation, OLS regression, manual-fit scoring
//! - [`error`] — tagged configuration/data errors
//!
//! ## Design notes
//!
//! - **Caller-owned randomness**: every stochastic operation takes
//!   `&mut impl Rng`; seed with [`random::create_rng`] for reproducible
//!   runs.
//! - **Caller-owned time**: the simulator exposes an atomic
//!   [`advance`](simulate::Simulator::advance) step and never schedules
//!   itself; a UI timer or a tight test loop decides the cadence.
//! - **No silent NaN**: statistics that are mathematically undefined for
//!   the given data return a tagged [`error::EngineError`] instead.
//!
//! ## Quick start
//!
//! ```
//! use statlab::population::{synthesize, PopulationConfig};
//! use statlab::random::create_rng;
//! use statlab::simulate::{Simulator, SimulatorConfig};
//!
//! let mut rng = create_rng(42);
//! let population = synthesize(&PopulationConfig::default(), &mut rng).unwrap();
//!
//! let mut sim = Simulator::new(population, SimulatorConfig::default()).unwrap();
//! sim.start();
//! sim.run_to_completion(&mut rng);
//!
//! // Most 95% intervals cover the true mean.
//! assert!(sim.run().coverage().unwrap() > 0.8);
//! ```

pub mod crosstab;
pub mod describe;
pub mod error;
pub mod population;
pub mod random;
pub mod regress;
pub mod simulate;
pub mod special;
