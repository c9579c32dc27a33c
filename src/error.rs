//! Engine error types.
//!
//! Every fallible engine operation returns `Result<_, EngineError>`. The
//! variants fall into two kinds, reported by [`EngineError::kind`]:
//!
//! - [`ErrorKind::Config`] — the caller supplied invalid parameters
//!   (a sample larger than its population, a confidence level outside
//!   (0, 1), a table edit that would drop below 2×2, ...). These are
//!   caller bugs or rejected user edits.
//! - [`ErrorKind::Data`] — the parameters are valid but the requested
//!   statistic is mathematically undefined for the data (zero variance
//!   under a correlation, a zero expected cell under chi-square, too few
//!   observations for a significance test). These are surfaced to the
//!   caller rather than silently coerced to NaN or 0.

use std::fmt;

/// Broad classification of an [`EngineError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid caller-supplied configuration.
    Config,
    /// Operation mathematically undefined for otherwise-valid input.
    Data,
}

/// Error returned by engine operations.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    /// Population size below the minimum of 2.
    InvalidPopulationSize { size: usize },
    /// Domain bounds are not finite or `min >= max`.
    InvalidDomain { min: f64, max: f64 },
    /// Target standard deviation is negative or not finite.
    InvalidStdDev { std_dev: f64 },
    /// Skew parameter is not finite.
    InvalidSkew { skew: f64 },
    /// Target mean is not finite or lies outside the domain.
    InvalidTargetMean { mean: f64 },
    /// Sample size outside `2..=population_size`.
    SampleSizeOutOfRange {
        sample_size: usize,
        population_size: usize,
    },
    /// Requested number of draws is zero.
    InvalidDrawCount,
    /// Confidence level outside the open interval (0, 1).
    InvalidConfidenceLevel { level: f64 },
    /// A table cell count is negative or not finite.
    NegativeCell { row: usize, col: usize },
    /// A table construction or edit would leave fewer than 2 rows or
    /// 2 columns, making the independence test degenerate.
    TableTooSmall { rows: usize, cols: usize },
    /// A category label is already present in the table.
    DuplicateCategory { label: String },
    /// A category label was not found in the table.
    UnknownCategory { label: String },
    /// A supplied row or column has the wrong number of cells.
    LengthMismatch { expected: usize, actual: usize },
    /// A supplied coordinate is NaN or infinite.
    NonFiniteValue { index: usize },
    /// An expected cell count of zero makes the chi-square statistic
    /// undefined.
    ZeroExpectedCell { row: usize, col: usize },
    /// A variable has zero variance where nonzero variance is required.
    ZeroVariance { variable: &'static str },
    /// Too few observations for the requested statistic.
    TooFewObservations { min_required: usize, actual: usize },
}

impl EngineError {
    /// Returns whether this is a configuration or a data error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidPopulationSize { .. }
            | EngineError::InvalidDomain { .. }
            | EngineError::InvalidStdDev { .. }
            | EngineError::InvalidSkew { .. }
            | EngineError::InvalidTargetMean { .. }
            | EngineError::SampleSizeOutOfRange { .. }
            | EngineError::InvalidDrawCount
            | EngineError::InvalidConfidenceLevel { .. }
            | EngineError::NegativeCell { .. }
            | EngineError::TableTooSmall { .. }
            | EngineError::DuplicateCategory { .. }
            | EngineError::UnknownCategory { .. }
            | EngineError::LengthMismatch { .. }
            | EngineError::NonFiniteValue { .. } => ErrorKind::Config,
            EngineError::ZeroExpectedCell { .. }
            | EngineError::ZeroVariance { .. }
            | EngineError::TooFewObservations { .. } => ErrorKind::Data,
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::InvalidPopulationSize { size } => {
                write!(f, "population size must be at least 2, got {size}")
            }
            EngineError::InvalidDomain { min, max } => {
                write!(f, "domain requires finite min < max, got [{min}, {max}]")
            }
            EngineError::InvalidStdDev { std_dev } => {
                write!(f, "standard deviation must be finite and >= 0, got {std_dev}")
            }
            EngineError::InvalidSkew { skew } => {
                write!(f, "skew must be finite, got {skew}")
            }
            EngineError::InvalidTargetMean { mean } => {
                write!(f, "target mean must be finite and inside the domain, got {mean}")
            }
            EngineError::SampleSizeOutOfRange {
                sample_size,
                population_size,
            } => write!(
                f,
                "sample size must be in 2..={population_size}, got {sample_size}"
            ),
            EngineError::InvalidDrawCount => {
                write!(f, "number of draws must be at least 1")
            }
            EngineError::InvalidConfidenceLevel { level } => {
                write!(f, "confidence level must lie in (0, 1), got {level}")
            }
            EngineError::NegativeCell { row, col } => {
                write!(f, "cell ({row}, {col}) must be a finite non-negative count")
            }
            EngineError::TableTooSmall { rows, cols } => {
                write!(f, "table must keep at least 2 rows and 2 columns, would be {rows}x{cols}")
            }
            EngineError::DuplicateCategory { label } => {
                write!(f, "category {label:?} is already present")
            }
            EngineError::UnknownCategory { label } => {
                write!(f, "category {label:?} not found")
            }
            EngineError::LengthMismatch { expected, actual } => {
                write!(f, "expected {expected} cells, got {actual}")
            }
            EngineError::NonFiniteValue { index } => {
                write!(f, "value at index {index} must be finite")
            }
            EngineError::ZeroExpectedCell { row, col } => {
                write!(
                    f,
                    "expected count at ({row}, {col}) is zero; chi-square is undefined"
                )
            }
            EngineError::ZeroVariance { variable } => {
                write!(f, "{variable} has zero variance")
            }
            EngineError::TooFewObservations {
                min_required,
                actual,
            } => write!(
                f,
                "need at least {min_required} observations, got {actual}"
            ),
        }
    }
}

impl std::error::Error for EngineError {}
