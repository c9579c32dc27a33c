//! Correlation and regression over paired observations.
//!
//! Takes a [`PointSeries`] of (x, y) pairs — hand-entered by a learner or
//! produced elsewhere — and computes Pearson correlation with a
//! significance test, the ordinary-least-squares line, and the
//! sum-of-squares comparison behind the "trace your own regression line"
//! exercise.
//!
//! Undefined statistics surface as data errors instead of silent NaN:
//! zero variance in either variable makes r undefined, and fewer than two
//! points make the line undefined. Everything is recomputed in full from
//! the current points; results for an unchanged series are identical
//! between calls.

use crate::error::EngineError;
use crate::special::t_cdf;

/// An ordered sequence of (x, y) pairs.
///
/// Insertion order matters only for display; the statistics below are
/// order-independent. Coordinates are validated on entry so every stored
/// point is finite.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointSeries {
    points: Vec<(f64, f64)>,
}

impl PointSeries {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from existing pairs, rejecting non-finite
    /// coordinates.
    pub fn from_points(points: Vec<(f64, f64)>) -> Result<Self, EngineError> {
        for (index, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(EngineError::NonFiniteValue { index });
            }
        }
        Ok(Self { points })
    }

    /// Appends one point.
    pub fn push(&mut self, x: f64, y: f64) -> Result<(), EngineError> {
        if !x.is_finite() || !y.is_finite() {
            return Err(EngineError::NonFiniteValue {
                index: self.points.len(),
            });
        }
        self.points.push((x, y));
        Ok(())
    }

    /// Removes and returns the point at `index`.
    pub fn remove(&mut self, index: usize) -> Option<(f64, f64)> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }

    pub fn xs(&self) -> Vec<f64> {
        self.points.iter().map(|&(x, _)| x).collect()
    }

    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|&(_, y)| y).collect()
    }

    fn x_is_constant(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].0 == w[1].0)
    }

    fn y_is_constant(&self) -> bool {
        self.points
            .windows(2)
            .all(|w| w[0].1 == w[1].1)
    }

    /// Centered second-moment sums: Σ(x−x̄)², Σ(y−ȳ)², Σ(x−x̄)(y−ȳ).
    ///
    /// Algebraically identical to the textbook raw-sums forms
    /// (e.g. nΣxy − ΣxΣy), evaluated about the means to avoid the
    /// cancellation those forms suffer for offset data.
    fn centered_sums(&self) -> (f64, f64, f64, f64, f64) {
        let n = self.points.len() as f64;
        let mean_x = self.points.iter().map(|&(x, _)| x).sum::<f64>() / n;
        let mean_y = self.points.iter().map(|&(_, y)| y).sum::<f64>() / n;
        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;
        for &(x, y) in &self.points {
            let dx = x - mean_x;
            let dy = y - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        (mean_x, mean_y, sxx, syy, sxy)
    }
}

/// Pearson correlation with its significance test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CorrelationTest {
    /// Pearson r in [−1, 1].
    pub r: f64,
    /// `r·√((n−2)/(1−r²))`; `None` when n ≤ 2 (inference disabled).
    pub t_statistic: Option<f64>,
    /// n − 2 when the test runs, 0 otherwise.
    pub df: usize,
    /// Two-tailed p-value; reported as 1 when n ≤ 2.
    pub p_value: f64,
}

/// Pearson product-moment correlation over a series.
///
/// `r = Σ(x−x̄)(y−ȳ) / √(Σ(x−x̄)²·Σ(y−ȳ)²)`, with the two-tailed
/// significance test `t = r·√((n−2)/(1−r²))`, `df = n−2`,
/// `p = 2·(1 − t_cdf(|t|, df))` for n > 2. With exactly two
/// (non-degenerate) points r is defined but inference is disabled:
/// p is reported as 1.
///
/// # Errors
/// - [`EngineError::TooFewObservations`] for fewer than 2 points.
/// - [`EngineError::ZeroVariance`] when either variable is constant —
///   r is undefined there and never silently NaN.
///
/// # Examples
/// ```
/// use statlab::regress::{correlation, PointSeries};
///
/// let series = PointSeries::from_points(
///     (0..10).map(|i| (i as f64, 3.0 * i as f64 + 1.0)).collect(),
/// )
/// .unwrap();
/// let test = correlation(&series).unwrap();
/// assert!((test.r - 1.0).abs() < 1e-12);
/// assert!(test.p_value < 1e-6);
/// ```
pub fn correlation(series: &PointSeries) -> Result<CorrelationTest, EngineError> {
    let n = series.len();
    if n < 2 {
        return Err(EngineError::TooFewObservations {
            min_required: 2,
            actual: n,
        });
    }
    if series.x_is_constant() {
        return Err(EngineError::ZeroVariance { variable: "x" });
    }
    if series.y_is_constant() {
        return Err(EngineError::ZeroVariance { variable: "y" });
    }

    let (_, _, sxx, syy, sxy) = series.centered_sums();
    let r = (sxy / (sxx * syy).sqrt()).clamp(-1.0, 1.0);

    if n <= 2 {
        return Ok(CorrelationTest {
            r,
            t_statistic: None,
            df: 0,
            p_value: 1.0,
        });
    }

    let df = n - 2;
    let t = r * ((df as f64) / (1.0 - r * r)).sqrt();
    let p_value = 2.0 * (1.0 - t_cdf(t.abs(), df as f64));

    Ok(CorrelationTest {
        r,
        t_statistic: Some(t),
        df,
        p_value: p_value.clamp(0.0, 1.0),
    })
}

/// An ordinary-least-squares line with its fit quality.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    /// `1 − SSres/SStot`; 0 by convention when SStot is 0.
    pub r_squared: f64,
}

impl RegressionModel {
    /// Predicted ŷ at `x`.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fits the ordinary-least-squares line to a series.
///
/// `slope = Σ(x−x̄)(y−ȳ) / Σ(x−x̄)²`, `intercept = ȳ − slope·x̄`, and
/// `R² = 1 − SSres/SStot`. The fit is fully recomputed from the current
/// points; an unchanged series yields an identical model.
///
/// # Errors
/// - [`EngineError::TooFewObservations`] for fewer than 2 points.
/// - [`EngineError::ZeroVariance`] when x is constant (vertical data has
///   no least-squares line).
///
/// # Examples
/// ```
/// use statlab::regress::{fit, PointSeries};
///
/// let series = PointSeries::from_points(vec![
///     (1.0, 2.0), (2.0, 4.1), (3.0, 5.9), (4.0, 8.0),
/// ])
/// .unwrap();
/// let model = fit(&series).unwrap();
/// assert!((model.slope - 2.0).abs() < 0.1);
/// assert!(model.r_squared > 0.99);
/// ```
pub fn fit(series: &PointSeries) -> Result<RegressionModel, EngineError> {
    let n = series.len();
    if n < 2 {
        return Err(EngineError::TooFewObservations {
            min_required: 2,
            actual: n,
        });
    }
    if series.x_is_constant() {
        return Err(EngineError::ZeroVariance { variable: "x" });
    }

    let (mean_x, mean_y, sxx, syy, sxy) = series.centered_sums();
    let slope = sxy / sxx;
    let intercept = mean_y - slope * mean_x;

    // A constant response has SStot = 0: no variation to explain, so R²
    // is 0 by convention rather than undefined.
    let r_squared = if series.y_is_constant() || syy == 0.0 {
        0.0
    } else {
        let ss_res = residual_sum_of_squares(series, slope, intercept);
        (1.0 - ss_res / syy).clamp(0.0, 1.0)
    };

    Ok(RegressionModel {
        slope,
        intercept,
        r_squared,
    })
}

/// Sum of squared vertical residuals of an arbitrary line over a series.
///
/// `SSres = Σ (y − (slope·x + intercept))²`. Zero for an empty series.
pub fn residual_sum_of_squares(series: &PointSeries, slope: f64, intercept: f64) -> f64 {
    series
        .points()
        .iter()
        .map(|&(x, y)| {
            let residual = y - (slope * x + intercept);
            residual * residual
        })
        .sum()
}

/// A manual line's squared error against the least-squares optimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitComparison {
    /// SSres of the caller's line.
    pub manual_ss: f64,
    /// SSres of the fitted OLS line.
    pub optimal_ss: f64,
    /// `manual_ss − optimal_ss`, never negative; zero exactly when the
    /// manual line is the least-squares line.
    pub excess: f64,
}

/// Scores a hand-traced line against the OLS optimum.
///
/// The least-squares line minimizes the sum of squared residuals, so the
/// excess is non-negative for every `(slope, intercept)` and vanishes
/// only at the OLS solution — the feedback signal for the trace-your-own
/// -line exercise.
///
/// # Errors
/// Same conditions as [`fit`].
///
/// # Examples
/// ```
/// use statlab::regress::{compare_fit, PointSeries};
///
/// let series = PointSeries::from_points(vec![
///     (0.0, 1.0), (1.0, 2.9), (2.0, 5.1), (3.0, 7.0),
/// ])
/// .unwrap();
/// let score = compare_fit(&series, 1.0, 0.0).unwrap();
/// assert!(score.excess > 0.0); // a slope of 1 is clearly off
/// ```
pub fn compare_fit(
    series: &PointSeries,
    slope: f64,
    intercept: f64,
) -> Result<FitComparison, EngineError> {
    let model = fit(series)?;
    let manual_ss = residual_sum_of_squares(series, slope, intercept);
    let optimal_ss = residual_sum_of_squares(series, model.slope, model.intercept);
    Ok(FitComparison {
        manual_ss,
        optimal_ss,
        excess: (manual_ss - optimal_ss).max(0.0),
    })
}

// ============================================================================
// Tests
// ============================================================================
