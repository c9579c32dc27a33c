//! Descriptive statistics.
//!
//! Pure functions over `&[f64]` slices: central tendency, spread,
//! quantiles, bucketed mode, IQR outlier detection, and the summary
//! records (five-number summary, histogram bins) that chart renderers
//! consume as plain data.
//!
//! All functions handle edge cases explicitly: empty input and NaN input
//! return `None` rather than propagating NaN into results.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent of n.
//! - **Variance/StdDev**: two-pass computation about the compensated mean.
//! - **Quantile**: R-7 linear interpolation between order statistics
//!   (the default in R, NumPy, and Excel).
//!   Reference: Hyndman & Fan (1996), *The American Statistician* 50(4).

use std::collections::HashMap;

/// Sums a slice with Neumaier's compensated summation.
///
/// Maintains a running compensation term that recovers low-order bits lost
/// to rounding, including when an addend exceeds the running sum.
///
/// Reference: Neumaier (1974), *ZAMM* 54(1).
pub fn compensated_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut comp = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            comp += (sum - t) + x;
        } else {
            comp += (x - t) + sum;
        }
        sum = t;
    }
    sum + comp
}

/// Arithmetic mean.
///
/// # Returns
/// `None` if `data` is empty or contains NaN/Inf.
///
/// # Examples
/// ```
/// use statlab::describe::mean;
/// assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0]), Some(2.5));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(compensated_sum(data) / data.len() as f64)
}

/// Sample variance (Bessel-corrected, n − 1 denominator).
///
/// Two-pass: the mean first, then the sum of squared deviations, both with
/// compensated accumulation. Avoids the catastrophic cancellation of the
/// naive `E[X²] − (E[X])²` form.
///
/// # Returns
/// `None` if `data.len() < 2` or the data contains NaN/Inf.
///
/// # Examples
/// ```
/// use statlab::describe::variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((variance(&v).unwrap() - 4.571428571428571).abs() < 1e-12);
/// ```
pub fn variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 {
        return None;
    }
    let m = mean(data)?;
    let sq: Vec<f64> = data.iter().map(|&x| (x - m) * (x - m)).collect();
    Some(compensated_sum(&sq) / (data.len() - 1) as f64)
}

/// Population variance (n denominator).
///
/// # Returns
/// `None` if `data` is empty or contains NaN/Inf.
pub fn population_variance(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    let m = mean(data)?;
    let sq: Vec<f64> = data.iter().map(|&x| (x - m) * (x - m)).collect();
    Some(compensated_sum(&sq) / data.len() as f64)
}

/// Sample standard deviation (`sqrt` of [`variance`]).
pub fn std_dev(data: &[f64]) -> Option<f64> {
    variance(data).map(f64::sqrt)
}

/// Population standard deviation (`sqrt` of [`population_variance`]).
pub fn population_std_dev(data: &[f64]) -> Option<f64> {
    population_variance(data).map(f64::sqrt)
}

/// Minimum value, `None` on empty or NaN input.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter().copied().try_fold(f64::INFINITY, |acc, x| {
        if x.is_nan() {
            None
        } else {
            Some(acc.min(x))
        }
    })
}

/// Maximum value, `None` on empty or NaN input.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter()
        .copied()
        .try_fold(f64::NEG_INFINITY, |acc, x| {
            if x.is_nan() {
                None
            } else {
                Some(acc.max(x))
            }
        })
}

/// Median: the middle order statistic, or the average of the two central
/// order statistics for even-length data.
///
/// # Examples
/// ```
/// use statlab::describe::median;
/// assert_eq!(median(&[3.0, 1.0, 2.0]), Some(2.0));
/// assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), Some(2.5));
/// ```
pub fn median(data: &[f64]) -> Option<f64> {
    quantile(data, 0.5)
}

/// The `p`-th quantile by R-7 linear interpolation.
///
/// For sorted data `x[0..n]`: `h = (n−1)·p`, `j = ⌊h⌋`, and the result is
/// `(1−g)·x[j] + g·x[j+1]` with `g = h − j`.
///
/// # Returns
/// `None` if `data` is empty, `p` is outside `[0, 1]`, or data has NaN.
///
/// # Examples
/// ```
/// use statlab::describe::quantile;
/// let data = [1.0, 2.0, 3.0, 4.0, 5.0];
/// assert_eq!(quantile(&data, 0.0), Some(1.0));
/// assert_eq!(quantile(&data, 0.25), Some(2.0));
/// assert_eq!(quantile(&data, 1.0), Some(5.0));
/// ```
pub fn quantile(data: &[f64], p: f64) -> Option<f64> {
    if data.is_empty() || !(0.0..=1.0).contains(&p) || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("NaN filtered above"));
    quantile_sorted(&sorted, p)
}

/// The `p`-th quantile on **pre-sorted** data (R-7 method).
///
/// Skips the O(n log n) sort when several quantiles are taken from the
/// same dataset; the caller guarantees non-decreasing order.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    let n = sorted.len();
    if n == 0 || !(0.0..=1.0).contains(&p) {
        return None;
    }
    if n == 1 {
        return Some(sorted[0]);
    }
    let h = (n - 1) as f64 * p;
    let j = h.floor() as usize;
    let g = h - h.floor();
    if j + 1 >= n {
        Some(sorted[n - 1])
    } else {
        Some((1.0 - g) * sorted[j] + g * sorted[j + 1])
    }
}

/// Mode of bucketed data.
///
/// Continuous data has no meaningful mode without a declared granularity,
/// so the bucket width is an explicit parameter: each value is rounded to
/// the nearest multiple of `bucket_width` and the most frequent bucket's
/// representative value is returned. Ties go to the smallest bucket.
///
/// # Returns
/// `None` if `data` is empty, contains NaN/Inf, or `bucket_width` is not a
/// positive finite number.
///
/// # Examples
/// ```
/// use statlab::describe::mode;
/// let data = [1.01, 0.99, 1.02, 3.5, 3.49];
/// // At width 0.1 the three values near 1.0 share a bucket.
/// assert_eq!(mode(&data, 0.1), Some(1.0));
/// ```
pub fn mode(data: &[f64], bucket_width: f64) -> Option<f64> {
    if data.is_empty()
        || !data.iter().all(|x| x.is_finite())
        || !bucket_width.is_finite()
        || bucket_width <= 0.0
    {
        return None;
    }
    let mut counts: HashMap<i64, usize> = HashMap::new();
    for &x in data {
        let bucket = (x / bucket_width).round() as i64;
        *counts.entry(bucket).or_insert(0) += 1;
    }
    let (bucket, _) = counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))?;
    Some(bucket as f64 * bucket_width)
}

/// Five-number summary: min, Q1, median, Q3, max.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FiveNumberSummary {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Computes the five-number summary in one sort.
///
/// # Examples
/// ```
/// use statlab::describe::five_number_summary;
/// let s = five_number_summary(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(s.min, 1.0);
/// assert_eq!(s.median, 3.0);
/// assert_eq!(s.max, 5.0);
/// ```
pub fn five_number_summary(data: &[f64]) -> Option<FiveNumberSummary> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let mut sorted = data.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).expect("NaN filtered above"));
    Some(FiveNumberSummary {
        min: sorted[0],
        q1: quantile_sorted(&sorted, 0.25)?,
        median: quantile_sorted(&sorted, 0.5)?,
        q3: quantile_sorted(&sorted, 0.75)?,
        max: sorted[sorted.len() - 1],
    })
}

/// IQR-based outlier summary for box plots.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierSummary {
    pub q1: f64,
    pub q3: f64,
    pub iqr: f64,
    /// `Q1 − 1.5·IQR`, clamped up to the domain minimum when given.
    pub lower_whisker: f64,
    /// `Q3 + 1.5·IQR`, clamped down to the domain maximum when given.
    pub upper_whisker: f64,
    /// Indices of values outside `[lower_whisker, upper_whisker]`.
    pub outliers: Vec<usize>,
}

/// Flags outliers by the 1.5·IQR rule.
///
/// Whiskers extend to `Q1 − 1.5·IQR` and `Q3 + 1.5·IQR`; when a domain is
/// supplied the whiskers never leave it. Any value strictly outside the
/// whiskers is an outlier; indices are reported so the caller can map back
/// to its own records.
///
/// # Examples
/// ```
/// use statlab::describe::outlier_summary;
/// let data = [1.0, 2.0, 2.5, 3.0, 3.5, 4.0, 50.0];
/// let s = outlier_summary(&data, None).unwrap();
/// assert_eq!(s.outliers, vec![6]);
/// ```
pub fn outlier_summary(data: &[f64], domain: Option<(f64, f64)>) -> Option<OutlierSummary> {
    if data.is_empty() || data.iter().any(|x| x.is_nan()) {
        return None;
    }
    let q1 = quantile(data, 0.25)?;
    let q3 = quantile(data, 0.75)?;
    let iqr = q3 - q1;

    let mut lower_whisker = q1 - 1.5 * iqr;
    let mut upper_whisker = q3 + 1.5 * iqr;
    if let Some((lo, hi)) = domain {
        lower_whisker = lower_whisker.max(lo);
        upper_whisker = upper_whisker.min(hi);
    }

    let outliers = data
        .iter()
        .enumerate()
        .filter(|(_, &x)| x < lower_whisker || x > upper_whisker)
        .map(|(i, _)| i)
        .collect();

    Some(OutlierSummary {
        q1,
        q3,
        iqr,
        lower_whisker,
        upper_whisker,
        outliers,
    })
}

/// One equal-width histogram bin: `[lower, upper)`, last bin closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bins data into `bin_count` equal-width intervals spanning its range.
///
/// Degenerate data (all values equal) collapses into a single bin. The
/// maximum value lands in the last bin.
///
/// # Returns
/// `None` if `data` is empty, contains NaN/Inf, or `bin_count` is zero.
///
/// # Examples
/// ```
/// use statlab::describe::histogram;
/// let bins = histogram(&[0.0, 1.0, 2.0, 3.0, 4.0], 2).unwrap();
/// assert_eq!(bins.len(), 2);
/// assert_eq!(bins[0].count + bins[1].count, 5);
/// ```
pub fn histogram(data: &[f64], bin_count: usize) -> Option<Vec<HistogramBin>> {
    if data.is_empty() || bin_count == 0 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let lo = min(data)?;
    let hi = max(data)?;

    if lo == hi {
        return Some(vec![HistogramBin {
            lower: lo,
            upper: hi,
            count: data.len(),
        }]);
    }

    let width = (hi - lo) / bin_count as f64;
    let mut counts = vec![0usize; bin_count];
    for &x in data {
        let mut idx = ((x - lo) / width) as usize;
        if idx >= bin_count {
            idx = bin_count - 1;
        }
        counts[idx] += 1;
    }

    Some(
        counts
            .into_iter()
            .enumerate()
            .map(|(i, count)| HistogramBin {
                lower: lo + i as f64 * width,
                upper: lo + (i + 1) as f64 * width,
                count,
            })
            .collect(),
    )
}

/// Fisher's adjusted sample skewness (G₁) with bias correction.
///
/// `G₁ = [√(n(n−1)) / (n−2)] · (m₃ / m₂^{3/2})` over the biased central
/// moments; matches Excel `SKEW()` and `scipy.stats.skew(bias=False)`.
///
/// Reference: Joanes & Gill (1998), *The Statistician* 47(1).
///
/// # Returns
/// `None` if `data.len() < 3`, data contains NaN/Inf, or variance is zero.
pub fn skewness(data: &[f64]) -> Option<f64> {
    let n = data.len();
    if n < 3 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let nf = n as f64;
    let m = compensated_sum(data) / nf;
    let mut sum2 = 0.0;
    let mut sum3 = 0.0;
    for &x in data {
        let d = x - m;
        sum2 += d * d;
        sum3 += d * d * d;
    }
    let m2 = sum2 / nf;
    if m2 == 0.0 {
        return None;
    }
    let m3 = sum3 / nf;
    let correction = (nf * (nf - 1.0)).sqrt() / (nf - 2.0);
    Some(correction * m3 / m2.powf(1.5))
}

// ============================================================================
// Tests
// ============================================================================
