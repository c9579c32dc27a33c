//! Random number generation and index sampling.
//!
//! Seeded RNG construction, Box-Muller normal deviates, and the two index
//! samplers the simulation layer needs: without-replacement draws and full
//! permutations.
//!
//! # Reproducibility
//!
//! Every stochastic function takes `&mut impl Rng`; nothing in the crate
//! owns a generator. For reproducible lessons and tests, build the stream
//! with [`create_rng`] and a fixed seed — the sequence is deterministic for
//! a given seed on the same platform.

use rand::Rng;
use std::collections::HashSet;

/// Creates a fast, seeded random number generator.
///
/// Uses `SmallRng` for high throughput; the sequence is deterministic for
/// a given seed on the same platform.
///
/// # Examples
/// ```
/// use statlab::random::create_rng;
/// use rand::Rng;
/// let mut rng = create_rng(7);
/// let u: f64 = rng.random();
/// assert!((0.0..1.0).contains(&u));
/// ```
pub fn create_rng(seed: u64) -> rand::rngs::SmallRng {
    use rand::SeedableRng;
    rand::rngs::SmallRng::seed_from_u64(seed)
}

/// Draws one standard-normal deviate via the Box-Muller transform.
///
/// # Algorithm
/// Two independent uniforms `u ∈ (0, 1]`, `v ∈ [0, 1)` yield
/// `z = √(−2 ln u) · cos(2π v)`, which is exactly N(0, 1) distributed.
/// The complement `1 − random()` keeps `u` away from zero so the log is
/// always finite.
///
/// Reference: Box & Muller (1958), "A Note on the Generation of Random
/// Normal Deviates", *Annals of Mathematical Statistics* 29(2).
///
/// # Examples
/// ```
/// use statlab::random::{create_rng, standard_normal};
/// let mut rng = create_rng(42);
/// let z = standard_normal(&mut rng);
/// assert!(z.is_finite());
/// ```
pub fn standard_normal<R: Rng>(rng: &mut R) -> f64 {
    let u: f64 = 1.0 - rng.random::<f64>();
    let v: f64 = rng.random();
    (-2.0 * u.ln()).sqrt() * (2.0 * std::f64::consts::PI * v).cos()
}

/// Draws `n` distinct indices from `[0, population_size)` without
/// replacement.
///
/// # Algorithm
/// Rejection sampling: repeatedly pick a uniform index and insert it into
/// a set until the set holds `n` members. The returned order is the order
/// of first acceptance, so consecutive calls with the same generator give
/// independent draws.
///
/// # Panics
/// Debug-asserts `n <= population_size`; callers validate this bound
/// before drawing (the simulator rejects it as a configuration error).
///
/// # Examples
/// ```
/// use statlab::random::{create_rng, sample_without_replacement};
/// let mut rng = create_rng(42);
/// let picked = sample_without_replacement(5, 100, &mut rng);
/// assert_eq!(picked.len(), 5);
/// assert!(picked.iter().all(|&i| i < 100));
/// ```
pub fn sample_without_replacement<R: Rng>(
    n: usize,
    population_size: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(n <= population_size);
    let mut seen = HashSet::with_capacity(n);
    let mut picked = Vec::with_capacity(n);
    while picked.len() < n {
        let idx = rng.random_range(0..population_size);
        if seen.insert(idx) {
            picked.push(idx);
        }
    }
    picked
}

/// Returns a uniformly random permutation of the indices `[0, n)`.
///
/// # Algorithm
/// Fisher-Yates (Durstenfeld variant): iterate backwards, swapping each
/// position with a uniformly chosen earlier (or same) position. Each of
/// the n! permutations is equally likely.
///
/// Reference: Knuth (1997), *TAOCP* Vol. 2, §3.4.2, Algorithm P.
///
/// # Examples
/// ```
/// use statlab::random::{create_rng, shuffled_indices};
/// let mut rng = create_rng(42);
/// let order = shuffled_indices(6, &mut rng);
/// let mut sorted = order.clone();
/// sorted.sort();
/// assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
/// ```
pub fn shuffled_indices<R: Rng>(n: usize, rng: &mut R) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..n).collect();
    if n <= 1 {
        return indices;
    }
    for i in (1..n).rev() {
        let j = rng.random_range(0..=i);
        indices.swap(i, j);
    }
    indices
}

// ============================================================================
// Tests
// ============================================================================
