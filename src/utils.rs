//! Utility functions for the MENACE crate

use rand::Rng;

/// Calculate Shannon entropy from a probability distribution.
///
/// The Shannon entropy is calculated as: H = -Σ(p * ln(p)) for p > 0
///
/// # Examples
///
/// ```
/// use menace::utils::shannon_entropy;
///
/// let entropy = shannon_entropy(vec![0.5, 0.5]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
/// ```
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| -p * p.ln())
        .sum()
}

/// Calculate entropy from weights (normalizes first).
///
/// Returns 0.0 if the total weight is zero or negative.
///
/// # Examples
///
/// ```
/// use menace::utils::entropy_from_weights;
///
/// let entropy = entropy_from_weights(vec![1.0, 1.0]);
/// assert!((entropy - std::f64::consts::LN_2).abs() < 0.001);
///
/// assert_eq!(entropy_from_weights(vec![0.0, 0.0]), 0.0);
/// ```
pub fn entropy_from_weights<I>(weights: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let weights: Vec<f64> = weights.into_iter().collect();
    let total: f64 = weights.iter().sum();
    if total <= 0.0 || !total.is_finite() {
        return 0.0;
    }
    shannon_entropy(weights.into_iter().map(|w| w / total))
}

/// Sample an item with probability proportional to its integer weight.
///
/// Builds the cumulative weight table and binary-searches a uniform ticket
/// in `[0, total)`, which selects exactly as drawing uniformly from a pool
/// holding `weight` copies of each item would. Zero-weight items are never
/// chosen. Returns `None` when the slice is empty or all weights are zero.
///
/// # Examples
///
/// ```
/// use menace::utils::weighted_sample;
/// use rand::{SeedableRng, rngs::StdRng};
///
/// let mut rng = StdRng::seed_from_u64(7);
/// let items = [(0usize, 0u64), (4, 5), (8, 0)];
/// assert_eq!(weighted_sample(&mut rng, &items), Some(4));
/// ```
pub fn weighted_sample<R, T>(rng: &mut R, items: &[(T, u64)]) -> Option<T>
where
    R: Rng,
    T: Clone,
{
    let mut cumulative = Vec::with_capacity(items.len());
    let mut total = 0u64;
    for (_, weight) in items {
        total = total.saturating_add(*weight);
        cumulative.push(total);
    }

    if total == 0 {
        return None;
    }

    let ticket = rng.random_range(0..total);
    let index = cumulative.partition_point(|&bound| bound <= ticket);
    items.get(index).map(|(item, _)| item.clone())
}
