//! Benjamini-Hochberg step-up procedure.

use std::cmp::Ordering;

/// Default false-discovery rate.
pub const DEFAULT_FDR: f64 = 0.10;

/// Flags hypotheses rejected by the Benjamini-Hochberg step-up procedure.
///
/// Sorts the `m` p-values ascending, finds the largest rank `j` with
/// `p_(j) <= (j / m) * fdr` and rejects every hypothesis whose p-value is at
/// most `p_(j)`. Returns one flag per input, in input order.
#[must_use]
pub fn benjamini_hochberg(p_values: &[f64], fdr: f64) -> Vec<bool> {
    let m = p_values.len();
    if m == 0 {
        return Vec::new();
    }

    let mut sorted: Vec<f64> = p_values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let threshold = sorted
        .iter()
        .enumerate()
        .filter(|&(j, &p)| p <= ((j + 1) as f64 / m as f64) * fdr)
        .map(|(_, &p)| p)
        .last();

    match threshold {
        Some(cutoff) => p_values.iter().map(|&p| p <= cutoff).collect(),
        None => vec![false; m],
    }
}
