//! Significance testing of outcome frequencies against a uniform null.
//!
//! Each of the 100 outcomes gets a normal-approximation z-test; the 100
//! simultaneous p-values are then corrected with Benjamini-Hochberg so the
//! expected share of false discoveries among flagged outcomes stays below
//! the chosen FDR.

mod fdr;
mod uniformity;

pub use fdr::{benjamini_hochberg, DEFAULT_FDR};
pub use uniformity::{test_uniformity, SignificantOutcome, UniformityTest, UNIFORM_PROBABILITY};
