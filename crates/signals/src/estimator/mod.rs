//! Estimators that turn draw history into outcome distributions.
//!
//! Each stage is a pure function of its inputs. [`build_components`] wires
//! them together for one prediction and is shared by single analysis and the
//! walk-forward backtest.

mod dirichlet;
mod frequency;
mod fusion;
mod markov;
mod posterior;
mod shrinkage;

pub use dirichlet::dirichlet_posterior;
pub use frequency::{count_by_day, count_by_month, count_outcomes};
pub use fusion::{log_linear_fusion, softmax, ComponentDistributions, PROBABILITY_FLOOR};
pub use markov::{MarkovModel, TransitionMatrix};
pub use posterior::{build_components, ConditioningKey, PosteriorViews};
pub use shrinkage::{shrink, trust_weight};
