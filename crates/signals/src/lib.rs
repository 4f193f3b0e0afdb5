pub mod analysis;
pub mod estimator;
pub mod validation;

// Re-export estimators for convenience
pub use estimator::{
    build_components, count_by_day, count_by_month, count_outcomes, dirichlet_posterior,
    log_linear_fusion, shrink, softmax, trust_weight, ComponentDistributions, ConditioningKey,
    MarkovModel, PosteriorViews, TransitionMatrix, PROBABILITY_FLOOR,
};

// Re-export significance testing
pub use validation::{
    benjamini_hochberg, test_uniformity, SignificantOutcome, UniformityTest, DEFAULT_FDR,
    UNIFORM_PROBABILITY,
};

pub use analysis::{analyze, AnalysisReport};
