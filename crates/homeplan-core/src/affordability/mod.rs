pub mod evaluator;

pub use evaluator::{
    assess_affordability, evaluate, AffordabilityAssessment, AffordabilityLimits,
    AffordabilityResult, BindingConstraint, LimitStatus,
};
