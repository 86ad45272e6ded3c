//! Imputation module for resolving missing values.
//!
//! Provides the statistical fills and the fixed per-column resolution plan.

mod resolver;
mod statistical;

pub use resolver::{
    MissingValuePolicy, RESOLUTION_PLAN, UNKNOWN_LABEL, apply_policy, resolve_missing_values,
};
pub use statistical::StatisticalImputer;
