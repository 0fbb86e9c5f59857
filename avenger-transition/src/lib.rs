//! Costed transitions between two chart specifications.
//!
//! Two specifications are compared along three independent axes: the mark type,
//! the per-channel transforms (scale, aggregate, bin, sort and the data filter),
//! and the structure of the channel bindings. Each detected difference becomes a
//! [`TransitionRule`] whose cost comes from a [`TransitionCosts`] table.

pub mod costs;
pub mod engine;
pub mod error;
pub mod rule;

pub use crate::costs::{TransitionCosts, DEFAULT_TRANSITION_COSTS};
pub use crate::engine::{
    encoding_transition_set, marktype_transition, marktype_transition_set, settype_transition,
    transform_filter_transition, transform_transition, transform_transition_set,
    transition_set, TransformDimension, TransitionEngine,
};
pub use crate::error::TransitionError;
pub use crate::rule::{TransitionRule, TransitionSet};
