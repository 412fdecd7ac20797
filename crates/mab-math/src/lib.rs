//! Numerical primitives for mab arm selection.
//!
//! - [`dist`]: the reward distributions every policy consumes.
//! - [`numint`]: fixed-order quadrature rules and the adaptive composite integrator.

pub mod dist;
pub mod numint;

pub use dist::{Beta, Dist, DistError, Normal, Point, RewardDistribution, NORMAL_SUPPORT_WIDTH};
pub use numint::{
    EquallySpaced, Integrator, Interval, Quadrature, QuadratureBuilder, QuadratureError, Rule,
    RuleFamily, Subdivider, Tolerance,
};
