//! Optimal transport abstractions.
//!
//! ## Core Types
//!
//! - [`Support`] — Index into a point set
//! - [`Density`] — Weighted mass over a support
//! - [`Measure`] — Ground cost between two supports
//! - [`Coupling`] — A transport plan between two densities
mod coupling;
mod density;
mod measure;
mod support;

pub use coupling::*;
pub use density::*;
pub use measure::*;
pub use support::*;
