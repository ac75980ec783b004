//! Exact Earth Mover's Distance via min-cost max-flow.
//!
//! ## Pipeline
//!
//! 1. [`Matrix`] — Ground distances between every source/target pair
//! 2. [`Network`] — Bipartite flow network with weight-derived capacities
//! 3. [`Solver`] — Successive shortest augmenting paths
//! 4. [`Plan`] — Normalized transport plan and scalar distance
//!
//! [`Transport`] wires the stages together; [`compute_optimal_transport`]
//! is the one-call form.
mod cloud;
mod error;
mod ground;
mod matrix;
mod network;
mod plan;
mod point;
mod solver;

#[cfg(test)]
mod properties;

pub use cloud::*;
pub use error::*;
pub use ground::*;
pub use matrix::*;
pub use network::*;
pub use plan::*;
pub use point::*;
pub use solver::*;

use crate::Energy;
use crate::Mass;

/// Optimal transport problem between two weighted point sets.
///
/// Weights default to one per point and the ground distance to Euclidean.
/// Every call to [`Transport::solve`] recomputes from scratch.
pub struct Transport<'a> {
    source: &'a [Point],
    target: &'a [Point],
    source_weights: Option<&'a [Mass]>,
    target_weights: Option<&'a [Mass]>,
    distance: Box<dyn Fn(&Point, &Point) -> Energy + Sync + 'a>,
    limit: Option<usize>,
}

impl<'a> Transport<'a> {
    pub fn new(source: &'a [Point], target: &'a [Point]) -> Self {
        Self {
            source,
            target,
            source_weights: None,
            target_weights: None,
            distance: Box::new(euclidean),
            limit: None,
        }
    }
    pub fn source_weights(mut self, weights: &'a [Mass]) -> Self {
        self.source_weights = Some(weights);
        self
    }
    pub fn target_weights(mut self, weights: &'a [Mass]) -> Self {
        self.target_weights = Some(weights);
        self
    }
    /// Uses one of the built-in ground distances.
    pub fn ground(mut self, ground: Ground) -> Self {
        self.distance = Box::new(move |x: &Point, y: &Point| ground.distance(x, y));
        self
    }
    /// Uses an arbitrary ground distance. It must return finite,
    /// non-negative values and should be symmetric.
    pub fn distance<F>(mut self, distance: F) -> Self
    where
        F: Fn(&Point, &Point) -> Energy + Sync + 'a,
    {
        self.distance = Box::new(distance);
        self
    }
    /// Bounds the number of flow augmentations.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn solve(&self) -> Result<Plan, Error> {
        let source = Cloud::new(Side::Source, self.source, self.source_weights);
        let target = Cloud::new(Side::Target, self.target, self.target_weights);
        let matrix = Matrix::build(self.source, self.target, |x, y| (self.distance)(x, y))?;
        let network = Network::build(&source, &target, &matrix)?;
        let solver = match self.limit {
            Some(limit) => Solver::new(network).with_limit(limit),
            None => Solver::new(network),
        };
        let solution = solver.solve()?;
        Ok(Plan::extract(&solution, &source, &target))
    }
}

/// Computes the optimal transport plan and Earth Mover's Distance between
/// `source` and `target` under `distance`. Missing weights are uniform.
pub fn compute_optimal_transport<F>(
    source: &[Point],
    target: &[Point],
    distance: F,
    source_weights: Option<&[Mass]>,
    target_weights: Option<&[Mass]>,
) -> Result<(Plan, Energy), Error>
where
    F: Fn(&Point, &Point) -> Energy + Sync,
{
    let mut transport = Transport::new(source, target).distance(distance);
    transport.source_weights = source_weights;
    transport.target_weights = target_weights;
    let plan = transport.solve()?;
    let emd = plan.emd();
    Ok((plan, emd))
}
