use super::cloud::Side;
use super::network::Network;
use crate::Energy;
use crate::Mass;
use crate::Units;

/// Errors that can occur while computing a transport plan.
///
/// Input errors are detected before the flow solver runs. The two solver
/// errors indicate a broken internal invariant and carry the network
/// state at the point of failure for diagnosis.
#[derive(Debug, Clone)]
pub enum Error {
    /// One of the point sets has no points.
    EmptyInput { side: Side },
    /// A point's dimension differs from the first source point's.
    DimensionMismatch {
        side: Side,
        index: usize,
        expected: usize,
        found: usize,
    },
    /// A weight is zero, negative, non-finite, or below quantization resolution.
    InvalidWeight { side: Side, index: usize, weight: Mass },
    /// The number of weights differs from the number of points.
    WeightCount {
        side: Side,
        points: usize,
        weights: usize,
    },
    /// The ground distance returned a negative or non-finite value.
    InvalidDistance {
        source: usize,
        target: usize,
        value: Energy,
    },
    /// Integer capacities derived from the weights do not fit.
    CapacityOverflow,
    /// No augmenting path remains although the flow is short of its target.
    UnreachableSink {
        expected: Units,
        actual: Units,
        network: Box<Network>,
    },
    /// The solved flow breaks conservation, capacity, or saturation.
    FlowConservationViolation {
        expected: Units,
        actual: Units,
        network: Box<Network>,
    },
    /// The augmentation guard was exhausted before the flow saturated.
    IterationLimit { limit: usize },
}

impl Error {
    /// Network state attached to internal solver failures.
    pub fn network(&self) -> Option<&Network> {
        match self {
            Self::UnreachableSink { network, .. } => Some(network),
            Self::FlowConservationViolation { network, .. } => Some(network),
            _ => None,
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyInput { side } => write!(f, "empty input: {} point set has no points", side),
            Self::DimensionMismatch {
                side,
                index,
                expected,
                found,
            } => write!(
                f,
                "dimension mismatch: {} point {} has dimension {}, expected {}",
                side, index, found, expected
            ),
            Self::InvalidWeight {
                side,
                index,
                weight,
            } => write!(f, "invalid weight: {} weight {} is {}", side, index, weight),
            Self::WeightCount {
                side,
                points,
                weights,
            } => write!(
                f,
                "invalid weight: {} set has {} points but {} weights",
                side, points, weights
            ),
            Self::InvalidDistance {
                source,
                target,
                value,
            } => write!(
                f,
                "invalid distance: d(source {}, target {}) = {}",
                source, target, value
            ),
            Self::CapacityOverflow => write!(f, "capacity overflow: total weights too large"),
            Self::UnreachableSink {
                expected, actual, ..
            } => write!(
                f,
                "unreachable sink: flow stalled at {} of {} units",
                actual, expected
            ),
            Self::FlowConservationViolation {
                expected, actual, ..
            } => write!(
                f,
                "flow conservation violation: sink received {} of {} units",
                actual, expected
            ),
            Self::IterationLimit { limit } => {
                write!(f, "iteration limit: {} augmentations exhausted", limit)
            }
        }
    }
}

impl std::error::Error for Error {}
