use super::support::Support;
use crate::Energy;
use crate::Mass;

/// A transport plan between two mass distributions.
///
/// A coupling assigns to every (x, y) pair the mass moved from x to y.
/// Its row marginals recover the source masses and its column marginals
/// the target masses, up to the normalization chosen by the implementation.
pub trait Coupling {
    /// Source support space.
    type X: Support;
    /// Target support space.
    type Y: Support;
    /// Returns the mass transported from `x` to `y`, zero if none.
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Mass;
    /// Returns the normalized transport cost of this coupling.
    fn cost(&self) -> Energy;
}
