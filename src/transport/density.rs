use super::support::Support;
use crate::Mass;

/// A discrete, not necessarily normalized, mass distribution.
///
/// Unlike a probability distribution, total mass is whatever the caller
/// supplied. Transport cost is normalized downstream, so only the relative
/// proportions of mass matter for the resulting distance.
pub trait Density {
    /// The type of elements in the distribution's support.
    type Support: Support;
    /// Returns the mass at point `x`.
    fn density(&self, x: &Self::Support) -> Mass;
    /// Iterates over all points of the distribution.
    fn support(&self) -> impl Iterator<Item = Self::Support>;
    /// Total mass of the distribution.
    fn total(&self) -> Mass {
        self.support().map(|x| self.density(&x)).sum()
    }
}
