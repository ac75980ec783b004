use crate::Arbitrary;
use serde::Deserialize;
use serde::Serialize;

/// A fixed-dimension real vector.
///
/// Points within one set are expected to be pairwise distinct. Repeated
/// coordinates are better expressed as a single point with more weight,
/// though the solver gives the same distance either way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Point(Vec<f64>);

impl Point {
    pub fn dimension(&self) -> usize {
        self.0.len()
    }
    pub fn coords(&self) -> &[f64] {
        &self.0
    }
    /// Coordinate-wise pairs with another point of the same dimension.
    pub fn zip<'a>(&'a self, other: &'a Self) -> impl Iterator<Item = (f64, f64)> + 'a {
        self.0.iter().copied().zip(other.0.iter().copied())
    }
}

impl From<Vec<f64>> for Point {
    fn from(coords: Vec<f64>) -> Self {
        Self(coords)
    }
}

impl From<&[f64]> for Point {
    fn from(coords: &[f64]) -> Self {
        Self(coords.to_vec())
    }
}

impl<const D: usize> From<[f64; D]> for Point {
    fn from(coords: [f64; D]) -> Self {
        Self(coords.to_vec())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "(")?;
        for (i, x) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}", x)?;
        }
        write!(f, ")")
    }
}

impl Arbitrary for Point {
    fn random() -> Self {
        (0..crate::ARBITRARY_DIMENSION)
            .map(|_| rand::random::<f64>())
            .collect::<Vec<_>>()
            .into()
    }
}
