use super::point::Point;
use crate::Energy;
use serde::Deserialize;
use serde::Serialize;

/// Built-in ground distances between points.
///
/// Any `Fn(&Point, &Point) -> Energy` can serve as a ground distance;
/// these are the common choices, with Euclidean as the default.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Ground {
    /// L2 norm of the difference.
    #[default]
    Euclidean,
    /// L1 norm of the difference.
    Manhattan,
    /// L∞ norm of the difference.
    Chebyshev,
}

impl Ground {
    pub fn distance(&self, x: &Point, y: &Point) -> Energy {
        match self {
            Self::Euclidean => euclidean(x, y),
            Self::Manhattan => manhattan(x, y),
            Self::Chebyshev => chebyshev(x, y),
        }
    }
}

impl std::fmt::Display for Ground {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Euclidean => write!(f, "euclidean"),
            Self::Manhattan => write!(f, "manhattan"),
            Self::Chebyshev => write!(f, "chebyshev"),
        }
    }
}

pub fn euclidean(x: &Point, y: &Point) -> Energy {
    x.zip(y).map(|(a, b)| (a - b) * (a - b)).sum::<Energy>().sqrt()
}

pub fn manhattan(x: &Point, y: &Point) -> Energy {
    x.zip(y).map(|(a, b)| (a - b).abs()).sum()
}

pub fn chebyshev(x: &Point, y: &Point) -> Energy {
    x.zip(y).map(|(a, b)| (a - b).abs()).fold(0., Energy::max)
}
