use super::error::Error;
use super::point::Point;
use crate::Arbitrary;
use crate::Mass;
use crate::Units;
use crate::transport::Density;

/// Which of the two point sets a value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Source,
    Target,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source => write!(f, "source"),
            Self::Target => write!(f, "target"),
        }
    }
}

/// A weighted point set.
///
/// Borrows its points and owns its weights, which default to one per point.
/// Weights are validated lazily by [`Cloud::quantize`], when the network
/// needs them as integer capacities.
#[derive(Debug, Clone)]
pub struct Cloud<'a> {
    side: Side,
    points: &'a [Point],
    weights: Vec<Mass>,
}

impl<'a> Cloud<'a> {
    pub fn new(side: Side, points: &'a [Point], weights: Option<&[Mass]>) -> Self {
        Self {
            side,
            points,
            weights: weights
                .map(|w| w.to_vec())
                .unwrap_or_else(|| vec![1.; points.len()]),
        }
    }
    pub fn side(&self) -> Side {
        self.side
    }
    pub fn points(&self) -> &'a [Point] {
        self.points
    }
    pub fn weights(&self) -> &[Mass] {
        &self.weights
    }
    pub fn len(&self) -> usize {
        self.points.len()
    }
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
    pub fn point(&self, i: usize) -> &'a Point {
        &self.points[i]
    }

    /// Converts weights into integer units sharing a common scale.
    ///
    /// Weights are tried against a few bases (one, the decade of the lightest
    /// weight, the lightest weight itself) times a power of ten up to
    /// `10^QUANTIZE_DIGITS`. The first scale that makes every weight an
    /// exact integer wins. If none does, ratios to the lightest weight are
    /// rounded at `10^QUANTIZE_DIGITS`. Units are then reduced by their
    /// common divisor, so proportional weight sets quantize identically
    /// whatever their magnitude. Since transport cost is normalized by total
    /// mass, a uniform scale leaves the distance unchanged.
    pub fn quantize(&self) -> Result<Quanta, Error> {
        if self.is_empty() {
            return Err(Error::EmptyInput { side: self.side });
        }
        if self.weights.len() != self.points.len() {
            return Err(Error::WeightCount {
                side: self.side,
                points: self.points.len(),
                weights: self.weights.len(),
            });
        }
        for (index, &weight) in self.weights.iter().enumerate() {
            if !(weight.is_finite() && weight > 0.) {
                return Err(self.invalid(index));
            }
        }
        let lightest = self.weights.iter().copied().fold(Mass::INFINITY, Mass::min);
        let decade = 10f64.powi(lightest.log10().floor() as i32);
        let digits = 10f64.powi(crate::QUANTIZE_DIGITS);
        let scale = [1., decade, lightest]
            .into_iter()
            .flat_map(|base| (0..=crate::QUANTIZE_DIGITS).map(move |k| 10f64.powi(k) / base))
            .find(|scale| self.weights.iter().all(|w| Self::exact(w * scale)))
            .unwrap_or(digits / lightest);
        let mut units = Vec::with_capacity(self.weights.len());
        for &weight in self.weights.iter() {
            let scaled = (weight * scale).round();
            if !(scaled <= Self::EXACT) {
                return Err(Error::CapacityOverflow);
            }
            units.push(scaled as Units);
        }
        let divisor = units.iter().fold(0, |g, &u| gcd(g, u));
        units.iter_mut().for_each(|u| *u /= divisor);
        let scale = scale / divisor as Mass;
        let total = units
            .iter()
            .try_fold(0 as Units, |sum, &u| sum.checked_add(u))
            .ok_or(Error::CapacityOverflow)?;
        log::trace!("{} weights quantized at scale {}", self.side, scale);
        Ok(Quanta {
            units,
            total,
            scale,
        })
    }

    /// Largest float below which every integer is exactly representable.
    const EXACT: f64 = 9_007_199_254_740_992.;

    /// Whether a scaled weight is a representable positive integer.
    fn exact(x: f64) -> bool {
        x >= 0.5 && x <= Self::EXACT && (x - x.round()).abs() <= 1e-9 * x
    }
    fn invalid(&self, index: usize) -> Error {
        Error::InvalidWeight {
            side: self.side,
            index,
            weight: self.weights[index],
        }
    }
}

impl Density for Cloud<'_> {
    type Support = usize;
    fn density(&self, x: &Self::Support) -> Mass {
        self.weights.get(*x).copied().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::Support> {
        0..self.points.len()
    }
}

fn gcd(a: Units, b: Units) -> Units {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Integer weights of a point set, as used for network capacities.
#[derive(Debug, Clone, PartialEq)]
pub struct Quanta {
    units: Vec<Units>,
    total: Units,
    scale: Mass,
}

impl Quanta {
    pub fn units(&self) -> &[Units] {
        &self.units
    }
    pub fn unit(&self, i: usize) -> Units {
        self.units[i]
    }
    /// Sum of all integer weights.
    pub fn total(&self) -> Units {
        self.total
    }
    /// Units per unit of caller weight.
    pub fn scale(&self) -> Mass {
        self.scale
    }
}

/// Random point sets with small integer weights, for tests and benchmarks.
#[derive(Debug, Clone)]
pub struct Sample {
    pub points: Vec<Point>,
    pub weights: Vec<Mass>,
}

impl Arbitrary for Sample {
    fn random() -> Self {
        use rand::Rng;
        let ref mut rng = rand::rng();
        let n = rng.random_range(1..=crate::ARBITRARY_POINTS);
        Self {
            points: (0..n).map(|_| Point::random()).collect(),
            weights: (0..n)
                .map(|_| rng.random_range(1..=crate::ARBITRARY_WEIGHT) as Mass)
                .collect(),
        }
    }
}
