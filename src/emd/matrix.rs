use super::cloud::Side;
use super::error::Error;
use super::point::Point;
use crate::Energy;
use crate::transport::Measure;
use rayon::prelude::*;

/// Dense row-major matrix of ground distances between two point sets.
///
/// Entry `(i, j)` holds `distance(source[i], target[j])`. Every entry is
/// checked to be finite and non-negative on construction, so downstream
/// network costs are valid without further checks.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    values: Vec<Energy>,
}

impl Matrix {
    /// Evaluates the ground distance over every source/target pair.
    ///
    /// Fails with `DimensionMismatch` before any evaluation if a point's
    /// dimension differs from the first point's. Large problems are filled
    /// row by row in parallel; the result does not depend on the path taken.
    pub fn build<F>(source: &[Point], target: &[Point], distance: F) -> Result<Self, Error>
    where
        F: Fn(&Point, &Point) -> Energy + Sync,
    {
        Self::dimensions(source, target)?;
        let rows = source.len();
        let cols = target.len();
        let row = |(i, x): (usize, &Point)| Self::evaluate(i, x, target, &distance);
        let values = if rows * cols >= crate::PARALLEL_THRESHOLD {
            log::debug!("filling {}x{} distance matrix in parallel", rows, cols);
            source
                .par_iter()
                .enumerate()
                .map(row)
                .collect::<Result<Vec<_>, _>>()?
        } else {
            source
                .iter()
                .enumerate()
                .map(row)
                .collect::<Result<Vec<_>, _>>()?
        };
        Ok(Self {
            rows,
            cols,
            values: values.into_iter().flatten().collect(),
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn get(&self, i: usize, j: usize) -> Energy {
        self.values[i * self.cols + j]
    }
    pub fn row(&self, i: usize) -> &[Energy] {
        &self.values[i * self.cols..(i + 1) * self.cols]
    }

    fn dimensions(source: &[Point], target: &[Point]) -> Result<(), Error> {
        let Some(expected) = source.first().or(target.first()).map(Point::dimension) else {
            return Ok(());
        };
        std::iter::empty()
            .chain(source.iter().enumerate().map(|(i, p)| (Side::Source, i, p)))
            .chain(target.iter().enumerate().map(|(i, p)| (Side::Target, i, p)))
            .find(|(_, _, p)| p.dimension() != expected)
            .map_or(Ok(()), |(side, index, p)| {
                Err(Error::DimensionMismatch {
                    side,
                    index,
                    expected,
                    found: p.dimension(),
                })
            })
    }

    fn evaluate<F>(i: usize, x: &Point, target: &[Point], distance: &F) -> Result<Vec<Energy>, Error>
    where
        F: Fn(&Point, &Point) -> Energy,
    {
        target
            .iter()
            .enumerate()
            .map(|(j, y)| match distance(x, y) {
                value if value.is_finite() && value >= 0. => Ok(value),
                value => Err(Error::InvalidDistance {
                    source: i,
                    target: j,
                    value,
                }),
            })
            .collect()
    }
}

impl Measure for Matrix {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.get(*x, *y)
    }
}
