use super::cloud::Cloud;
use super::point::Point;
use super::solver::Solution;
use crate::Energy;
use crate::Mass;
use crate::Units;
use crate::transport::Coupling;
use serde::Deserialize;
use serde::Serialize;

/// Normalized optimal transport plan and its Earth Mover's Distance.
///
/// Holds one [`Row`] per source point, each listing only the target points
/// that receive mass from it. Amounts are in the caller's source weight
/// units, so the moves of row `i` add up to the weight of source point `i`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    emd: Energy,
    flow: Units,
    cost: Energy,
    rows: Vec<Row>,
}

/// Mass leaving one source point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    index: usize,
    point: Point,
    moves: Vec<Move>,
}

/// Mass arriving at one target point from the enclosing row's source point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Move {
    index: usize,
    point: Point,
    mass: Mass,
}

impl Plan {
    /// Projects a solved network back onto the point sets.
    ///
    /// Raw arc flows are divided by the target's total weight (and by the
    /// source's quantization scale), and the total cost by the product of
    /// both total weights. Arcs without flow are left out.
    pub fn extract(solution: &Solution, source: &Cloud, target: &Cloud) -> Self {
        let network = solution.network();
        let ws = network.quanta_source().total() as Energy;
        let wt = network.quanta_target().total() as Energy;
        let per = wt * network.quanta_source().scale();
        let mut rows = (0..source.len())
            .map(|i| Row {
                index: i,
                point: source.point(i).clone(),
                moves: Vec::new(),
            })
            .collect::<Vec<_>>();
        for (i, j, units) in network.transfers() {
            rows[i].moves.push(Move {
                index: j,
                point: target.point(j).clone(),
                mass: units as Mass / per,
            });
        }
        Self {
            emd: solution.cost() / (ws * wt),
            flow: solution.flow(),
            cost: solution.cost(),
            rows,
        }
    }

    /// Minimum transport cost normalized by `W(S) * W(T)`.
    pub fn emd(&self) -> Energy {
        self.emd
    }
    /// Raw integer flow routed by the solver.
    pub fn flow(&self) -> Units {
        self.flow
    }
    /// Raw minimum cost before normalization.
    pub fn unnormalized(&self) -> Energy {
        self.cost
    }
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }
    /// Mass moved from source `i` to target `j`.
    pub fn get(&self, i: usize, j: usize) -> Mass {
        self.rows
            .get(i)
            .and_then(|row| row.moves.iter().find(|m| m.index == j))
            .map(|m| m.mass)
            .unwrap_or(0.)
    }
    /// Total mass leaving source `i`.
    pub fn mass(&self, i: usize) -> Mass {
        self.rows
            .get(i)
            .map(|row| row.moves.iter().map(|m| m.mass).sum())
            .unwrap_or(0.)
    }
}

impl Row {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn point(&self) -> &Point {
        &self.point
    }
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }
}

impl Move {
    pub fn index(&self) -> usize {
        self.index
    }
    pub fn point(&self) -> &Point {
        &self.point
    }
    pub fn mass(&self) -> Mass {
        self.mass
    }
}

impl Coupling for Plan {
    type X = usize;
    type Y = usize;
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Mass {
        self.get(*x, *y)
    }
    fn cost(&self) -> Energy {
        self.emd
    }
}
