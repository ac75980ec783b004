use super::cloud::Cloud;
use super::cloud::Quanta;
use super::error::Error;
use super::matrix::Matrix;
use crate::Energy;
use crate::Units;

/// Role of a node in the transportation network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Node {
    Source,
    Sink,
    /// One per source point.
    Supply(usize),
    /// One per target point.
    Demand(usize),
}

/// A directed residual arc.
///
/// Arcs come in pairs: the forward arc at an even index carries the
/// original capacity and cost, its twin at the next odd index starts with
/// zero capacity and negated cost. Pushing flow along one arc frees the
/// same amount of residual capacity on its twin.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    tail: usize,
    head: usize,
    capacity: Units,
    residual: Units,
    cost: Energy,
}

impl Edge {
    pub fn tail(&self) -> usize {
        self.tail
    }
    pub fn head(&self) -> usize {
        self.head
    }
    pub fn capacity(&self) -> Units {
        self.capacity
    }
    pub fn residual(&self) -> Units {
        self.residual
    }
    pub fn cost(&self) -> Energy {
        self.cost
    }
    /// Flow carried by a forward arc. Always zero for twins.
    pub fn flow(&self) -> Units {
        self.capacity.saturating_sub(self.residual)
    }
}

/// Bipartite transportation network between two weighted point sets.
///
/// Nodes live in an arena indexed as `[source, sink, supply.., demand..]`
/// and arcs reference them by index.
///
/// - `source -> supply(i)` has capacity `W(T) * w(S_i)` and zero cost
/// - `demand(j) -> sink` has capacity `W(S) * w(T_j)` and zero cost
/// - `supply(i) -> demand(j)` has capacity `W(S) * W(T)` and cost `d(S_i, T_j)`
///
/// where `w` are the quantized weights and `W` their totals. Both outer
/// layers then carry exactly `W(S) * W(T)` units, so a maximum flow
/// saturates every supply and every demand regardless of how the two
/// total masses compare.
#[derive(Debug, Clone)]
pub struct Network {
    nodes: Vec<Node>,
    arcs: Vec<Edge>,
    outgoing: Vec<Vec<usize>>,
    source: Quanta,
    target: Quanta,
    expected: Units,
}

impl Network {
    pub fn build(source: &Cloud, target: &Cloud, matrix: &Matrix) -> Result<Self, Error> {
        let qs = source.quantize()?;
        let qt = target.quantize()?;
        debug_assert_eq!(matrix.rows(), qs.units().len());
        debug_assert_eq!(matrix.cols(), qt.units().len());
        let ws = qs.total();
        let wt = qt.total();
        let expected = ws.checked_mul(wt).ok_or(Error::CapacityOverflow)?;
        let n = qs.units().len();
        let m = qt.units().len();
        let mut network = Self {
            nodes: std::iter::empty()
                .chain([Node::Source, Node::Sink])
                .chain((0..n).map(Node::Supply))
                .chain((0..m).map(Node::Demand))
                .collect(),
            arcs: Vec::with_capacity(2 * (n + m + n * m)),
            outgoing: vec![Vec::new(); 2 + n + m],
            source: qs,
            target: qt,
            expected,
        };
        for i in 0..n {
            let capacity = wt
                .checked_mul(network.source.unit(i))
                .ok_or(Error::CapacityOverflow)?;
            network.link(network.source(), network.supply(i), capacity, 0.);
        }
        for j in 0..m {
            let capacity = ws
                .checked_mul(network.target.unit(j))
                .ok_or(Error::CapacityOverflow)?;
            network.link(network.demand(j), network.sink(), capacity, 0.);
        }
        for i in 0..n {
            for j in 0..m {
                network.link(network.supply(i), network.demand(j), expected, matrix.get(i, j));
            }
        }
        log::debug!(
            "network with {} nodes, {} arcs, {} units to route",
            network.nodes.len(),
            network.arcs.len(),
            expected
        );
        Ok(network)
    }

    /// Adds a forward arc and its zero-capacity twin.
    fn link(&mut self, tail: usize, head: usize, capacity: Units, cost: Energy) {
        let e = self.arcs.len();
        self.arcs.push(Edge {
            tail,
            head,
            capacity,
            residual: capacity,
            cost,
        });
        self.arcs.push(Edge {
            tail: head,
            head: tail,
            capacity: 0,
            residual: 0,
            cost: -cost,
        });
        self.outgoing[tail].push(e);
        self.outgoing[head].push(e + 1);
    }

    /// Moves `amount` units along arc `e`, crediting its twin.
    pub(crate) fn push(&mut self, e: usize, amount: Units) {
        debug_assert!(self.arcs[e].residual >= amount);
        self.arcs[e].residual -= amount;
        self.arcs[Self::twin(e)].residual += amount;
    }

    pub const fn source(&self) -> usize {
        0
    }
    pub const fn sink(&self) -> usize {
        1
    }
    pub fn supply(&self, i: usize) -> usize {
        2 + i
    }
    pub fn demand(&self, j: usize) -> usize {
        2 + self.source.units().len() + j
    }
    pub fn node(&self, index: usize) -> Node {
        self.nodes[index]
    }
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }
    pub fn arc(&self, e: usize) -> &Edge {
        &self.arcs[e]
    }
    pub fn arcs(&self) -> &[Edge] {
        &self.arcs
    }
    /// Residual arcs leaving a node, forward and twin alike.
    pub fn outgoing(&self, node: usize) -> &[usize] {
        &self.outgoing[node]
    }
    pub const fn twin(e: usize) -> usize {
        e ^ 1
    }
    /// Original arcs of the network, excluding residual twins.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.arcs.iter().step_by(2)
    }
    /// The flow value a correct solve must reach: `W(S) * W(T)`.
    pub fn expected(&self) -> Units {
        self.expected
    }
    pub fn quanta_source(&self) -> &Quanta {
        &self.source
    }
    pub fn quanta_target(&self) -> &Quanta {
        &self.target
    }

    pub fn capacity_out_of_source(&self) -> Units {
        self.edges()
            .filter(|a| a.tail == self.source())
            .map(|a| a.capacity)
            .sum()
    }
    pub fn capacity_into_sink(&self) -> Units {
        self.edges()
            .filter(|a| a.head == self.sink())
            .map(|a| a.capacity)
            .sum()
    }
    /// Total flow entering a node over original arcs.
    pub fn inflow(&self, node: usize) -> Units {
        self.edges()
            .filter(|a| a.head == node)
            .map(Edge::flow)
            .sum()
    }
    /// Total flow leaving a node over original arcs.
    pub fn outflow(&self, node: usize) -> Units {
        self.edges()
            .filter(|a| a.tail == node)
            .map(Edge::flow)
            .sum()
    }
    /// Sum of flow times cost over original arcs.
    pub fn cost(&self) -> Energy {
        self.edges()
            .map(|a| a.flow() as Energy * a.cost)
            .sum()
    }
    /// Positive flows between supply `i` and demand `j`, as `(i, j, units)`.
    pub fn transfers(&self) -> impl Iterator<Item = (usize, usize, Units)> + '_ {
        self.edges()
            .filter(|a| a.flow() > 0)
            .filter_map(|a| match (self.node(a.tail), self.node(a.head)) {
                (Node::Supply(i), Node::Demand(j)) => Some((i, j, a.flow())),
                _ => None,
            })
    }

    /// Overrides the capacity of a forward arc.
    #[cfg(test)]
    pub(crate) fn choke(&mut self, e: usize, capacity: Units) {
        self.arcs[e].capacity = capacity;
        self.arcs[e].residual = capacity;
    }
}
