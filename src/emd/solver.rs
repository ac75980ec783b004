use super::error::Error;
use super::network::Network;
use super::network::Node;
use crate::Energy;
use crate::Units;
use std::collections::VecDeque;

/// Min-cost max-flow via successive shortest augmenting paths.
///
/// # Algorithm
///
/// Starting from the zero flow:
/// 1. Find a cheapest source-to-sink path in the residual graph
/// 2. Push the bottleneck amount along it, capped by the flow still missing
/// 3. Repeat until the expected flow is routed or no path remains
///
/// Twins of loaded arcs carry negated costs, so path search must tolerate
/// negative arc weights. It uses FIFO label correction (SPFA) rather than
/// Dijkstra. Each augmentation along a shortest path keeps the residual
/// graph free of negative cycles, which keeps label correction finite.
/// Relaxation only accepts improvements above a tolerance scaled to the
/// largest arc cost. A node enqueued more often than there are nodes, or a
/// parent chain longer than the node count, means a negative cycle slipped
/// through anyway; that is reported as a conservation failure.
///
/// # Complexity
///
/// O(F · V · E) in the worst case, where F is the number of augmentations.
/// In practice F is close to the number of supply/demand pairs that end
/// up carrying flow.
pub struct Solver {
    network: Network,
    limit: Option<usize>,
    tolerance: Energy,
}

impl Solver {
    pub fn new(network: Network) -> Self {
        let scale = network
            .edges()
            .map(|arc| arc.cost().abs())
            .fold(0., Energy::max);
        Self {
            network,
            limit: None,
            tolerance: crate::RELAXATION_TOLERANCE * scale,
        }
    }
    /// Bounds the number of augmentations before giving up.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn solve(mut self) -> Result<Solution, Error> {
        let expected = self.network.expected();
        let mut routed = 0 as Units;
        let mut augmentations = 0;
        while routed < expected {
            if let Some(limit) = self.limit {
                if augmentations >= limit {
                    return Err(Error::IterationLimit { limit });
                }
            }
            let Some(path) = self.shortest()? else {
                log::debug!("sink unreachable after {} of {} units", routed, expected);
                return Err(Error::UnreachableSink {
                    expected,
                    actual: routed,
                    network: Box::new(self.network),
                });
            };
            let amount = path
                .iter()
                .map(|&e| self.network.arc(e).residual())
                .fold(expected - routed, Units::min);
            for &e in path.iter() {
                self.network.push(e, amount);
            }
            routed += amount;
            augmentations += 1;
            log::trace!(
                "augmentation {} pushed {} units over {} arcs",
                augmentations,
                amount,
                path.len()
            );
        }
        self.check()?;
        let cost = self.network.cost();
        log::debug!(
            "routed {} units at cost {} in {} augmentations",
            routed,
            cost,
            augmentations
        );
        Ok(Solution {
            network: self.network,
            flow: routed,
            cost,
            augmentations,
        })
    }

    /// Cheapest source-to-sink path over arcs with residual capacity,
    /// returned as arc indices from source to sink.
    fn shortest(&self) -> Result<Option<Vec<usize>>, Error> {
        let n = self.network.nodes().len();
        let source = self.network.source();
        let sink = self.network.sink();
        let mut distance = vec![Energy::INFINITY; n];
        let mut parent = vec![None::<usize>; n];
        let mut queued = vec![false; n];
        let mut visits = vec![0usize; n];
        let mut queue = VecDeque::with_capacity(n);
        distance[source] = 0.;
        queued[source] = true;
        queue.push_back(source);
        while let Some(u) = queue.pop_front() {
            queued[u] = false;
            for &e in self.network.outgoing(u) {
                let arc = self.network.arc(e);
                if arc.residual() == 0 {
                    continue;
                }
                let v = arc.head();
                let candidate = distance[u] + arc.cost();
                if candidate < distance[v] - self.tolerance {
                    distance[v] = candidate;
                    parent[v] = Some(e);
                    if !queued[v] {
                        visits[v] += 1;
                        if visits[v] > n {
                            log::debug!("negative residual cycle through node {}", v);
                            return Err(self.violation());
                        }
                        queued[v] = true;
                        queue.push_back(v);
                    }
                }
            }
        }
        let mut path = Vec::new();
        let mut node = sink;
        while node != source {
            let Some(e) = parent[node] else {
                return Ok(None);
            };
            if path.len() >= n {
                log::debug!("parent chain from sink does not reach source");
                return Err(self.violation());
            }
            path.push(e);
            node = self.network.arc(e).tail();
        }
        path.reverse();
        Ok(Some(path))
    }

    /// Verifies capacity bounds, conservation at every inner node, and
    /// saturation at the sink.
    fn check(&self) -> Result<(), Error> {
        let n = self.network.nodes().len();
        let mut inflow = vec![0 as Units; n];
        let mut outflow = vec![0 as Units; n];
        let mut bounded = true;
        for arc in self.network.edges() {
            bounded &= arc.residual() <= arc.capacity();
            inflow[arc.head()] += arc.flow();
            outflow[arc.tail()] += arc.flow();
        }
        let conserved = (0..n)
            .filter(|&v| matches!(self.network.node(v), Node::Supply(_) | Node::Demand(_)))
            .all(|v| inflow[v] == outflow[v]);
        let saturated = inflow[self.network.sink()] == self.network.expected();
        if bounded && conserved && saturated {
            Ok(())
        } else {
            Err(self.violation())
        }
    }

    fn violation(&self) -> Error {
        Error::FlowConservationViolation {
            expected: self.network.expected(),
            actual: self.network.inflow(self.network.sink()),
            network: Box::new(self.network.clone()),
        }
    }
}

/// A solved network with its maximum flow and minimum cost.
#[derive(Debug, Clone)]
pub struct Solution {
    network: Network,
    flow: Units,
    cost: Energy,
    augmentations: usize,
}

impl Solution {
    pub fn network(&self) -> &Network {
        &self.network
    }
    /// Total units routed from source to sink.
    pub fn flow(&self) -> Units {
        self.flow
    }
    /// Unnormalized total cost, in units times distance.
    pub fn cost(&self) -> Energy {
        self.cost
    }
    pub fn augmentations(&self) -> usize {
        self.augmentations
    }
}
