//! Meet-in-the-middle shortest-path search.
//!
//! Explores from both endpoints at once, which bounds the visited area to
//! roughly two half-radius balls instead of one full-radius ball on large
//! road networks.

use std::collections::BinaryHeap;

use hashbrown::{HashMap, HashSet};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::SearchResult;
use super::state::State;
use crate::model::RoadNetwork;

/// One search direction: tentative distances, parent links, the settled set
/// and the priority frontier.
struct Frontier {
    dist: HashMap<NodeIndex, f64>,
    parent: HashMap<NodeIndex, NodeIndex>,
    settled: HashSet<NodeIndex>,
    heap: BinaryHeap<State>,
}

impl Frontier {
    fn seeded(start: NodeIndex) -> Self {
        let mut dist = HashMap::new();
        dist.insert(start, 0.0);
        let mut heap = BinaryHeap::new();
        heap.push(State {
            cost: 0.0,
            node: start,
        });
        Self {
            dist,
            parent: HashMap::new(),
            settled: HashSet::new(),
            heap,
        }
    }

    fn min_key(&self) -> Option<f64> {
        self.heap.peek().map(|state| state.cost)
    }
}

/// Bidirectional Dijkstra between `source` and `target` under an arbitrary
/// weight function.
///
/// `weight` receives two adjacent node indices and must return the
/// effective traversal cost between them (minimum over parallel edges).
/// Passing the weight in keeps the algorithm usable for the hazard-aware
/// overlay as well as hypothetical what-if weight models.
pub fn bidirectional_dijkstra<F>(
    network: &RoadNetwork,
    source: NodeIndex,
    target: NodeIndex,
    weight: F,
) -> SearchResult
where
    F: Fn(NodeIndex, NodeIndex) -> f64,
{
    if source == target {
        return SearchResult {
            cost: 0.0,
            path: vec![source],
        };
    }

    let mut forward = Frontier::seeded(source);
    let mut backward = Frontier::seeded(target);

    // Best joint cost through a node labelled by both directions
    let mut mu = f64::INFINITY;
    let mut meeting_node: Option<NodeIndex> = None;

    while let (Some(forward_min), Some(backward_min)) = (forward.min_key(), backward.min_key()) {
        // Stopping bound for bidirectional Dijkstra: once the frontier
        // minima sum past the best meeting cost, no cheaper meeting exists.
        if forward_min + backward_min >= mu {
            break;
        }

        expand(
            &mut forward,
            &backward,
            network,
            &weight,
            &mut mu,
            &mut meeting_node,
        );
        expand(
            &mut backward,
            &forward,
            network,
            &weight,
            &mut mu,
            &mut meeting_node,
        );
    }

    let Some(meeting) = meeting_node else {
        return SearchResult::unreachable();
    };

    // Forward parents walk meeting -> source, reversed into source ->
    // meeting; the backward chain then continues to the target. The meeting
    // node appears exactly once.
    let mut path = Vec::new();
    let mut current = Some(meeting);
    while let Some(node) = current {
        path.push(node);
        current = forward.parent.get(&node).copied();
    }
    path.reverse();

    let mut current = backward.parent.get(&meeting).copied();
    while let Some(node) = current {
        path.push(node);
        current = backward.parent.get(&node).copied();
    }

    SearchResult { cost: mu, path }
}

/// Settles one node from `frontier`, relaxing its incident edges and
/// updating the best known meeting cost against the opposite direction.
fn expand<F>(
    frontier: &mut Frontier,
    opposite: &Frontier,
    network: &RoadNetwork,
    weight: &F,
    mu: &mut f64,
    meeting_node: &mut Option<NodeIndex>,
) where
    F: Fn(NodeIndex, NodeIndex) -> f64,
{
    let Some(State { node, .. }) = frontier.heap.pop() else {
        return;
    };
    if !frontier.settled.insert(node) {
        return;
    }

    let node_dist = frontier.dist[&node];
    for edge in network.graph.edges(node) {
        let next = edge.target();
        let next_cost = node_dist + weight(node, next);

        if next_cost < frontier.dist.get(&next).copied().unwrap_or(f64::INFINITY) {
            frontier.dist.insert(next, next_cost);
            frontier.parent.insert(next, node);
            frontier.heap.push(State {
                cost: next_cost,
                node: next,
            });
        }

        // The opposite direction has already labelled this neighbor: a
        // meeting candidate whenever the joint cost beats the best so far.
        if let (Some(&own), Some(&other)) = (frontier.dist.get(&next), opposite.dist.get(&next))
            && own + other < *mu
        {
            *mu = own + other;
            *meeting_node = Some(next);
        }
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;
    use petgraph::graph::{NodeIndex, UnGraph};

    use super::*;
    use crate::routing::baseline_dijkstra;
    use crate::model::{RoadEdge, RoadNode};

    fn network(nodes: usize, edges: &[(usize, usize, f64)]) -> RoadNetwork {
        let mut graph = UnGraph::new_undirected();
        let idx: Vec<NodeIndex> = (0..nodes)
            .map(|i| {
                graph.add_node(RoadNode {
                    id: i as i64,
                    geometry: Point::new(i as f64 * 0.01, 0.0),
                })
            })
            .collect();
        for &(a, b, w) in edges {
            graph.add_edge(idx[a], idx[b], RoadEdge { base_weight: w });
        }
        RoadNetwork::new(graph)
    }

    /// Diamond: A(0) - B(1) - D(3) of length 10 against A - C(2) - D of
    /// length 12.
    fn diamond() -> RoadNetwork {
        network(4, &[(0, 1, 5.0), (1, 3, 5.0), (0, 2, 6.0), (2, 3, 6.0)])
    }

    #[test]
    fn diamond_takes_the_shorter_branch() {
        let net = diamond();
        let result = bidirectional_dijkstra(&net, NodeIndex::new(0), NodeIndex::new(3), |a, b| {
            net.base_weight(a, b)
        });

        assert_eq!(result.cost, 10.0);
        assert_eq!(
            result.path,
            vec![NodeIndex::new(0), NodeIndex::new(1), NodeIndex::new(3)]
        );
    }

    #[test]
    fn source_equals_target_is_trivial() {
        let net = diamond();
        let result = bidirectional_dijkstra(&net, NodeIndex::new(2), NodeIndex::new(2), |a, b| {
            net.base_weight(a, b)
        });

        assert_eq!(result.cost, 0.0);
        assert_eq!(result.path, vec![NodeIndex::new(2)]);
    }

    #[test]
    fn disconnected_target_is_unreachable() {
        let net = network(5, &[(0, 1, 1.0), (1, 2, 1.0), (3, 4, 1.0)]);
        let result = bidirectional_dijkstra(&net, NodeIndex::new(0), NodeIndex::new(4), |a, b| {
            net.base_weight(a, b)
        });

        assert!(result.is_unreachable());
        assert!(result.path.is_empty());
    }

    #[test]
    fn agrees_with_unidirectional_reference_on_all_pairs() {
        // Irregular graph with a cycle, a shortcut and a pendant node
        let net = network(
            7,
            &[
                (0, 1, 4.0),
                (0, 2, 1.0),
                (2, 1, 2.0),
                (1, 3, 5.0),
                (2, 3, 8.0),
                (3, 4, 3.0),
                (1, 4, 10.0),
                (4, 5, 1.0),
                (5, 6, 2.0),
                (3, 6, 7.0),
            ],
        );

        for s in 0..7 {
            for t in 0..7 {
                let source = NodeIndex::new(s);
                let target = NodeIndex::new(t);
                let reference = baseline_dijkstra(&net, source, target);
                let result = bidirectional_dijkstra(&net, source, target, |a, b| {
                    net.base_weight(a, b)
                });
                assert_eq!(result.cost, reference.cost, "pair ({s}, {t})");
            }
        }
    }

    #[test]
    fn path_weight_adds_up_to_reported_cost() {
        let net = network(
            6,
            &[
                (0, 1, 3.0),
                (1, 2, 4.0),
                (2, 5, 6.0),
                (0, 3, 2.0),
                (3, 4, 9.0),
                (4, 5, 1.0),
            ],
        );
        let result = bidirectional_dijkstra(&net, NodeIndex::new(0), NodeIndex::new(5), |a, b| {
            net.base_weight(a, b)
        });

        let total: f64 = result
            .path
            .windows(2)
            .map(|pair| net.base_weight(pair[0], pair[1]))
            .sum();
        assert_eq!(total, result.cost);
    }

    #[test]
    fn respects_the_supplied_weight_function() {
        // Flat weights make the diamond's hop count decide: B branch and C
        // branch tie at 2 hops, but penalizing B reroutes through C.
        let net = diamond();
        let result = bidirectional_dijkstra(&net, NodeIndex::new(0), NodeIndex::new(3), |a, b| {
            if a == NodeIndex::new(1) || b == NodeIndex::new(1) {
                1_000.0
            } else {
                net.base_weight(a, b)
            }
        });

        assert_eq!(result.cost, 12.0);
        assert_eq!(
            result.path,
            vec![NodeIndex::new(0), NodeIndex::new(2), NodeIndex::new(3)]
        );
    }

    #[test]
    fn meeting_node_appears_once_in_longer_paths() {
        // Chain of 9 nodes forces a meeting somewhere in the middle
        let edges: Vec<(usize, usize, f64)> = (0..8).map(|i| (i, i + 1, 1.0)).collect();
        let net = network(9, &edges);
        let result = bidirectional_dijkstra(&net, NodeIndex::new(0), NodeIndex::new(8), |a, b| {
            net.base_weight(a, b)
        });

        assert_eq!(result.cost, 8.0);
        let expected: Vec<NodeIndex> = (0..9).map(NodeIndex::new).collect();
        assert_eq!(result.path, expected);
    }
}
