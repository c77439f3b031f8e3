//! Baseline shortest-path reference over physical edge lengths

use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::SearchResult;
use super::state::State;
use crate::model::RoadNetwork;

/// Unidirectional Dijkstra between `source` and `target` using base weights
/// only, ignoring any hazard overlay.
///
/// This is the safety reference a hazard-aware route is compared against;
/// it is never returned to the user as the route itself. Relaxing every
/// parallel edge individually yields the same min-of-parallel cost
/// semantics as the bidirectional search.
pub fn baseline_dijkstra(
    network: &RoadNetwork,
    source: NodeIndex,
    target: NodeIndex,
) -> SearchResult {
    if source == target {
        return SearchResult {
            cost: 0.0,
            path: vec![source],
        };
    }

    // Estimate capacity based on graph size (adjust as needed)
    let estimated_nodes = network.graph.node_count().min(1000);
    let mut distances: HashMap<NodeIndex, f64> = HashMap::with_capacity(estimated_nodes);
    let mut predecessors: HashMap<NodeIndex, NodeIndex> = HashMap::with_capacity(estimated_nodes);
    let mut heap = BinaryHeap::with_capacity(estimated_nodes / 4);

    // Start node has distance 0
    heap.push(State {
        cost: 0.0,
        node: source,
    });
    distances.insert(source, 0.0);

    while let Some(State { cost, node }) = heap.pop() {
        // The first pop of the target settles it
        if node == target {
            break;
        }

        // Skip if we've found a better path
        if let Some(&best) = distances.get(&node) {
            if cost > best {
                continue;
            }
        }

        // Examine neighbors
        for edge in network.graph.edges(node) {
            let next = edge.target();
            let next_cost = cost + edge.weight().base_weight;

            // Add or update distance if better using Entry API
            match distances.entry(next) {
                hashbrown::hash_map::Entry::Vacant(entry) => {
                    entry.insert(next_cost);
                    heap.push(State {
                        cost: next_cost,
                        node: next,
                    });
                    predecessors.insert(next, node);
                }
                hashbrown::hash_map::Entry::Occupied(mut entry) => {
                    if next_cost < *entry.get() {
                        *entry.get_mut() = next_cost;
                        heap.push(State {
                            cost: next_cost,
                            node: next,
                        });
                        predecessors.insert(next, node);
                    }
                }
            }
        }
    }

    let Some(&cost) = distances.get(&target) else {
        return SearchResult::unreachable();
    };

    // Follow predecessors backward from target to source
    let mut path = Vec::new();
    let mut current = target;
    while current != source {
        path.push(current);
        match predecessors.get(&current) {
            Some(&prev) => current = prev,
            None => return SearchResult::unreachable(),
        }
    }
    path.push(source);
    path.reverse();

    SearchResult { cost, path }
}
