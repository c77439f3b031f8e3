//! Shortest-path search over the road network

pub mod baseline;
pub mod bidirectional;
mod state;

pub use baseline::baseline_dijkstra;
pub use bidirectional::bidirectional_dijkstra;

use petgraph::graph::NodeIndex;

/// Outcome of a shortest-path query
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// Total path cost, `f64::INFINITY` when the target is unreachable
    pub cost: f64,
    /// Node sequence from source to target, empty when unreachable
    pub path: Vec<NodeIndex>,
}

impl SearchResult {
    pub fn unreachable() -> Self {
        Self {
            cost: f64::INFINITY,
            path: Vec::new(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.cost.is_infinite()
    }
}
