//! Per-cycle hazard weight overlay.
//!
//! Each planning cycle builds a fresh overlay snapshot from the currently
//! active reports instead of mutating shared graph state: the reset to base
//! weights is implicit in the rebuild, and in-flight searches keep reading
//! the snapshot they started with.

use log::{info, warn};
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::EdgeRef;

use super::components::HazardReport;
use super::network::RoadNetwork;

/// One traversal weight per graph edge, indexed by edge index.
///
/// Invariant: every weight is `base_weight * f` for some `f >= 1`, so the
/// overlay only ever inflates.
#[derive(Debug, Clone)]
pub struct WeightOverlay {
    weights: Vec<f64>,
}

impl WeightOverlay {
    /// Overlay with every edge at its physical length (the reset state).
    pub fn base(network: &RoadNetwork) -> Self {
        Self {
            weights: network
                .graph
                .edge_weights()
                .map(|edge| edge.base_weight)
                .collect(),
        }
    }

    /// Builds the overlay for one planning cycle: reset to base weights,
    /// then inflate the surroundings of every active blocking report.
    ///
    /// Reports that cannot be snapped to the network are skipped; they must
    /// not abort the cycle.
    pub fn from_reports(
        network: &RoadNetwork,
        reports: &[HazardReport],
        penalty_factor: f64,
    ) -> Self {
        let mut overlay = Self::base(network);

        for report in reports.iter().filter(|r| r.is_active()) {
            if !report.category.is_blocking() {
                info!(
                    "{:?} report {}: point alert, roads unaffected",
                    report.category, report.id
                );
                continue;
            }

            match network.nearest_node(&report.geometry) {
                Ok(node) => {
                    let inflated = overlay.inflate_around(network, node, penalty_factor);
                    warn!(
                        "{:?} report {}: inflated {inflated} edges around node {}",
                        report.category,
                        report.id,
                        node.index()
                    );
                }
                Err(err) => {
                    warn!(
                        "{:?} report {} could not be snapped to the network: {err}",
                        report.category, report.id
                    );
                }
            }
        }

        overlay
    }

    /// Inflates every edge incident to `node`. The new weight is computed
    /// from the base weight, not the current one, so applying the same
    /// report twice in a cycle cannot compound.
    fn inflate_around(&mut self, network: &RoadNetwork, node: NodeIndex, factor: f64) -> usize {
        let mut inflated = 0;
        for edge in network.graph.edges(node) {
            self.weights[edge.id().index()] = edge.weight().base_weight * factor;
            inflated += 1;
        }
        inflated
    }

    /// Current weight of a single edge.
    pub fn edge_weight(&self, edge: EdgeIndex) -> f64 {
        self.weights[edge.index()]
    }

    /// Effective traversal weight between two adjacent nodes: the minimum
    /// current weight over parallel edges, `f64::INFINITY` when the nodes
    /// are not adjacent.
    pub fn weight(&self, network: &RoadNetwork, a: NodeIndex, b: NodeIndex) -> f64 {
        network
            .graph
            .edges_connecting(a, b)
            .map(|edge| self.weights[edge.id().index()])
            .fold(f64::INFINITY, f64::min)
    }
}
