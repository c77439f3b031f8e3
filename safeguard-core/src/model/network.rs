//! Road network graph with a spatial index for coordinate snapping

use geo::Point;
use petgraph::graph::{NodeIndex, UnGraph};
use rstar::RTree;
use rstar::primitives::GeomWithData;

use super::components::{RoadEdge, RoadNode};
use crate::error::Error;

/// Entry stored in the R-tree spatial index: a `[lon, lat]` point with the
/// associated graph node index.
pub type IndexedPoint = GeomWithData<[f64; 2], NodeIndex>;

/// Static road-network topology.
///
/// Nodes, edge endpoints and base weights never change after construction;
/// the hazard-aware weights for one planning cycle live in a separate
/// [`super::WeightOverlay`] snapshot so concurrent requests never observe a
/// half-updated graph.
#[derive(Debug, Clone)]
pub struct RoadNetwork {
    pub graph: UnGraph<RoadNode, RoadEdge>,
    rtree: RTree<IndexedPoint>,
}

impl RoadNetwork {
    /// Wraps a finished graph and builds the spatial index over its nodes.
    pub fn new(graph: UnGraph<RoadNode, RoadEdge>) -> Self {
        let rtree = RTree::bulk_load(
            graph
                .node_indices()
                .map(|idx| {
                    let point = graph[idx].geometry;
                    IndexedPoint::new([point.x(), point.y()], idx)
                })
                .collect(),
        );
        Self { graph, rtree }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Coordinates of a graph node.
    ///
    /// # Errors
    ///
    /// Returns an error if the index does not belong to this graph.
    pub fn coordinates(&self, node: NodeIndex) -> Result<Point<f64>, Error> {
        self.graph
            .node_weight(node)
            .map(|n| n.geometry)
            .ok_or(Error::InvalidNodeIndex)
    }

    /// Snaps an arbitrary coordinate to the nearest graph node.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoPointsFound`] when the graph has no nodes.
    pub fn nearest_node(&self, point: &Point<f64>) -> Result<NodeIndex, Error> {
        self.rtree
            .nearest_neighbor(&[point.x(), point.y()])
            .map(|entry| entry.data)
            .ok_or(Error::NoPointsFound)
    }

    /// Physical length between two adjacent nodes: the minimum base weight
    /// over parallel edges, `f64::INFINITY` when the nodes are not adjacent.
    pub fn base_weight(&self, a: NodeIndex, b: NodeIndex) -> f64 {
        self.graph
            .edges_connecting(a, b)
            .map(|edge| edge.weight().base_weight)
            .fold(f64::INFINITY, f64::min)
    }
}
