//! Road-network snapshot processing.
//!
//! The snapshot format belongs to the geospatial provider; this module only
//! validates the records and assembles the routable graph. The network is
//! loaded once per process and shared read-only afterwards.

use std::path::Path;

use geo::Point;
use hashbrown::HashMap;
use log::{info, warn};
use petgraph::graph::{NodeIndex, UnGraph};
use serde::Deserialize;

use crate::OsmNodeId;
use crate::error::Error;
use crate::model::{RoadEdge, RoadNetwork, RoadNode};

/// Road-network export produced by the geospatial provider
#[derive(Debug, Deserialize)]
pub struct NetworkSnapshot {
    pub nodes: Vec<SnapshotNode>,
    pub edges: Vec<SnapshotEdge>,
}

#[derive(Debug, Deserialize)]
pub struct SnapshotNode {
    pub id: OsmNodeId,
    pub lat: f64,
    pub lon: f64,
}

/// Multiple records for the same node pair are legal and become parallel
/// edges (dual carriageways, a service road next to the main road).
#[derive(Debug, Deserialize)]
pub struct SnapshotEdge {
    pub source: OsmNodeId,
    pub target: OsmNodeId,
    /// Physical length in metres
    pub length: f64,
}

/// Reads a snapshot file and builds the graph with its spatial index.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn create_road_network(path: &Path) -> Result<RoadNetwork, Error> {
    info!("Loading road network snapshot: {}", path.display());

    let file = std::fs::File::open(path)?;
    let snapshot: NetworkSnapshot = serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| Error::InvalidData(format!("malformed network snapshot: {e}")))?;

    let network = build_road_network(snapshot);
    info!(
        "Road network ready: {} nodes, {} edges",
        network.node_count(),
        network.edge_count()
    );
    Ok(network)
}

/// Assembles the graph from already-parsed snapshot records.
///
/// Edge records pointing at unknown nodes or carrying a non-finite or
/// negative length are skipped with a warning; search requires non-negative
/// weights and a dangling endpoint has nothing to attach to.
pub fn build_road_network(snapshot: NetworkSnapshot) -> RoadNetwork {
    let mut graph = UnGraph::with_capacity(snapshot.nodes.len(), snapshot.edges.len());
    let mut node_ids: HashMap<OsmNodeId, NodeIndex> =
        HashMap::with_capacity(snapshot.nodes.len());

    for node in snapshot.nodes {
        let idx = graph.add_node(RoadNode {
            id: node.id,
            geometry: Point::new(node.lon, node.lat),
        });
        node_ids.insert(node.id, idx);
    }

    let mut skipped = 0usize;
    for edge in snapshot.edges {
        let (Some(&a), Some(&b)) = (node_ids.get(&edge.source), node_ids.get(&edge.target))
        else {
            skipped += 1;
            continue;
        };
        if !edge.length.is_finite() || edge.length < 0.0 {
            skipped += 1;
            continue;
        }
        graph.add_edge(
            a,
            b,
            RoadEdge {
                base_weight: edge.length,
            },
        );
    }
    if skipped > 0 {
        warn!("{skipped} malformed snapshot edge records skipped");
    }

    RoadNetwork::new(graph)
}
