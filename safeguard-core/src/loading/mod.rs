//! This module is responsible for loading the road-network snapshot and for
//! validating the point/report documents coming from the external stores.

mod records;
mod snapshot;

pub use records::{HazardRecord, PointRecord, resolve_points, validate_reports};
pub use snapshot::{NetworkSnapshot, SnapshotEdge, SnapshotNode, build_road_network, create_road_network};
