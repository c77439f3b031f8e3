//! Data model for the safety-aware routing engine
//!
//! Contains the road network graph, the per-cycle hazard weight overlay and
//! the point/report record types.

pub mod components;
pub mod network;
pub mod overlay;

pub use components::{
    HazardCategory, HazardReport, PoiCategory, PointOfInterest, ReportStatus, RoadEdge, RoadNode,
};
pub use network::{IndexedPoint, RoadNetwork};
pub use overlay::WeightOverlay;
