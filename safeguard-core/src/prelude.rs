pub use crate::{BLOCKED_DISTANCE_CAP, DANGER_MARGIN, HAZARD_PENALTY_FACTOR, MAX_CANDIDATE_POINTS};

// Re-export key components
pub use crate::error::Error;
pub use crate::evaluate::{
    PlanningConfig, RouteEvaluation, SkipReason, evaluate_destination, evaluations_to_geojson,
    nearest_candidates, rank_destinations,
};
pub use crate::loading::{
    HazardRecord, NetworkSnapshot, PointRecord, build_road_network, create_road_network,
    resolve_points, validate_reports,
};
pub use crate::model::{
    HazardCategory, HazardReport, PoiCategory, PointOfInterest, ReportStatus, RoadNetwork,
    WeightOverlay,
};
pub use crate::routing::{SearchResult, baseline_dijkstra, bidirectional_dijkstra};

// Core type aliases
pub use crate::OsmNodeId;
