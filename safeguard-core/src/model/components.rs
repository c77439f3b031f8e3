//! Road network components and emergency record types

use geo::Point;
use petgraph::graph::NodeIndex;

use crate::OsmNodeId;

/// Road graph node
#[derive(Debug, Clone)]
pub struct RoadNode {
    /// OSM ID of the node
    pub id: OsmNodeId,
    /// Node coordinates
    pub geometry: Point<f64>,
}

/// Road graph edge (street segment)
///
/// Only the physical length is stored on the edge; the hazard-aware weight
/// for a planning cycle lives in [`super::WeightOverlay`].
#[derive(Debug, Clone)]
pub struct RoadEdge {
    /// Physical length in metres, immutable after load
    pub base_weight: f64,
}

/// Category of a point of interest
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiCategory {
    Hospital,
    SafePoint,
}

impl PoiCategory {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "hospital" | "hospitals" => Some(Self::Hospital),
            "safe_point" | "safe_points" => Some(Self::SafePoint),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hospital => "hospital",
            Self::SafePoint => "safe_point",
        }
    }
}

/// A destination candidate, already snapped to its nearest graph node.
#[derive(Debug, Clone)]
pub struct PointOfInterest {
    pub id: String,
    pub name: String,
    pub category: PoiCategory,
    /// Nearest road-graph node, resolved at ingestion
    pub node: NodeIndex,
    pub geometry: Point<f64>,
}

/// Category of a hazard report.
///
/// Blocking categories make the surrounding roads prohibitively expensive;
/// the rest are point reports with no effect on traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HazardCategory {
    Earthquake,
    Fire,
    Tsunami,
    Flood,
    Explosive,
    Medical,
    Other,
}

impl HazardCategory {
    /// Reports are typed free-text upstream; match case-insensitively and
    /// treat anything unknown as informational.
    pub fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "earthquake" => Self::Earthquake,
            "fire" | "wildfire" => Self::Fire,
            "tsunami" => Self::Tsunami,
            "flood" => Self::Flood,
            "explosive" | "bomb" => Self::Explosive,
            "medical" | "sickness" => Self::Medical,
            _ => Self::Other,
        }
    }

    /// `true` for categories that make the surrounding roads impassable
    pub fn is_blocking(self) -> bool {
        matches!(
            self,
            Self::Earthquake | Self::Fire | Self::Tsunami | Self::Flood | Self::Explosive
        )
    }
}

/// Lifecycle status of a hazard report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportStatus {
    Active,
    Resolved,
}

impl ReportStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "active" => Some(Self::Active),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }
}

/// A validated hazard report
#[derive(Debug, Clone)]
pub struct HazardReport {
    pub id: String,
    pub category: HazardCategory,
    pub geometry: Point<f64>,
    pub status: ReportStatus,
}

impl HazardReport {
    pub fn is_active(&self) -> bool {
        self.status == ReportStatus::Active
    }
}
