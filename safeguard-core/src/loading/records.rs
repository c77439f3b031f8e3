//! Ingestion boundary for point and hazard documents.
//!
//! The upstream document store is loosely typed; everything beyond the id
//! is optional in the raw records. Validation happens here, before any
//! record reaches the engine: malformed documents are skipped with a
//! warning and must never turn into request failures.

use geo::Point;
use log::warn;
use serde::Deserialize;

use crate::model::{
    HazardCategory, HazardReport, PoiCategory, PointOfInterest, ReportStatus, RoadNetwork,
};

/// Point-of-interest document as stored upstream
#[derive(Debug, Clone, Deserialize)]
pub struct PointRecord {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
}

/// Hazard report document as stored upstream
#[derive(Debug, Clone, Deserialize)]
pub struct HazardRecord {
    pub id: String,
    #[serde(rename = "type")]
    pub category: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub status: Option<String>,
}

/// Validates raw point documents and snaps each to its nearest graph node.
pub fn resolve_points(network: &RoadNetwork, records: Vec<PointRecord>) -> Vec<PointOfInterest> {
    records
        .into_iter()
        .filter_map(|record| {
            let (Some(lat), Some(lng)) = (record.lat, record.lng) else {
                warn!("Point {} has no coordinates, skipping", record.id);
                return None;
            };
            let Some(category) = record.category.as_deref().and_then(PoiCategory::parse)
            else {
                warn!("Point {} has an unknown category, skipping", record.id);
                return None;
            };
            let geometry = Point::new(lng, lat);
            let node = match network.nearest_node(&geometry) {
                Ok(node) => node,
                Err(err) => {
                    warn!("Could not snap point {} to the road network: {err}", record.id);
                    return None;
                }
            };
            Some(PointOfInterest {
                id: record.id,
                name: record.name.unwrap_or_else(|| "N/A".to_string()),
                category,
                node,
                geometry,
            })
        })
        .collect()
}

/// Validates raw hazard documents.
///
/// Reports missing a coordinate or carrying an unknown status are dropped;
/// unknown categories survive as informational reports.
pub fn validate_reports(records: Vec<HazardRecord>) -> Vec<HazardReport> {
    records
        .into_iter()
        .filter_map(|record| {
            let (Some(lat), Some(lng)) = (record.lat, record.lng) else {
                warn!("Hazard report {} has no coordinates, skipping", record.id);
                return None;
            };
            let Some(status) = record.status.as_deref().and_then(ReportStatus::parse) else {
                warn!("Hazard report {} has an invalid status, skipping", record.id);
                return None;
            };
            let category = HazardCategory::parse(record.category.as_deref().unwrap_or(""));
            Some(HazardReport {
                id: record.id,
                category,
                geometry: Point::new(lng, lat),
                status,
            })
        })
        .collect()
}
