use geo::{Coord, LineString};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::json;

use super::RouteEvaluation;
use crate::Error;

impl RouteEvaluation {
    /// Converts the evaluation to a `GeoJSON` Feature.
    ///
    /// The geometry is the hazard-aware polyline; blocked routes carry a
    /// null geometry, matching their suppressed path.
    pub fn to_feature(&self) -> Result<Feature, Error> {
        let geometry = if self.polyline.is_empty() {
            serde_json::Value::Null
        } else {
            let coords: Vec<Coord<f64>> = self.polyline.iter().map(|p| (*p).into()).collect();
            serde_json::to_value(Geometry::new(GeoJsonValue::from(&LineString::new(coords))))
                .map_err(|e| Error::GeoJsonError(e.to_string()))?
        };

        let value = json!({
            "type": "Feature",
            "geometry": geometry,
            "properties": {
                "name": self.point.name,
                "category": self.point.category.as_str(),
                "distance": self.reported_distance,
                "baseline_distance": self.baseline_distance,
                "dangerous": self.is_dangerous,
                "blocked": self.is_blocked,
            }
        });

        serde_json::from_value(value).map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

/// Bundles ranked evaluations into a `FeatureCollection` for map tooling.
pub fn evaluations_to_geojson(evaluations: &[RouteEvaluation]) -> Result<FeatureCollection, Error> {
    let features = evaluations
        .iter()
        .map(RouteEvaluation::to_feature)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(FeatureCollection {
        features,
        bbox: None,
        foreign_members: None,
    })
}
