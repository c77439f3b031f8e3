//! HTTP handlers for the planning endpoints.

use std::sync::Arc;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::info;

use safeguard_core::Error;
use safeguard_core::evaluate::{
    PlanningConfig, RouteEvaluation, evaluations_to_geojson, rank_destinations,
};
use safeguard_core::loading::{resolve_points, validate_reports};
use safeguard_core::model::{RoadNetwork, WeightOverlay};

use crate::store::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub network: Arc<RoadNetwork>,
    pub store: DocumentStore,
    pub planning: PlanningConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/safe-points/sorted", post(sorted_safe_points))
        .route("/api/safe-points/geojson", post(safe_points_geojson))
        .with_state(state)
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct UserLocation {
    pub lat: f64,
    pub lng: f64,
}

/// Wire format of one ranked destination, field names fixed by the mobile
/// client.
#[derive(Debug, Serialize)]
struct SafePointRecord {
    title: String,
    #[serde(rename = "type")]
    kind: &'static str,
    lat: f64,
    lng: f64,
    distance: f64,
    dist_real: f64,
    #[serde(rename = "isDangerous")]
    is_dangerous: bool,
    #[serde(rename = "isBlocked")]
    is_blocked: bool,
    /// `[lat, lng]` pairs in path order
    polyline: Vec<[f64; 2]>,
    exec_time_baseline: f64,
    exec_time_research: f64,
}

impl From<RouteEvaluation> for SafePointRecord {
    fn from(evaluation: RouteEvaluation) -> Self {
        Self {
            title: evaluation.point.name,
            kind: evaluation.point.category.as_str(),
            lat: evaluation.point.geometry.y(),
            lng: evaluation.point.geometry.x(),
            distance: evaluation.reported_distance,
            dist_real: evaluation.baseline_distance,
            is_dangerous: evaluation.is_dangerous,
            is_blocked: evaluation.is_blocked,
            polyline: evaluation
                .polyline
                .iter()
                .map(|point| [point.y(), point.x()])
                .collect(),
            exec_time_baseline: evaluation.baseline_time.as_secs_f64(),
            exec_time_research: evaluation.search_time.as_secs_f64(),
        }
    }
}

type ApiError = (StatusCode, Json<Value>);

/// An un-snappable user coordinate is the client's problem; everything else
/// is internal.
fn error_response(err: Error) -> ApiError {
    let status = match err {
        Error::NoPointsFound => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, Json(json!({ "error": err.to_string() })))
}

/// One planning cycle: read the current documents, freeze the overlay
/// snapshot, then rank. CPU-bound, so it runs on the blocking pool.
async fn plan(state: AppState, user: UserLocation) -> Result<Vec<RouteEvaluation>, Error> {
    tokio::task::spawn_blocking(move || {
        let reports = validate_reports(state.store.reports()?);
        let overlay =
            WeightOverlay::from_reports(&state.network, &reports, state.planning.hazard_penalty_factor);
        let points = resolve_points(&state.network, state.store.points()?);
        rank_destinations(
            &state.network,
            &overlay,
            Point::new(user.lng, user.lat),
            &points,
            &state.planning,
        )
    })
    .await
    .map_err(|_| Error::UnrecoverableError("planning task panicked"))?
}

async fn sorted_safe_points(
    State(state): State<AppState>,
    Json(user): Json<UserLocation>,
) -> Result<Json<Vec<SafePointRecord>>, ApiError> {
    info!(lat = user.lat, lng = user.lng, "planning request");

    let evaluations = plan(state, user).await.map_err(error_response)?;
    Ok(Json(
        evaluations.into_iter().map(SafePointRecord::from).collect(),
    ))
}

async fn safe_points_geojson(
    State(state): State<AppState>,
    Json(user): Json<UserLocation>,
) -> Result<Json<Value>, ApiError> {
    let evaluations = plan(state, user).await.map_err(error_response)?;
    let collection = evaluations_to_geojson(&evaluations).map_err(error_response)?;
    let value = serde_json::to_value(collection)
        .map_err(|e| error_response(Error::GeoJsonError(e.to_string())))?;
    Ok(Json(value))
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "nodes": state.network.node_count(),
        "edges": state.network.edge_count(),
    }))
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::util::ServiceExt;

    use safeguard_core::loading::{NetworkSnapshot, SnapshotEdge, SnapshotNode, build_road_network};

    use super::*;

    fn write_temp(name: &str, contents: &str) -> PathBuf {
        use std::sync::atomic::{AtomicUsize, Ordering};
        // Tests run concurrently in one process; every call gets its own file
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let unique = COUNTER.fetch_add(1, Ordering::Relaxed);
        let path = std::env::temp_dir().join(format!(
            "safeguard-routes-{}-{unique}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    /// Diamond network around the origin, a valid safe point at the far
    /// corner, one malformed point, one active fire at node B and one
    /// malformed report.
    fn test_state(points: &str, reports: &str) -> AppState {
        let snapshot = NetworkSnapshot {
            nodes: vec![
                SnapshotNode { id: 0, lat: 0.0, lon: 0.0 },
                SnapshotNode { id: 1, lat: 1.0, lon: 1.0 },
                SnapshotNode { id: 2, lat: -1.0, lon: 1.0 },
                SnapshotNode { id: 3, lat: 0.0, lon: 2.0 },
            ],
            edges: vec![
                SnapshotEdge { source: 0, target: 1, length: 5.0 },
                SnapshotEdge { source: 1, target: 3, length: 5.0 },
                SnapshotEdge { source: 0, target: 2, length: 6.0 },
                SnapshotEdge { source: 2, target: 3, length: 6.0 },
            ],
        };

        AppState {
            network: Arc::new(build_road_network(snapshot)),
            store: DocumentStore::new(
                write_temp("points.json", points),
                write_temp("reports.json", reports),
            ),
            planning: PlanningConfig {
                danger_margin: 1.0,
                ..PlanningConfig::default()
            },
        }
    }

    async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn ranks_reachable_points_and_skips_malformed_documents() {
        let state = test_state(
            r#"[
                {"id": "p1", "name": "Far Shelter", "type": "safe_point", "lat": 0.0, "lng": 2.0},
                {"id": "p2", "name": "Broken", "type": "safe_point", "lng": 2.0}
            ]"#,
            r#"[
                {"id": "r1", "type": "fire", "lat": 1.0, "lng": 1.0, "status": "active"},
                {"id": "r2", "type": "fire", "status": "active"}
            ]"#,
        );

        let (status, body) =
            post_json(router(state), "/api/safe-points/sorted", r#"{"lat":0.0,"lng":0.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        let records = body.as_array().unwrap();
        assert_eq!(records.len(), 1);

        let record = &records[0];
        assert_eq!(record["title"], "Far Shelter");
        assert_eq!(record["type"], "safe_point");
        // Fire at B forces the detour through C: 12 vs a baseline of 10
        assert_eq!(record["distance"], 12.0);
        assert_eq!(record["dist_real"], 10.0);
        assert_eq!(record["isDangerous"], true);
        assert_eq!(record["isBlocked"], false);
        let polyline = record["polyline"].as_array().unwrap();
        assert_eq!(polyline.len(), 3);
        assert_eq!(polyline[1].as_array().unwrap()[0], -1.0); // lat of C
    }

    #[tokio::test]
    async fn geojson_variant_returns_a_feature_collection() {
        let state = test_state(
            r#"[{"id": "p1", "name": "Far Shelter", "type": "safe_point", "lat": 0.0, "lng": 2.0}]"#,
            r#"[]"#,
        );

        let (status, body) =
            post_json(router(state), "/api/safe-points/geojson", r#"{"lat":0.0,"lng":0.0}"#).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn health_reports_network_size() {
        let state = test_state("[]", "[]");
        let request = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let response = router(state).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["nodes"], 4);
        assert_eq!(body["edges"], 4);
    }
}
