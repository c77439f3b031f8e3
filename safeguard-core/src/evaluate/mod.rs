//! Route classification and ranking.
//!
//! For every candidate destination two searches run against the same frozen
//! overlay snapshot: the baseline reference over physical lengths and the
//! hazard-aware bidirectional search. Their comparison decides whether the
//! route is dangerous or outright blocked, and which distance the user gets
//! to see.

mod to_geojson;

pub use to_geojson::evaluations_to_geojson;

use std::time::{Duration, Instant};

use geo::{Distance, Haversine, Point};
use itertools::Itertools;
use log::warn;
use petgraph::graph::NodeIndex;
use rayon::prelude::*;

use crate::error::Error;
use crate::model::{PointOfInterest, RoadNetwork, WeightOverlay};
use crate::routing::{SearchResult, baseline_dijkstra, bidirectional_dijkstra};
use crate::{BLOCKED_DISTANCE_CAP, DANGER_MARGIN, HAZARD_PENALTY_FACTOR, MAX_CANDIDATE_POINTS};

/// Tunables of one planning cycle.
///
/// The defaults reproduce the constants the service has always shipped
/// with; their units are metres for the cap/margin and a plain factor for
/// the penalty.
#[derive(Debug, Clone)]
pub struct PlanningConfig {
    /// Multiplier for edges incident to an active blocking hazard
    pub hazard_penalty_factor: f64,
    /// Absolute hazard-aware distance above which a route is blocked
    pub blocked_distance_cap: f64,
    /// Excess over the baseline above which a route is dangerous
    pub danger_margin: f64,
    /// Number of candidates pre-selected by straight-line distance
    pub max_candidates: usize,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            hazard_penalty_factor: HAZARD_PENALTY_FACTOR,
            blocked_distance_cap: BLOCKED_DISTANCE_CAP,
            danger_margin: DANGER_MARGIN,
            max_candidates: MAX_CANDIDATE_POINTS,
        }
    }
}

impl PlanningConfig {
    /// # Errors
    ///
    /// Returns an error if any parameter would break the overlay invariant
    /// (`current >= base` needs a factor of at least 1) or make the
    /// classification thresholds meaningless.
    pub fn validate(&self) -> Result<(), Error> {
        if !self.hazard_penalty_factor.is_finite() || self.hazard_penalty_factor < 1.0 {
            return Err(Error::InvalidData(format!(
                "hazard penalty factor must be >= 1, got {}",
                self.hazard_penalty_factor
            )));
        }
        if !self.blocked_distance_cap.is_finite() || self.blocked_distance_cap <= 0.0 {
            return Err(Error::InvalidData(format!(
                "blocked distance cap must be positive, got {}",
                self.blocked_distance_cap
            )));
        }
        if !self.danger_margin.is_finite() || self.danger_margin < 0.0 {
            return Err(Error::InvalidData(format!(
                "danger margin must be non-negative, got {}",
                self.danger_margin
            )));
        }
        if self.max_candidates == 0 {
            return Err(Error::InvalidData(
                "candidate count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Why a single candidate destination was dropped from the ranking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No route exists even on the unmodified network
    BaselineUnreachable,
}

/// User-facing outcome for one candidate destination
#[derive(Debug, Clone)]
pub struct RouteEvaluation {
    pub point: PointOfInterest,
    /// Shortest-path cost over physical lengths, hazard-agnostic
    pub baseline_distance: f64,
    /// Shortest-path cost under the hazard overlay
    pub hazard_distance: f64,
    pub is_dangerous: bool,
    pub is_blocked: bool,
    /// The distance shown to the user
    pub reported_distance: f64,
    /// Hazard-aware path coordinates in path order, empty when blocked
    pub polyline: Vec<Point<f64>>,
    /// Diagnostic: elapsed time of the baseline search
    pub baseline_time: Duration,
    /// Diagnostic: elapsed time of the hazard-aware search
    pub search_time: Duration,
}

/// Pre-selects the `k` candidates closest to the user by straight-line
/// distance, bounding how many graph searches one request can trigger.
pub fn nearest_candidates<'a>(
    user: Point<f64>,
    points: &'a [PointOfInterest],
    k: usize,
) -> Vec<&'a PointOfInterest> {
    points
        .iter()
        .map(|point| (Haversine.distance(user, point.geometry), point))
        .sorted_by(|a, b| a.0.total_cmp(&b.0))
        .take(k)
        .map(|(_, point)| point)
        .collect()
}

/// Evaluates a single candidate destination against the frozen overlay.
///
/// Per-candidate failures come back as a [`SkipReason`] so one bad
/// destination never aborts the whole planning request.
pub fn evaluate_destination(
    network: &RoadNetwork,
    overlay: &WeightOverlay,
    source: NodeIndex,
    point: &PointOfInterest,
    config: &PlanningConfig,
) -> Result<RouteEvaluation, SkipReason> {
    let started = Instant::now();
    let reference = baseline_dijkstra(network, source, point.node);
    let baseline_time = started.elapsed();

    if reference.is_unreachable() {
        return Err(SkipReason::BaselineUnreachable);
    }

    let started = Instant::now();
    let hazard_aware = bidirectional_dijkstra(network, source, point.node, |a, b| {
        overlay.weight(network, a, b)
    });
    let search_time = started.elapsed();

    let is_blocked = hazard_aware.cost > config.blocked_distance_cap;
    let is_dangerous = hazard_aware.cost > reference.cost + config.danger_margin;

    // The baseline stays the user-facing number unless the hazard impact is
    // material; a blocked route falls back to it too, since its hazard-aware
    // path is not navigable.
    let reported_distance = if is_dangerous && !is_blocked {
        hazard_aware.cost
    } else {
        reference.cost
    };

    let polyline = if is_blocked {
        Vec::new()
    } else {
        path_coordinates(network, &hazard_aware)
    };

    Ok(RouteEvaluation {
        point: point.clone(),
        baseline_distance: reference.cost,
        hazard_distance: hazard_aware.cost,
        is_dangerous,
        is_blocked,
        reported_distance,
        polyline,
        baseline_time,
        search_time,
    })
}

/// Ranks the destinations reachable from `user` for one planning cycle.
///
/// The overlay snapshot is frozen before this is called, so the
/// per-destination evaluations are independent and fan out across the rayon
/// pool. Skipped candidates are logged and filtered; the ranking is
/// ascending by reported distance.
///
/// # Errors
///
/// Returns an error for an invalid configuration or when the user
/// coordinate cannot be snapped to the network. Per-candidate failures are
/// never request failures.
pub fn rank_destinations(
    network: &RoadNetwork,
    overlay: &WeightOverlay,
    user: Point<f64>,
    points: &[PointOfInterest],
    config: &PlanningConfig,
) -> Result<Vec<RouteEvaluation>, Error> {
    config.validate()?;
    let source = network.nearest_node(&user)?;
    let candidates = nearest_candidates(user, points, config.max_candidates);

    let mut evaluations: Vec<RouteEvaluation> = candidates
        .par_iter()
        .filter_map(
            |point| match evaluate_destination(network, overlay, source, point, config) {
                Ok(evaluation) => Some(evaluation),
                Err(reason) => {
                    warn!("Skipping destination {} ({}): {reason:?}", point.name, point.id);
                    None
                }
            },
        )
        .collect();

    evaluations.sort_by(|a, b| a.reported_distance.total_cmp(&b.reported_distance));
    Ok(evaluations)
}

fn path_coordinates(network: &RoadNetwork, result: &SearchResult) -> Vec<Point<f64>> {
    result
        .path
        .iter()
        .filter_map(|&node| network.graph.node_weight(node).map(|w| w.geometry))
        .collect()
}
