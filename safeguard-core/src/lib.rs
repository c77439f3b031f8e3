//! Core engine for safety-aware evacuation routing.
//!
//! The crate models a road network as an undirected graph with immutable
//! physical edge lengths and a per-planning-cycle weight overlay that
//! inflates traversal costs around active hazard reports. On top of that it
//! provides a bidirectional Dijkstra for hazard-aware routes, a baseline
//! shortest-path reference, and the classification/ranking logic that turns
//! both into user-facing route evaluations.

pub mod error;
pub mod evaluate;
pub mod loading;
pub mod model;
pub mod prelude;
pub mod routing;

pub use error::Error;

/// OSM identifier of a road-graph node.
pub type OsmNodeId = i64;

/// Default multiplier applied to the base weight of every edge incident to a
/// node with an active blocking hazard.
pub const HAZARD_PENALTY_FACTOR: f64 = 100.0;

/// Default absolute hazard-aware distance (metres) above which a route is
/// considered blocked and withheld from navigation.
pub const BLOCKED_DISTANCE_CAP: f64 = 50_000.0;

/// Default margin (metres) by which the hazard-aware distance must exceed
/// the baseline before a route is flagged as dangerous.
pub const DANGER_MARGIN: f64 = 10.0;

/// Default number of candidate destinations pre-selected by straight-line
/// distance before any graph search runs.
pub const MAX_CANDIDATE_POINTS: usize = 5;
