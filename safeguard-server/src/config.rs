//! Server configuration, read from a TOML file.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use safeguard_core::Error;
use safeguard_core::evaluate::PlanningConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address to listen on
    #[serde(default = "default_listen")]
    pub listen: SocketAddr,
    /// Road-network snapshot produced by the geospatial provider
    pub network_snapshot: PathBuf,
    /// JSON document with the points of interest
    pub points_path: PathBuf,
    /// JSON document with the hazard reports
    pub reports_path: PathBuf,
    /// Overall deadline for one planning request, in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    /// Maximum number of requests handled concurrently
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
    #[serde(default)]
    pub planning: PlanningSection,
}

fn default_listen() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8000))
}

fn default_request_timeout() -> u64 {
    30
}

fn default_max_in_flight() -> usize {
    64
}

/// `[planning]` table, mapped onto the engine's `PlanningConfig`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlanningSection {
    pub hazard_penalty_factor: f64,
    pub blocked_distance_cap: f64,
    pub danger_margin: f64,
    pub max_candidates: usize,
}

impl Default for PlanningSection {
    fn default() -> Self {
        Self {
            hazard_penalty_factor: safeguard_core::HAZARD_PENALTY_FACTOR,
            blocked_distance_cap: safeguard_core::BLOCKED_DISTANCE_CAP,
            danger_margin: safeguard_core::DANGER_MARGIN,
            max_candidates: safeguard_core::MAX_CANDIDATE_POINTS,
        }
    }
}

impl From<PlanningSection> for PlanningConfig {
    fn from(section: PlanningSection) -> Self {
        Self {
            hazard_penalty_factor: section.hazard_penalty_factor,
            blocked_distance_cap: section.blocked_distance_cap,
            danger_margin: section.danger_margin,
            max_candidates: section.max_candidates,
        }
    }
}

impl ServerConfig {
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self, Error> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw)
            .map_err(|e| Error::InvalidData(format!("invalid configuration: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_gets_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            network_snapshot = "network.json"
            points_path = "points.json"
            reports_path = "reports.json"
            "#,
        )
        .unwrap();

        assert_eq!(config.listen.port(), 8000);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.planning.max_candidates, 5);
    }

    #[test]
    fn planning_table_overrides_defaults() {
        let config: ServerConfig = toml::from_str(
            r#"
            listen = "127.0.0.1:9100"
            network_snapshot = "network.json"
            points_path = "points.json"
            reports_path = "reports.json"

            [planning]
            danger_margin = 2.5
            "#,
        )
        .unwrap();

        assert_eq!(config.listen.port(), 9100);
        assert_eq!(config.planning.danger_margin, 2.5);
        // Untouched keys keep their defaults
        assert_eq!(config.planning.hazard_penalty_factor, 100.0);
    }
}
