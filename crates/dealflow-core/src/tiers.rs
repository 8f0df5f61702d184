use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Coarse buying-readiness classification shown next to each recommended buyer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    MoveNow,
    StrongCandidate,
    Speculative,
}

impl Tier {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Tier::MoveNow => "move_now",
            Tier::StrongCandidate => "strong_candidate",
            Tier::Speculative => "speculative",
        }
    }

    /// Human-readable label for dashboards.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Tier::MoveNow => "Move Now",
            Tier::StrongCandidate => "Strong Candidate",
            Tier::Speculative => "Speculative",
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Score breakpoints used to place a buyer into a [`Tier`].
///
/// A score at or above `move_now_min` reaches `move_now` only when the buyer
/// also shows a readiness signal (fee agreement on file, or an aggressive or
/// active acquisition appetite), unless `move_now_requires_readiness` is off.
/// Scores at or above `strong_candidate_min` are `strong_candidate`; anything
/// lower is `speculative`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TierThresholds {
    pub move_now_min: f64,
    pub strong_candidate_min: f64,
    pub move_now_requires_readiness: bool,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            move_now_min: 80.0,
            strong_candidate_min: 60.0,
            move_now_requires_readiness: true,
        }
    }
}

/// Load and validate tier thresholds from a YAML file.
///
/// Missing keys fall back to [`TierThresholds::default`].
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_tiers(path: &Path) -> Result<TierThresholds, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TiersFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let thresholds: TierThresholds =
        serde_yaml::from_str(&content).map_err(ConfigError::TiersFileParse)?;

    validate_tiers(&thresholds)?;

    Ok(thresholds)
}

/// Load thresholds from `path` when one is configured, otherwise return the
/// built-in defaults.
///
/// # Errors
///
/// Propagates any error from [`load_tiers`].
pub fn resolve_tiers(path: Option<&Path>) -> Result<TierThresholds, ConfigError> {
    match path {
        Some(path) => load_tiers(path),
        None => Ok(TierThresholds::default()),
    }
}

fn validate_tiers(thresholds: &TierThresholds) -> Result<(), ConfigError> {
    let in_range = |v: f64| v.is_finite() && (0.0..=100.0).contains(&v);

    if !in_range(thresholds.move_now_min) {
        return Err(ConfigError::Validation(format!(
            "move_now_min {} must be between 0 and 100",
            thresholds.move_now_min
        )));
    }

    if !in_range(thresholds.strong_candidate_min) {
        return Err(ConfigError::Validation(format!(
            "strong_candidate_min {} must be between 0 and 100",
            thresholds.strong_candidate_min
        )));
    }

    if thresholds.strong_candidate_min > thresholds.move_now_min {
        return Err(ConfigError::Validation(format!(
            "strong_candidate_min ({}) exceeds move_now_min ({})",
            thresholds.strong_candidate_min, thresholds.move_now_min
        )));
    }

    Ok(())
}

#[cfg(test)]
#[path = "tiers_test.rs"]
mod tests;
