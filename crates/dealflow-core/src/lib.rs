pub mod app_config;
pub mod buyers;
pub mod config;
pub mod source;
pub mod tiers;

pub use app_config::{AppConfig, Environment};
pub use buyers::{
    BuyerId, BuyerProfile, ConnectionRequest, EngagementSignal, EngagementSource, OutreachRow,
    ScoredCandidate, TranscriptRow,
};
pub use config::{load_app_config, load_app_config_from_env};
pub use source::{EnrichmentData, RecommendationSource, SourceError};
pub use tiers::{load_tiers, resolve_tiers, Tier, TierThresholds};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read tiers file {path}: {source}")]
    TiersFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse tiers file: {0}")]
    TiersFileParse(#[from] serde_yaml::Error),

    #[error("invalid tier thresholds: {0}")]
    Validation(String),
}
