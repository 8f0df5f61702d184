use dealflow_core::SourceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RankingError {
    #[error(transparent)]
    Source(#[from] SourceError),
}
