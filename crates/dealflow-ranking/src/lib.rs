//! Recommended-buyer ranking for deal listings.
//!
//! Merges formally scored candidates with buyers surfaced only through
//! engagement (marketplace interest, pipeline presence, contact history),
//! decorates them with transcript and outreach data, and returns a single
//! tie-broken ranking with tier and engagement summaries.

pub mod cache;
pub mod error;
pub mod lookups;
pub mod pipeline;
pub mod recency;
pub mod scoring;
pub mod tier;
pub mod types;

mod retry;

#[cfg(test)]
mod testing;

pub use cache::{CacheConfig, RecommendationCache};
pub use error::RankingError;
pub use pipeline::{recommend_buyers, DEFAULT_LIMIT};
pub use tier::{appetite_ordinal, classify_tier};
pub use types::{
    BuyerSource, DataStats, OutreachInfo, RankedBuyer, RecommendedBuyersResult, TierSummary,
    TranscriptInsight,
};
