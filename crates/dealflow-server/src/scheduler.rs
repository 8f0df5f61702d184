//! Background job scheduler.

use std::sync::Arc;

use dealflow_ranking::RecommendationCache;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};

/// Top of every hour.
const CACHE_PRUNE_SCHEDULE: &str = "0 0 * * * *";

/// Builds and starts the scheduler with the hourly cache prune registered.
///
/// The returned handle must be kept alive for the lifetime of the process;
/// dropping it shuts the jobs down.
///
/// # Errors
///
/// Returns [`JobSchedulerError`] if the scheduler cannot be initialised,
/// the job cannot be registered, or the scheduler fails to start.
pub async fn build_scheduler(
    cache: Arc<RecommendationCache>,
) -> Result<JobScheduler, JobSchedulerError> {
    let scheduler = JobScheduler::new().await?;
    register_cache_prune_job(&scheduler, cache).await?;
    scheduler.start().await?;
    Ok(scheduler)
}

async fn register_cache_prune_job(
    scheduler: &JobScheduler,
    cache: Arc<RecommendationCache>,
) -> Result<(), JobSchedulerError> {
    let job = Job::new_async(CACHE_PRUNE_SCHEDULE, move |_uuid, _lock| {
        let cache = Arc::clone(&cache);
        Box::pin(async move {
            let pruned = cache.prune_stale().await;
            let remaining = cache.len().await;
            tracing::info!(pruned, remaining, "scheduler: pruned stale recommendations");
        })
    })?;

    scheduler.add(job).await?;
    Ok(())
}
