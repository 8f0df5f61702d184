//! `recommend` command: one uncached ranking run printed to stdout.

use chrono::Utc;
use dealflow_db::PgRecommendationSource;
use dealflow_ranking::{recommend_buyers, RankedBuyer, RecommendedBuyersResult};
use uuid::Uuid;

/// # Errors
///
/// Returns an error if the tier file is invalid, a store query fails, or the
/// result cannot be serialized.
pub(crate) async fn run_recommend(
    pool: &sqlx::PgPool,
    config: &dealflow_core::AppConfig,
    listing_id: Uuid,
    limit: usize,
    json: bool,
) -> anyhow::Result<()> {
    let thresholds = dealflow_core::resolve_tiers(config.tiers_path.as_deref())?;
    let source = PgRecommendationSource::new(pool.clone());

    let result = recommend_buyers(&source, Some(listing_id), limit, &thresholds, Utc::now()).await?;
    tracing::debug!(%listing_id, limit, total = result.total, "ranking complete");

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print!("{}", render_table(&result));
    }
    Ok(())
}

pub(crate) fn render_table(result: &RecommendedBuyersResult) -> String {
    if result.buyers.is_empty() {
        return "no recommended buyers for this listing\n".to_string();
    }

    let mut out = format!(
        "{:<5}{:<32}{:<8}{:<19}{:<13}{:<8}SIGNALS\n",
        "#", "BUYER", "SCORE", "TIER", "SOURCE", "DAYS"
    );
    for (rank, buyer) in result.buyers.iter().enumerate() {
        out.push_str(&render_row(rank + 1, buyer));
        out.push('\n');
    }

    let tiers = &result.tier_summary;
    out.push_str(&format!(
        "\n{} buyer(s), {} scored | move now {}, strong {}, speculative {}\n",
        result.total, result.total_scored, tiers.move_now, tiers.strong_candidate, tiers.speculative
    ));
    out
}

fn render_row(rank: usize, buyer: &RankedBuyer) -> String {
    let name = if buyer.company_name.chars().count() > 30 {
        format!("{}...", buyer.company_name.chars().take(27).collect::<String>())
    } else {
        buyer.company_name.clone()
    };
    let days = buyer
        .days_since_engagement
        .map_or_else(|| "-".to_string(), |d| d.to_string());
    let cold = if buyer.engagement_cold { "*" } else { "" };

    format!(
        "{:<5}{:<32}{:<8.1}{:<19}{:<13}{:<8}{}",
        rank,
        name,
        buyer.composite_fit_score,
        buyer.tier_label,
        buyer.source.as_str(),
        format!("{days}{cold}"),
        buyer.fit_signals.join("; ")
    )
}
