//! The match engine: filtered worker search with display enrichment.

use std::collections::HashMap;

use oficios_database::{association, review, worker, City, RatingSummary, Trade, Worker};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

use crate::catalog;
use crate::error::Result;

/// Optional search constraints. The default (empty) filter is the
/// browse-all mode and matches every active worker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchFilter {
    /// Restrict to workers linked to this trade.
    pub trade_id: Option<String>,
    /// Restrict to workers linked to this city.
    pub city_id: Option<String>,
}

impl SearchFilter {
    /// Filter by trade only.
    pub fn by_trade(trade_id: impl Into<String>) -> Self {
        Self {
            trade_id: Some(trade_id.into()),
            ..Self::default()
        }
    }

    /// Filter by city only.
    pub fn by_city(city_id: impl Into<String>) -> Self {
        Self {
            city_id: Some(city_id.into()),
            ..Self::default()
        }
    }
}

/// One search result, enriched for display: the worker's FULL trade and
/// city lists (not just the matched ones) and the current rating summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerListing {
    /// The matched worker.
    pub worker: Worker,
    /// All trades the worker offers, ordered by name.
    pub trades: Vec<Trade>,
    /// All cities the worker covers, ordered by name.
    pub cities: Vec<City>,
    /// Current rating aggregate.
    pub rating: RatingSummary,
}

/// Find active workers matching the filter, enriched for display.
///
/// An empty result is a valid answer, not an error. Results come back in
/// worker creation order (ties broken by id), so the same filter over the
/// same data always yields the same sequence. Enrichment is three bulk
/// reads over the surviving id set, independent of result count.
pub async fn search(pool: &SqlitePool, filter: &SearchFilter) -> Result<Vec<WorkerListing>> {
    let workers = worker::search(
        pool,
        filter.trade_id.as_deref(),
        filter.city_id.as_deref(),
    )
    .await?;

    let ids: Vec<String> = workers.iter().map(|w| w.id.clone()).collect();

    let mut trades_by_worker: HashMap<String, Vec<Trade>> = HashMap::new();
    for (worker_id, trade) in association::trades_for_workers(pool, &ids).await? {
        trades_by_worker.entry(worker_id).or_default().push(trade);
    }

    let mut cities_by_worker: HashMap<String, Vec<City>> = HashMap::new();
    for (worker_id, city) in association::cities_for_workers(pool, &ids).await? {
        cities_by_worker.entry(worker_id).or_default().push(city);
    }

    let mut summaries = review::get_summaries(pool, &ids).await?;

    Ok(workers
        .into_iter()
        .map(|worker| {
            let rating = summaries
                .remove(&worker.id)
                .unwrap_or_else(|| RatingSummary::empty(&worker.id));
            WorkerListing {
                trades: trades_by_worker.remove(&worker.id).unwrap_or_default(),
                cities: cities_by_worker.remove(&worker.id).unwrap_or_default(),
                rating,
                worker,
            }
        })
        .collect())
}

/// Search with the trade given as a URL slug, as deep links supply it.
pub async fn search_by_trade_slug(
    pool: &SqlitePool,
    slug: &str,
    city_id: Option<String>,
) -> Result<Vec<WorkerListing>> {
    let trade = catalog::resolve_trade_by_slug(pool, slug).await?;
    search(
        pool,
        &SearchFilter {
            trade_id: Some(trade.id),
            city_id,
        },
    )
    .await
}
