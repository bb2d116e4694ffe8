//! Link-table primitives for worker/trade and worker/city associations.
//!
//! These are the raw set operations; the replace-all protocol that
//! sequences them lives in the directory crate.

use sqlx::{FromRow, SqlitePool};

use crate::error::Result;
use crate::models::{City, Trade};

/// Trade ids currently linked to a worker.
pub async fn trade_ids_for(pool: &SqlitePool, worker_id: &str) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT trade_id
        FROM worker_trades
        WHERE worker_id = ?
        ORDER BY trade_id
        "#,
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// City ids currently linked to a worker.
pub async fn city_ids_for(pool: &SqlitePool, worker_id: &str) -> Result<Vec<String>> {
    let ids = sqlx::query_scalar::<_, String>(
        r#"
        SELECT city_id
        FROM worker_cities
        WHERE worker_id = ?
        ORDER BY city_id
        "#,
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await?;

    Ok(ids)
}

/// Insert worker/trade link rows as a single multi-row statement.
///
/// The composite primary key rejects duplicate pairs.
pub async fn insert_trade_links(
    pool: &SqlitePool,
    worker_id: &str,
    trade_ids: &[String],
) -> Result<()> {
    if trade_ids.is_empty() {
        return Ok(());
    }

    let values = vec!["(?, ?)"; trade_ids.len()].join(", ");
    let sql = format!(
        "INSERT INTO worker_trades (worker_id, trade_id) VALUES {}",
        values
    );

    let mut query = sqlx::query(&sql);
    for trade_id in trade_ids {
        query = query.bind(worker_id).bind(trade_id);
    }
    query.execute(pool).await?;

    Ok(())
}

/// Insert worker/city link rows as a single multi-row statement.
pub async fn insert_city_links(
    pool: &SqlitePool,
    worker_id: &str,
    city_ids: &[String],
) -> Result<()> {
    if city_ids.is_empty() {
        return Ok(());
    }

    let values = vec!["(?, ?)"; city_ids.len()].join(", ");
    let sql = format!(
        "INSERT INTO worker_cities (worker_id, city_id) VALUES {}",
        values
    );

    let mut query = sqlx::query(&sql);
    for city_id in city_ids {
        query = query.bind(worker_id).bind(city_id);
    }
    query.execute(pool).await?;

    Ok(())
}

/// Delete the given worker/trade links in one statement.
pub async fn delete_trade_links(
    pool: &SqlitePool,
    worker_id: &str,
    trade_ids: &[String],
) -> Result<u64> {
    if trade_ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; trade_ids.len()].join(", ");
    let sql = format!(
        "DELETE FROM worker_trades WHERE worker_id = ? AND trade_id IN ({})",
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(worker_id);
    for trade_id in trade_ids {
        query = query.bind(trade_id);
    }
    let result = query.execute(pool).await?;

    Ok(result.rows_affected())
}

/// Delete the given worker/city links in one statement.
pub async fn delete_city_links(
    pool: &SqlitePool,
    worker_id: &str,
    city_ids: &[String],
) -> Result<u64> {
    if city_ids.is_empty() {
        return Ok(0);
    }

    let placeholders = vec!["?"; city_ids.len()].join(", ");
    let sql = format!(
        "DELETE FROM worker_cities WHERE worker_id = ? AND city_id IN ({})",
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(worker_id);
    for city_id in city_ids {
        query = query.bind(city_id);
    }
    let result = query.execute(pool).await?;

    Ok(result.rows_affected())
}

#[derive(FromRow)]
struct WorkerTradeRow {
    worker_id: String,
    id: String,
    name: String,
    slug: String,
    icon: Option<String>,
}

#[derive(FromRow)]
struct WorkerCityRow {
    worker_id: String,
    id: String,
    name: String,
    region: Option<String>,
}

/// Resolve the full trade lists for a set of workers in one query.
///
/// Returns `(worker_id, trade)` pairs ordered by trade name within each
/// worker. A single bulk read regardless of how many workers are asked
/// for; result-page enrichment must not degrade into per-worker queries.
pub async fn trades_for_workers(
    pool: &SqlitePool,
    worker_ids: &[String],
) -> Result<Vec<(String, Trade)>> {
    if worker_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; worker_ids.len()].join(", ");
    let sql = format!(
        r#"
        SELECT wt.worker_id, t.id, t.name, t.slug, t.icon
        FROM worker_trades wt
        JOIN trades t ON t.id = wt.trade_id
        WHERE wt.worker_id IN ({})
        ORDER BY wt.worker_id, t.name
        "#,
        placeholders
    );

    let mut query = sqlx::query_as::<_, WorkerTradeRow>(&sql);
    for worker_id in worker_ids {
        query = query.bind(worker_id);
    }
    let rows = query.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.worker_id,
                Trade {
                    id: row.id,
                    name: row.name,
                    slug: row.slug,
                    icon: row.icon,
                },
            )
        })
        .collect())
}

/// Resolve the full city lists for a set of workers in one query.
pub async fn cities_for_workers(
    pool: &SqlitePool,
    worker_ids: &[String],
) -> Result<Vec<(String, City)>> {
    if worker_ids.is_empty() {
        return Ok(Vec::new());
    }

    let placeholders = vec!["?"; worker_ids.len()].join(", ");
    let sql = format!(
        r#"
        SELECT wc.worker_id, c.id, c.name, c.region
        FROM worker_cities wc
        JOIN cities c ON c.id = wc.city_id
        WHERE wc.worker_id IN ({})
        ORDER BY wc.worker_id, c.name
        "#,
        placeholders
    );

    let mut query = sqlx::query_as::<_, WorkerCityRow>(&sql);
    for worker_id in worker_ids {
        query = query.bind(worker_id);
    }
    let rows = query.fetch_all(pool).await?;

    Ok(rows
        .into_iter()
        .map(|row| {
            (
                row.worker_id,
                City {
                    id: row.id,
                    name: row.name,
                    region: row.region,
                },
            )
        })
        .collect())
}
