//! Catalog reads surfaced under the directory error taxonomy.
//!
//! Trades and cities are fixed reference data; these are pure reads. A
//! failing backing store propagates as `ServiceUnavailable`, a missing
//! slug or id as `NotFound`.

use oficios_database::{catalog, City, Trade};
use sqlx::SqlitePool;

use crate::error::Result;

/// List all trades, ordered by display name ascending.
pub async fn list_trades(pool: &SqlitePool) -> Result<Vec<Trade>> {
    Ok(catalog::list_trades(pool).await?)
}

/// List all cities, ordered by display name ascending.
pub async fn list_cities(pool: &SqlitePool) -> Result<Vec<City>> {
    Ok(catalog::list_cities(pool).await?)
}

/// Resolve a trade from its URL slug.
pub async fn resolve_trade_by_slug(pool: &SqlitePool, slug: &str) -> Result<Trade> {
    Ok(catalog::get_trade_by_slug(pool, slug).await?)
}

/// Resolve a trade by id.
pub async fn resolve_trade(pool: &SqlitePool, id: &str) -> Result<Trade> {
    Ok(catalog::get_trade(pool, id).await?)
}

/// Resolve a city by id.
pub async fn resolve_city(pool: &SqlitePool, id: &str) -> Result<City> {
    Ok(catalog::get_city(pool, id).await?)
}
