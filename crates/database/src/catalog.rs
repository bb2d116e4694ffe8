//! Reference catalog reads for trades and cities.
//!
//! Pure reads over fixed reference data; nothing here mutates.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{City, Trade};

/// List all trades, ordered by display name.
pub async fn list_trades(pool: &SqlitePool) -> Result<Vec<Trade>> {
    let trades = sqlx::query_as::<_, Trade>(
        r#"
        SELECT id, name, slug, icon
        FROM trades
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(trades)
}

/// List all cities, ordered by display name.
pub async fn list_cities(pool: &SqlitePool) -> Result<Vec<City>> {
    let cities = sqlx::query_as::<_, City>(
        r#"
        SELECT id, name, region
        FROM cities
        ORDER BY name
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(cities)
}

/// Get a trade by id.
pub async fn get_trade(pool: &SqlitePool, id: &str) -> Result<Trade> {
    sqlx::query_as::<_, Trade>(
        r#"
        SELECT id, name, slug, icon
        FROM trades
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Trade",
        id: id.to_string(),
    })
}

/// Get a trade by its URL slug.
pub async fn get_trade_by_slug(pool: &SqlitePool, slug: &str) -> Result<Trade> {
    sqlx::query_as::<_, Trade>(
        r#"
        SELECT id, name, slug, icon
        FROM trades
        WHERE slug = ?
        "#,
    )
    .bind(slug)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Trade",
        id: slug.to_string(),
    })
}

/// Get a city by id.
pub async fn get_city(pool: &SqlitePool, id: &str) -> Result<City> {
    sqlx::query_as::<_, City>(
        r#"
        SELECT id, name, region
        FROM cities
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "City",
        id: id.to_string(),
    })
}

/// Insert a trade. Reference data is seeded, not user-editable.
pub async fn insert_trade(pool: &SqlitePool, trade: &Trade) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO trades (id, name, slug, icon)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(&trade.id)
    .bind(&trade.name)
    .bind(&trade.slug)
    .bind(&trade.icon)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Trade",
                    id: trade.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}

/// Insert a city. Reference data is seeded, not user-editable.
pub async fn insert_city(pool: &SqlitePool, city: &City) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO cities (id, name, region)
        VALUES (?, ?, ?)
        "#,
    )
    .bind(&city.id)
    .bind(&city.name)
    .bind(&city.region)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "City",
                    id: city.id.clone(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    Ok(())
}
