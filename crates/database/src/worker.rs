//! Worker CRUD and the filtered search read.

use sqlx::SqlitePool;

use crate::error::{DatabaseError, Result};
use crate::models::{Worker, WorkerDetails};

/// Create a new worker record.
pub async fn create_worker(pool: &SqlitePool, id: &str) -> Result<Worker> {
    sqlx::query(
        r#"
        INSERT INTO workers (id)
        VALUES (?)
        "#,
    )
    .bind(id)
    .execute(pool)
    .await
    .map_err(|e| {
        if let sqlx::Error::Database(ref db_err) = e {
            if db_err.is_unique_violation() {
                return DatabaseError::AlreadyExists {
                    entity: "Worker",
                    id: id.to_string(),
                };
            }
        }
        DatabaseError::Sqlx(e)
    })?;

    get_worker(pool, id).await
}

/// Get a worker by id, active or not.
pub async fn get_worker(pool: &SqlitePool, id: &str) -> Result<Worker> {
    sqlx::query_as::<_, Worker>(
        r#"
        SELECT id, active, dni_verified, description, phone, contact_email,
               instagram, photo_url, created_at
        FROM workers
        WHERE id = ?
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?
    .ok_or_else(|| DatabaseError::NotFound {
        entity: "Worker",
        id: id.to_string(),
    })
}

/// Update a worker's editable profile fields.
pub async fn update_details(pool: &SqlitePool, id: &str, details: &WorkerDetails) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE workers
        SET description = ?, phone = ?, contact_email = ?, instagram = ?, photo_url = ?
        WHERE id = ?
        "#,
    )
    .bind(&details.description)
    .bind(&details.phone)
    .bind(&details.contact_email)
    .bind(&details.instagram)
    .bind(&details.photo_url)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Worker",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Soft-enable or soft-disable a worker. Workers are never deleted.
pub async fn set_active(pool: &SqlitePool, id: &str, active: bool) -> Result<()> {
    let result = sqlx::query(
        r#"
        UPDATE workers
        SET active = ?
        WHERE id = ?
        "#,
    )
    .bind(active)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(DatabaseError::NotFound {
            entity: "Worker",
            id: id.to_string(),
        });
    }

    Ok(())
}

/// Search active workers, optionally restricted to those linked to a given
/// trade and/or city.
///
/// Results are ordered by creation time then id, so a given filter over a
/// given data snapshot always yields the same sequence. Filtering goes
/// through the link tables keyed by existing worker rows, so links whose
/// worker is gone can never surface.
pub async fn search(
    pool: &SqlitePool,
    trade_id: Option<&str>,
    city_id: Option<&str>,
) -> Result<Vec<Worker>> {
    let workers = sqlx::query_as::<_, Worker>(
        r#"
        SELECT id, active, dni_verified, description, phone, contact_email,
               instagram, photo_url, created_at
        FROM workers
        WHERE active = 1
          AND (?1 IS NULL OR EXISTS (
                SELECT 1 FROM worker_trades
                WHERE worker_id = workers.id AND trade_id = ?1
          ))
          AND (?2 IS NULL OR EXISTS (
                SELECT 1 FROM worker_cities
                WHERE worker_id = workers.id AND city_id = ?2
          ))
        ORDER BY created_at, id
        "#,
    )
    .bind(trade_id)
    .bind(city_id)
    .fetch_all(pool)
    .await?;

    Ok(workers)
}
