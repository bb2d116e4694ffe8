//! Review log and rating projection.
//!
//! Reviews are append-only: there is no update or delete path. Each insert
//! bumps the `rating_summaries` projection in the same transaction, so a
//! summary read issued after a successful insert always reflects it.

use std::collections::HashMap;

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::Result;
use crate::models::{RatingSummary, Review};

/// Append a review and bump the worker's rating projection atomically.
///
/// Eligibility rules (self-review, rating range, author role) are the
/// caller's responsibility; this is a dumb append.
pub async fn add_review(
    pool: &SqlitePool,
    worker_id: &str,
    author_id: &str,
    rating: i64,
    comment: Option<&str>,
) -> Result<Review> {
    let mut tx = pool.begin().await?;

    let review = sqlx::query_as::<_, Review>(
        r#"
        INSERT INTO reviews (worker_id, author_id, rating, comment)
        VALUES (?, ?, ?, ?)
        RETURNING id, worker_id, author_id, rating, comment, created_at
        "#,
    )
    .bind(worker_id)
    .bind(author_id)
    .bind(rating)
    .bind(comment)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO rating_summaries (worker_id, review_count, rating_sum)
        VALUES (?, 1, ?)
        ON CONFLICT(worker_id) DO UPDATE SET
            review_count = review_count + 1,
            rating_sum = rating_sum + excluded.rating_sum
        "#,
    )
    .bind(worker_id)
    .bind(rating)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    debug!("Recorded review {} for worker {}", review.id, worker_id);

    Ok(review)
}

/// Get the rating projection for one worker.
///
/// A worker with no reviews has no projection row; that reads as the
/// empty summary, not an error.
pub async fn get_summary(pool: &SqlitePool, worker_id: &str) -> Result<RatingSummary> {
    let summary = sqlx::query_as::<_, RatingSummary>(
        r#"
        SELECT worker_id, review_count, rating_sum
        FROM rating_summaries
        WHERE worker_id = ?
        "#,
    )
    .bind(worker_id)
    .fetch_optional(pool)
    .await?;

    Ok(summary.unwrap_or_else(|| RatingSummary::empty(worker_id)))
}

/// Get rating projections for a set of workers in one query.
///
/// Workers without reviews map to the empty summary, so every requested
/// id is present in the returned map.
pub async fn get_summaries(
    pool: &SqlitePool,
    worker_ids: &[String],
) -> Result<HashMap<String, RatingSummary>> {
    let mut summaries: HashMap<String, RatingSummary> = worker_ids
        .iter()
        .map(|id| (id.clone(), RatingSummary::empty(id)))
        .collect();

    if worker_ids.is_empty() {
        return Ok(summaries);
    }

    let placeholders = vec!["?"; worker_ids.len()].join(", ");
    let sql = format!(
        r#"
        SELECT worker_id, review_count, rating_sum
        FROM rating_summaries
        WHERE worker_id IN ({})
        "#,
        placeholders
    );

    let mut query = sqlx::query_as::<_, RatingSummary>(&sql);
    for worker_id in worker_ids {
        query = query.bind(worker_id);
    }
    for row in query.fetch_all(pool).await? {
        summaries.insert(row.worker_id.clone(), row);
    }

    Ok(summaries)
}

/// List a worker's reviews, newest first.
pub async fn list_reviews(pool: &SqlitePool, worker_id: &str) -> Result<Vec<Review>> {
    let reviews = sqlx::query_as::<_, Review>(
        r#"
        SELECT id, worker_id, author_id, rating, comment, created_at
        FROM reviews
        WHERE worker_id = ?
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .bind(worker_id)
    .fetch_all(pool)
    .await?;

    Ok(reviews)
}

/// Recompute a worker's projection row from the review log.
///
/// The log is the source of truth; whatever the projection said before
/// is overwritten.
pub async fn rebuild_summary(pool: &SqlitePool, worker_id: &str) -> Result<RatingSummary> {
    sqlx::query(
        r#"
        INSERT INTO rating_summaries (worker_id, review_count, rating_sum)
        SELECT ?1, COUNT(*), COALESCE(SUM(rating), 0)
        FROM reviews
        WHERE worker_id = ?1
        ON CONFLICT(worker_id) DO UPDATE SET
            review_count = excluded.review_count,
            rating_sum = excluded.rating_sum
        "#,
    )
    .bind(worker_id)
    .execute(pool)
    .await?;

    get_summary(pool, worker_id).await
}
