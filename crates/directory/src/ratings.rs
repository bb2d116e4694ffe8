//! Review submission and rating aggregation.
//!
//! The review log is append-only; each accepted submission also bumps the
//! worker's materialized summary inside the same store transaction, so a
//! summary read issued right after a successful submission already
//! reflects it. There is no retraction path.

use std::collections::HashMap;

use oficios_database::{review, worker, RatingSummary, Review};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DirectoryError, Result};
use crate::session::Session;
use crate::validation::{self, ValidationError};

/// Get the rating summary for one worker.
///
/// A worker with no reviews yet reports a present summary whose average
/// is absent; callers must not render that as a zero-star rating.
pub async fn summarize(pool: &SqlitePool, worker_id: &str) -> Result<RatingSummary> {
    worker::get_worker(pool, worker_id).await?;
    Ok(review::get_summary(pool, worker_id).await?)
}

/// Get rating summaries for a set of workers in one bulk read.
///
/// Every requested id is present in the map; ids without reviews carry
/// the empty summary. Never issues per-worker queries.
pub async fn summarize_batch(
    pool: &SqlitePool,
    worker_ids: &[String],
) -> Result<HashMap<String, RatingSummary>> {
    Ok(review::get_summaries(pool, worker_ids).await?)
}

/// List a worker's reviews, newest first.
pub async fn list_reviews(pool: &SqlitePool, worker_id: &str) -> Result<Vec<Review>> {
    worker::get_worker(pool, worker_id).await?;
    Ok(review::list_reviews(pool, worker_id).await?)
}

/// Submit a review for a worker.
///
/// Invariants checked before any write: rating within 1..=5, comment
/// length, seeker role, and no self-review. The target must exist and be
/// active. On success the returned summary read is already up to date.
pub async fn submit_review(
    pool: &SqlitePool,
    session: &Session,
    worker_id: &str,
    rating: i64,
    comment: Option<&str>,
) -> Result<Review> {
    validation::validate_rating(rating)?;
    if let Some(comment) = comment {
        validation::validate_comment(comment)?;
    }
    if session.user_id == worker_id {
        return Err(ValidationError::SelfReview.into());
    }
    if !session.can_review(worker_id) {
        return Err(ValidationError::NotASeeker.into());
    }

    let target = worker::get_worker(pool, worker_id).await?;
    if !target.active {
        // Inactive profiles are invisible; reviewing one is a dangling
        // lookup, not a validation problem.
        return Err(DirectoryError::NotFound {
            entity: "Worker",
            id: worker_id.to_string(),
        });
    }

    let review = review::add_review(pool, worker_id, &session.user_id, rating, comment).await?;

    debug!(
        "Review {} ({} stars) recorded for worker {}",
        review.id, rating, worker_id
    );

    Ok(review)
}

/// Recompute a worker's summary from the review log.
///
/// The log always wins over the materialized projection; this is the
/// reconciliation path for a projection that has drifted.
pub async fn rebuild_summary(pool: &SqlitePool, worker_id: &str) -> Result<RatingSummary> {
    worker::get_worker(pool, worker_id).await?;
    Ok(review::rebuild_summary(pool, worker_id).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::Role;
    use crate::testing;
    use oficios_database::worker;

    fn seeker(id: &str) -> Session {
        Session::new(id, Role::Seeker)
    }

    #[tokio::test]
    async fn test_summary_matches_submitted_ratings() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        for (author, rating) in [("s1", 5), ("s2", 4), ("s3", 5)] {
            submit_review(db.pool(), &seeker(author), "w1", rating, None)
                .await
                .unwrap();
        }

        let summary = summarize(db.pool(), "w1").await.unwrap();
        assert_eq!(summary.review_count, 3);
        assert_eq!(summary.display_average(), Some(4.7));
    }

    #[tokio::test]
    async fn test_unreviewed_worker_has_absent_average() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        let summary = summarize(db.pool(), "w1").await.unwrap();
        assert_eq!(summary.review_count, 0);
        assert_eq!(summary.average(), None, "no rating yet is not 0.0");
    }

    #[tokio::test]
    async fn test_summary_visible_immediately_after_submit() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        submit_review(db.pool(), &seeker("s1"), "w1", 3, Some("Cumplió"))
            .await
            .unwrap();
        let summary = summarize(db.pool(), "w1").await.unwrap();
        assert_eq!(summary.review_count, 1);
        assert_eq!(summary.average(), Some(3.0));
    }

    #[tokio::test]
    async fn test_self_review_rejected_and_not_recorded() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        let result = submit_review(db.pool(), &seeker("w1"), "w1", 5, None).await;
        assert!(matches!(
            result,
            Err(DirectoryError::Validation(ValidationError::SelfReview))
        ));

        let reviews = list_reviews(db.pool(), "w1").await.unwrap();
        assert!(reviews.is_empty());
    }

    #[tokio::test]
    async fn test_worker_role_cannot_review() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        let other_worker = Session::new("w2", Role::Worker);
        let result = submit_review(db.pool(), &other_worker, "w1", 4, None).await;
        assert!(matches!(
            result,
            Err(DirectoryError::Validation(ValidationError::NotASeeker))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_rating_rejected() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        for rating in [0, 6, -1] {
            let result = submit_review(db.pool(), &seeker("s1"), "w1", rating, None).await;
            assert!(matches!(result, Err(DirectoryError::Validation(_))));
        }
    }

    #[tokio::test]
    async fn test_inactive_worker_not_reviewable() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;
        worker::set_active(db.pool(), "w1", false).await.unwrap();

        let result = submit_review(db.pool(), &seeker("s1"), "w1", 5, None).await;
        assert!(matches!(result, Err(DirectoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_batch_is_complete_for_requested_ids() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;
        testing::add_worker(&db, "w2").await;

        submit_review(db.pool(), &seeker("s1"), "w1", 4, None)
            .await
            .unwrap();

        let ids = vec!["w1".to_string(), "w2".to_string()];
        let summaries = summarize_batch(db.pool(), &ids).await.unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries["w1"].review_count, 1);
        assert_eq!(summaries["w2"].review_count, 0);
        assert_eq!(summaries["w2"].average(), None);
    }

    #[tokio::test]
    async fn test_rebuild_reconciles_a_drifted_summary() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        submit_review(db.pool(), &seeker("s1"), "w1", 5, None)
            .await
            .unwrap();
        submit_review(db.pool(), &seeker("s2"), "w1", 2, None)
            .await
            .unwrap();

        // Force the projection out of sync with the log.
        sqlx::query("UPDATE rating_summaries SET review_count = 9, rating_sum = 45 WHERE worker_id = ?")
            .bind("w1")
            .execute(db.pool())
            .await
            .unwrap();

        let rebuilt = rebuild_summary(db.pool(), "w1").await.unwrap();
        assert_eq!(rebuilt.review_count, 2);
        assert_eq!(rebuilt.rating_sum, 7);
        assert_eq!(summarize(db.pool(), "w1").await.unwrap(), rebuilt);

        let missing = rebuild_summary(db.pool(), "ghost").await;
        assert!(matches!(missing, Err(DirectoryError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_reviews_listed_newest_first() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        submit_review(db.pool(), &seeker("s1"), "w1", 5, Some("primero"))
            .await
            .unwrap();
        submit_review(db.pool(), &seeker("s2"), "w1", 2, Some("segundo"))
            .await
            .unwrap();

        let reviews = list_reviews(db.pool(), "w1").await.unwrap();
        assert_eq!(reviews.len(), 2);
        assert_eq!(reviews[0].comment.as_deref(), Some("segundo"));
    }
}
