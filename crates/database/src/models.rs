//! Database models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A trade category (e.g. electrician), immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Trade {
    /// Trade id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-stable identifier (e.g. "electricista").
    pub slug: String,
    /// Optional icon reference.
    pub icon: Option<String>,
}

/// A city a worker can cover, immutable reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct City {
    /// City id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Administrative region, if any.
    pub region: Option<String>,
}

/// A tradesperson offering services.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Worker {
    /// Worker id (same id as the owning user account).
    pub id: String,
    /// Soft-disable flag; inactive workers never appear in search results.
    pub active: bool,
    /// Whether the worker's national id document has been verified.
    pub dni_verified: bool,
    /// Free-text description of experience and services.
    pub description: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Instagram handle (without @).
    pub instagram: Option<String>,
    /// Opaque photo reference resolved by the media service; never
    /// interpreted here.
    pub photo_url: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Editable worker profile fields, used by detail updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerDetails {
    /// Free-text description.
    pub description: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Contact email.
    pub contact_email: Option<String>,
    /// Instagram handle.
    pub instagram: Option<String>,
    /// Opaque photo reference.
    pub photo_url: Option<String>,
}

/// One entry in the append-only review log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Review {
    /// Auto-incrementing id.
    pub id: i64,
    /// Reviewed worker.
    pub worker_id: String,
    /// Review author (a seeker, never the worker themself).
    pub author_id: String,
    /// Star rating, 1 to 5.
    pub rating: i64,
    /// Optional free-text comment.
    pub comment: Option<String>,
    /// Creation timestamp.
    pub created_at: String,
}

/// Derived rating aggregate for one worker.
///
/// A projection over the review log, never a source of truth: if the two
/// disagree, the log wins (see `review::rebuild_summary`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct RatingSummary {
    /// Worker the summary belongs to.
    pub worker_id: String,
    /// Number of committed reviews.
    pub review_count: i64,
    /// Sum of all committed ratings.
    pub rating_sum: i64,
}

impl RatingSummary {
    /// An empty summary for a worker with no reviews yet.
    pub fn empty(worker_id: &str) -> Self {
        Self {
            worker_id: worker_id.to_string(),
            review_count: 0,
            rating_sum: 0,
        }
    }

    /// Unrounded mean rating, or `None` when there are no reviews.
    ///
    /// "No rating yet" is deliberately distinct from a 0.0 rating; callers
    /// must not coalesce the two.
    pub fn average(&self) -> Option<f64> {
        if self.review_count == 0 {
            None
        } else {
            Some(self.rating_sum as f64 / self.review_count as f64)
        }
    }

    /// Mean rating rounded to one decimal place, half away from zero.
    ///
    /// This is the display value; internal comparisons (star floors etc.)
    /// should use [`average`](Self::average).
    pub fn display_average(&self) -> Option<f64> {
        self.average().map(|avg| (avg * 10.0).round() / 10.0)
    }
}
