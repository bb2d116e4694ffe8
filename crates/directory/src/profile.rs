//! Worker profile editing and onboarding completion.
//!
//! Both paths update the worker's details and install the complete trade
//! and city selections via the replace-all protocol. Both selections are
//! validated up front, so a submission with one empty set leaves the
//! other set untouched as well.

use std::collections::BTreeSet;

use oficios_database::{worker, DatabaseError, WorkerDetails};
use sqlx::SqlitePool;
use tracing::debug;

use crate::associations;
use crate::error::Result;
use crate::session::{Role, Session};
use crate::validation::{self, ValidationError};

/// Save a worker's profile: details plus the full trade and city sets.
///
/// Only the session's own worker profile can be edited, and only by a
/// worker-role session. Concurrent saves for the same worker race with
/// last-writer-wins semantics.
pub async fn update_profile(
    pool: &SqlitePool,
    session: &Session,
    details: &WorkerDetails,
    trades: &BTreeSet<String>,
    cities: &BTreeSet<String>,
) -> Result<()> {
    if session.role != Role::Worker {
        return Err(ValidationError::NotAWorker.into());
    }
    if trades.is_empty() {
        return Err(ValidationError::EmptySelection { kind: "trade" }.into());
    }
    if cities.is_empty() {
        return Err(ValidationError::EmptySelection { kind: "city" }.into());
    }
    if let Some(description) = &details.description {
        validation::validate_description(description)?;
    }

    worker::update_details(pool, &session.user_id, details).await?;
    associations::replace_trade_links(pool, &session.user_id, trades).await?;
    associations::replace_city_links(pool, &session.user_id, cities).await?;

    debug!("Profile saved for worker {}", session.user_id);

    Ok(())
}

/// Complete onboarding for a newly registered worker.
///
/// Creates the worker record if role selection has not already done so,
/// then saves the initial profile. A worker leaves onboarding with at
/// least one trade and one city link.
pub async fn complete_onboarding(
    pool: &SqlitePool,
    session: &Session,
    details: &WorkerDetails,
    trades: &BTreeSet<String>,
    cities: &BTreeSet<String>,
) -> Result<()> {
    if session.role != Role::Worker {
        return Err(ValidationError::NotAWorker.into());
    }

    match worker::create_worker(pool, &session.user_id).await {
        Ok(_) => {}
        Err(DatabaseError::AlreadyExists { .. }) => {}
        Err(e) => return Err(e.into()),
    }

    update_profile(pool, session, details, trades, cities).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DirectoryError;
    use crate::testing;
    use oficios_database::association;

    fn set(ids: &[&str]) -> BTreeSet<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn worker_session(id: &str) -> Session {
        Session::new(id, Role::Worker)
    }

    #[tokio::test]
    async fn test_onboarding_installs_details_and_links() {
        let db = testing::fixture().await;

        let details = WorkerDetails {
            description: Some("Instalaciones eléctricas".to_string()),
            phone: Some("1155550000".to_string()),
            ..Default::default()
        };
        complete_onboarding(
            db.pool(),
            &worker_session("w1"),
            &details,
            &set(&[testing::TRADE_ELECTRICIAN]),
            &set(&[testing::CITY_SPRINGFIELD]),
        )
        .await
        .unwrap();

        let saved = worker::get_worker(db.pool(), "w1").await.unwrap();
        assert_eq!(saved.description.as_deref(), Some("Instalaciones eléctricas"));

        let trades = association::trade_ids_for(db.pool(), "w1").await.unwrap();
        assert_eq!(trades, vec![testing::TRADE_ELECTRICIAN.to_string()]);
        let cities = association::city_ids_for(db.pool(), "w1").await.unwrap();
        assert_eq!(cities, vec![testing::CITY_SPRINGFIELD.to_string()]);
    }

    #[tokio::test]
    async fn test_onboarding_cannot_finish_with_empty_selection() {
        let db = testing::fixture().await;

        let result = complete_onboarding(
            db.pool(),
            &worker_session("w1"),
            &WorkerDetails::default(),
            &set(&[testing::TRADE_PLUMBER]),
            &BTreeSet::new(),
        )
        .await;
        assert!(matches!(
            result,
            Err(DirectoryError::Validation(ValidationError::EmptySelection { kind: "city" }))
        ));

        // Neither selection was installed.
        let trades = association::trade_ids_for(db.pool(), "w1").await.unwrap();
        assert!(trades.is_empty());
    }

    #[tokio::test]
    async fn test_update_replaces_both_sets() {
        let db = testing::fixture().await;
        let session = worker_session("w1");

        complete_onboarding(
            db.pool(),
            &session,
            &WorkerDetails::default(),
            &set(&[testing::TRADE_PLUMBER]),
            &set(&[testing::CITY_SPRINGFIELD]),
        )
        .await
        .unwrap();

        update_profile(
            db.pool(),
            &session,
            &WorkerDetails::default(),
            &set(&[testing::TRADE_ELECTRICIAN]),
            &set(&[testing::CITY_SHELBYVILLE, testing::CITY_SPRINGFIELD]),
        )
        .await
        .unwrap();

        let trades = association::trade_ids_for(db.pool(), "w1").await.unwrap();
        assert_eq!(trades, vec![testing::TRADE_ELECTRICIAN.to_string()]);
        let cities = association::city_ids_for(db.pool(), "w1").await.unwrap();
        assert_eq!(cities.len(), 2);
    }

    #[tokio::test]
    async fn test_seeker_cannot_edit_a_worker_profile() {
        let db = testing::fixture().await;
        testing::add_worker(&db, "w1").await;

        let seeker = Session::new("w1", Role::Seeker);
        let result = update_profile(
            db.pool(),
            &seeker,
            &WorkerDetails::default(),
            &set(&[testing::TRADE_PLUMBER]),
            &set(&[testing::CITY_SPRINGFIELD]),
        )
        .await;
        assert!(matches!(
            result,
            Err(DirectoryError::Validation(ValidationError::NotAWorker))
        ));
    }
}
