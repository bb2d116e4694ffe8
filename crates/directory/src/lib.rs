//! Matching and rating engine for the Oficios trades directory.
//!
//! This crate is the core behind the directory UI: it answers "which
//! active workers match this trade/city filter", keeps each worker's
//! rating aggregate consistent with the append-only review log, and
//! maintains a worker's trade and city selections through a replace-all
//! protocol.
//!
//! # Components
//!
//! - [`matching`] - filtered search over active workers, enriched with
//!   full trade/city lists and rating summaries via bulk reads
//! - [`ratings`] - review submission with eligibility checks, and the
//!   rating aggregation that never lags behind the log
//! - [`associations`] - the diff-based replace-all protocol for the
//!   worker/trade and worker/city link sets
//! - [`catalog`] - the fixed trade and city reference lists
//! - [`profile`] - onboarding and profile-save flows composing the above
//!
//! Identity is injected as a [`Session`] value threaded into each
//! operation; the persistent store is injected as an [`sqlx::SqlitePool`].
//! All operations report failure to the immediate caller through
//! [`DirectoryError`] and never retry on their own.
//!
//! # Example
//!
//! ```rust,ignore
//! use directory::{matching, SearchFilter};
//! use oficios_database::Database;
//!
//! # async fn example() -> directory::Result<()> {
//! let db = Database::connect("sqlite:oficios.db?mode=rwc").await?;
//! db.migrate().await?;
//!
//! // Browse-all: every active worker
//! let everyone = matching::search(db.pool(), &SearchFilter::default()).await?;
//!
//! // Narrowed to one trade
//! let plumbers = matching::search_by_trade_slug(db.pool(), "plomero", None).await?;
//! # Ok(())
//! # }
//! ```

pub mod associations;
pub mod catalog;
pub mod error;
pub mod matching;
pub mod profile;
pub mod ratings;
pub mod session;
pub mod validation;

pub use associations::LinkKind;
pub use error::{DirectoryError, Result};
pub use matching::{SearchFilter, WorkerListing};
pub use session::{Role, Session};
pub use validation::ValidationError;

// Re-export the store models callers see in return values.
pub use oficios_database::{City, RatingSummary, Review, Trade, Worker, WorkerDetails};

#[cfg(test)]
pub(crate) mod testing {
    //! Shared in-memory store fixtures for the module tests.

    use oficios_database::{association, catalog, review, worker, City, Database, Trade};

    pub const TRADE_PLUMBER: &str = "t-plomero";
    pub const TRADE_ELECTRICIAN: &str = "t-electricista";
    pub const CITY_SPRINGFIELD: &str = "c-springfield";
    pub const CITY_SHELBYVILLE: &str = "c-shelbyville";

    /// Fresh in-memory database with migrations run and the reference
    /// catalogs seeded.
    pub async fn fixture() -> Database {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        db.migrate().await.unwrap();

        for (id, name, slug) in [
            (TRADE_PLUMBER, "Plomero", "plomero"),
            (TRADE_ELECTRICIAN, "Electricista", "electricista"),
        ] {
            catalog::insert_trade(
                db.pool(),
                &Trade {
                    id: id.to_string(),
                    name: name.to_string(),
                    slug: slug.to_string(),
                    icon: None,
                },
            )
            .await
            .unwrap();
        }

        for (id, name) in [
            (CITY_SPRINGFIELD, "Springfield"),
            (CITY_SHELBYVILLE, "Shelbyville"),
        ] {
            catalog::insert_city(
                db.pool(),
                &City {
                    id: id.to_string(),
                    name: name.to_string(),
                    region: None,
                },
            )
            .await
            .unwrap();
        }

        db
    }

    pub async fn add_worker(db: &Database, id: &str) {
        worker::create_worker(db.pool(), id).await.unwrap();
    }

    pub async fn add_worker_with_links(db: &Database, id: &str, trades: &[&str], cities: &[&str]) {
        add_worker(db, id).await;
        let trades: Vec<String> = trades.iter().map(|s| s.to_string()).collect();
        let cities: Vec<String> = cities.iter().map(|s| s.to_string()).collect();
        association::insert_trade_links(db.pool(), id, &trades)
            .await
            .unwrap();
        association::insert_city_links(db.pool(), id, &cities)
            .await
            .unwrap();
    }

    pub async fn add_review(db: &Database, worker_id: &str, author_id: &str, rating: i64) {
        review::add_review(db.pool(), worker_id, author_id, rating, None)
            .await
            .unwrap();
    }
}
