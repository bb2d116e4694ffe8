//! Replace-all protocol for a worker's trade and city link sets.
//!
//! Profile edits submit the complete desired set; the protocol diffs it
//! against the current rows and issues only the delta, so unchanged links
//! are never churned. Removal is issued and acknowledged before
//! reinsertion: the intended effect is a precise set replacement, not a
//! union. The backing store gives no cross-statement transaction here, so
//! a failure after an acknowledged removal is surfaced distinctly as
//! [`DirectoryError::PartialAssociationUpdate`] instead of being rolled
//! back or swallowed; the caller should prompt a resubmission.
//!
//! Concurrent replacements for the same worker race; last writer wins.

use std::collections::BTreeSet;
use std::fmt;

use oficios_database::{association, worker};
use sqlx::SqlitePool;
use tracing::{debug, warn};

use crate::error::{DirectoryError, Result};
use crate::validation::ValidationError;

/// Which many-to-many link set an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Worker/trade links.
    Trade,
    /// Worker/city links.
    City,
}

impl LinkKind {
    fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Trade => "trade",
            LinkKind::City => "city",
        }
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Replace a worker's trade links with exactly the given set.
///
/// Rejects an empty set before touching the store: a worker must keep at
/// least one trade. Replaying the same set is a no-op.
pub async fn replace_trade_links(
    pool: &SqlitePool,
    worker_id: &str,
    new_ids: &BTreeSet<String>,
) -> Result<()> {
    replace_links(pool, worker_id, new_ids, LinkKind::Trade).await
}

/// Replace a worker's city links with exactly the given set.
///
/// The structural twin of [`replace_trade_links`].
pub async fn replace_city_links(
    pool: &SqlitePool,
    worker_id: &str,
    new_ids: &BTreeSet<String>,
) -> Result<()> {
    replace_links(pool, worker_id, new_ids, LinkKind::City).await
}

async fn replace_links(
    pool: &SqlitePool,
    worker_id: &str,
    new_ids: &BTreeSet<String>,
    kind: LinkKind,
) -> Result<()> {
    if new_ids.is_empty() {
        return Err(ValidationError::EmptySelection { kind: kind.as_str() }.into());
    }

    // NotFound for unknown workers, before any mutation.
    worker::get_worker(pool, worker_id).await?;

    let current: BTreeSet<String> = match kind {
        LinkKind::Trade => association::trade_ids_for(pool, worker_id).await?,
        LinkKind::City => association::city_ids_for(pool, worker_id).await?,
    }
    .into_iter()
    .collect();

    let to_remove: Vec<String> = current.difference(new_ids).cloned().collect();
    let to_add: Vec<String> = new_ids.difference(&current).cloned().collect();

    if to_remove.is_empty() && to_add.is_empty() {
        debug!("No {} link changes for worker {}", kind, worker_id);
        return Ok(());
    }

    // Removal first, acknowledged before any insert is issued. A failure
    // here leaves the prior set intact and propagates as unavailability.
    match kind {
        LinkKind::Trade => association::delete_trade_links(pool, worker_id, &to_remove).await?,
        LinkKind::City => association::delete_city_links(pool, worker_id, &to_remove).await?,
    };

    let inserted = match kind {
        LinkKind::Trade => association::insert_trade_links(pool, worker_id, &to_add).await,
        LinkKind::City => association::insert_city_links(pool, worker_id, &to_add).await,
    };

    if let Err(e) = inserted {
        if to_remove.is_empty() {
            // Nothing was removed, so the prior set still holds.
            return Err(e.into());
        }
        warn!(
            "Partial {} link update for worker {}: removed {} rows, reinsertion failed: {}",
            kind,
            worker_id,
            to_remove.len(),
            e
        );
        return Err(DirectoryError::PartialAssociationUpdate {
            worker_id: worker_id.to_string(),
            kind,
            source: e,
        });
    }

    debug!(
        "Replaced {} links for worker {}: -{} +{}",
        kind,
        worker_id,
        to_remove.len(),
        to_add.len()
    );

    Ok(())
}
