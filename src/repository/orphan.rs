//! Orphan detection and cleanup for the account/profile join.
//!
//! A non-atomic create can leave an account without a profile (or, after a
//! partial cleanup, a profile without an account). Detection computes the
//! symmetric difference by identifier; cleanup deletes both groups
//! best-effort and re-runs detection to confirm convergence.

use std::collections::HashSet;

use serde::Deserialize;

use crate::models::{Account, Role};
use crate::store::{Entity, KvStore, StoreError};

use super::decode_all;

/// Identifiers on each side of the account/profile join.
#[derive(Debug, Clone, serde::Serialize)]
pub struct OrphanReport {
    /// Identifiers present on both sides.
    pub complete: Vec<String>,
    pub accounts_without_profiles: Vec<String>,
    pub profiles_without_accounts: Vec<String>,
}

impl OrphanReport {
    pub fn is_clean(&self) -> bool {
        self.accounts_without_profiles.is_empty() && self.profiles_without_accounts.is_empty()
    }
}

/// Result of a best-effort cleanup pass.
#[derive(Debug, Clone, serde::Serialize)]
pub struct CleanupOutcome {
    pub deleted: usize,
    pub failed: usize,
    /// True when re-detection after the deletes found no orphans left.
    pub converged: bool,
}

/// Only a field the orphan scan needs; both profile kinds carry it.
#[derive(Deserialize)]
struct IdOnly {
    id: String,
}

fn profile_entity(role: Role) -> Result<Entity, StoreError> {
    match role {
        Role::Patient => Ok(Entity::PatientProfile),
        Role::Doctor => Ok(Entity::DoctorProfile),
        Role::Admin => Err(StoreError::ConstraintViolation(
            "admin accounts have no profile counterpart".to_string(),
        )),
    }
}

pub async fn detect_orphans(store: &impl KvStore, role: Role) -> Result<OrphanReport, StoreError> {
    let profile_kind = profile_entity(role)?;

    let accounts: Vec<Account> =
        decode_all(store.scan_by_prefix(Entity::Account.prefix()).await?)?;
    let profiles: Vec<IdOnly> = decode_all(store.scan_by_prefix(profile_kind.prefix()).await?)?;

    let account_ids: HashSet<&str> = accounts
        .iter()
        .filter(|account| account.role == role)
        .map(|account| account.id.as_str())
        .collect();
    let profile_ids: HashSet<&str> = profiles.iter().map(|p| p.id.as_str()).collect();

    let mut complete: Vec<String> = account_ids
        .intersection(&profile_ids)
        .map(|id| id.to_string())
        .collect();
    let mut accounts_without_profiles: Vec<String> = account_ids
        .difference(&profile_ids)
        .map(|id| id.to_string())
        .collect();
    let mut profiles_without_accounts: Vec<String> = profile_ids
        .difference(&account_ids)
        .map(|id| id.to_string())
        .collect();
    complete.sort();
    accounts_without_profiles.sort();
    profiles_without_accounts.sort();

    Ok(OrphanReport {
        complete,
        accounts_without_profiles,
        profiles_without_accounts,
    })
}

/// Delete every orphan on both sides. Each delete is attempted independently;
/// a failure is counted and logged but does not block the rest.
pub async fn cleanup_orphans(
    store: &impl KvStore,
    role: Role,
) -> Result<CleanupOutcome, StoreError> {
    let profile_kind = profile_entity(role)?;
    let report = detect_orphans(store, role).await?;

    let mut deleted = 0;
    let mut failed = 0;

    for id in &report.accounts_without_profiles {
        match store.delete(&Entity::Account.key(id)).await {
            Ok(()) => deleted += 1,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Failed to delete orphaned account");
                failed += 1;
            }
        }
    }
    for id in &report.profiles_without_accounts {
        match store.delete(&profile_kind.key(id)).await {
            Ok(()) => deleted += 1,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Failed to delete orphaned profile");
                failed += 1;
            }
        }
    }

    let converged = detect_orphans(store, role).await?.is_clean();
    if deleted > 0 || failed > 0 {
        tracing::info!(deleted, failed, converged, "Orphan cleanup finished");
    }

    Ok(CleanupOutcome {
        deleted,
        failed,
        converged,
    })
}
