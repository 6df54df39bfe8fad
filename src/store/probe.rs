//! Reachability probe for the record store.

use serde::Serialize;

use super::{KvStore, StoreError};

/// Key used for the existence probe. Whether it exists is irrelevant —
/// only whether the store answers.
const PROBE_KEY: &str = "connection_probe";

/// Best-effort store status; never an error from the caller's point of view.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    pub reachable: bool,
    /// False when the store answered but the records table is absent.
    pub provisioned: bool,
    pub detail: String,
}

/// Issue a single lightweight probe and classify the outcome.
pub async fn test_connection(store: &impl KvStore) -> StoreStatus {
    match store.get(PROBE_KEY).await {
        Ok(_) => StoreStatus {
            reachable: true,
            provisioned: true,
            detail: "store reachable".to_string(),
        },
        Err(err) => classify(err),
    }
}

fn classify(err: StoreError) -> StoreStatus {
    match &err {
        StoreError::Unavailable(detail) => {
            tracing::debug!(error = %detail, "Store probe: unreachable");
            StoreStatus {
                reachable: false,
                provisioned: false,
                detail: detail.clone(),
            }
        }
        StoreError::Backend { status, body }
            if *status == 404 || body.contains("42P01") || body.contains("does not exist") =>
        {
            unprovisioned()
        }
        StoreError::Sqlite(e) if e.to_string().contains("no such table") => unprovisioned(),
        other => StoreStatus {
            reachable: true,
            provisioned: true,
            detail: other.to_string(),
        },
    }
}

fn unprovisioned() -> StoreStatus {
    StoreStatus {
        reachable: true,
        provisioned: false,
        detail: "store reachable but the records table is not provisioned".to_string(),
    }
}
