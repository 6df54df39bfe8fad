//! Ayurkosha — therapy-clinic records over a flat key-value document store.
//!
//! Arbitrary JSON documents live under prefixed string keys (`user_<id>`,
//! `patient_<id>`, `therapy_session_<id>`, ...) in a two-column table.
//! The [`repository`] services emulate the relational shape on top: joins,
//! filters, and ordering run in application memory after prefix scans, and
//! [`analytics`] reduces full scans into summary statistics. Everything is
//! written against the [`store::KvStore`] trait, with a remote PostgREST
//! backend and a local SQLite backend shipped in [`store`].

pub mod analytics;
pub mod config;
pub mod models;
pub mod repository;
pub mod store;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries and diagnostics harnesses embedding this
/// crate. Honors `RUST_LOG`, falling back to the crate-scoped default.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
