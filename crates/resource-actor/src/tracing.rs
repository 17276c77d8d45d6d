//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber used by every actor and by
//! the request pipeline built on top of them.
//!
//! - **Filter**: taken from `RUST_LOG` when set, otherwise from the `default_filter`
//!   argument (usually the service configuration's `log_filter`).
//! - **Format**: compact, with span names inline and module paths hidden. Actors log an
//!   `entity_type` field instead, so the target would only repeat it.
//!
//! ```bash
//! RUST_LOG=info cargo run      # lifecycle: Created / Updated / Deleted
//! RUST_LOG=debug cargo run     # every request with its payload
//! ```
//!
//! Typical output for a create followed by a denied remove:
//!
//! ```text
//! INFO dispatch: Created entity_type="orders" id=1 size=1
//! WARN dispatch:remove: Permission denied principal="alice" permission="orders:remove"
//! ```

use tracing_subscriber::EnvFilter;

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
