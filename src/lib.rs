pub mod api; // Remote HIMS collaborator: trait seam + reqwest client
pub mod auth; // Bearer-token store
pub mod config;
pub mod models;
pub mod registration; // Patient intake validation + fee/discount math
pub mod vitals; // Validator, emergency classifier, submission flow
pub mod workflow; // Appointment check-state machine

use tracing_subscriber::EnvFilter;

/// Initialize tracing for an app shell embedding this crate.
///
/// Honors `RUST_LOG`; defaults to `info` for this crate, `warn` elsewhere.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,frontdesk=info")),
        )
        .init();

    tracing::info!("frontdesk core v{}", config::APP_VERSION);
}
