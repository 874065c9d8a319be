//! Candango ERP - Client Layer
//!
//! Typed REST client and orchestration services for the Candango ERP
//! backend: product catalog, partners, expenses, production costs and
//! refinements, sales with liquidation locking, stock movements, the
//! company profile, dashboards, and printable reports. The presentation
//! shell links against this crate; all business math lives in `shared`.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod api;
pub mod config;
pub mod error;
pub mod services;

pub use api::ErpClient;
pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::Erp;

/// Initialize tracing for binaries and tests that embed this crate.
/// Reads `.env` first so RUST_LOG from there is honored.
pub fn init_tracing() {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "candango_erp_client=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
