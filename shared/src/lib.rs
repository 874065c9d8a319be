//! Shared types and business rules for the Candango ERP system
//!
//! This crate contains the domain model and the pure calculations shared
//! between the client layer, the frontend (via WASM), and other components
//! of the system: refinement grouping, liquidation state, sale pricing,
//! report aggregation, and validation.

pub mod models;
pub mod refinement;
pub mod report;
pub mod reporting;
pub mod types;
pub mod validation;

pub use models::*;
pub use refinement::*;
pub use report::*;
pub use reporting::*;
pub use types::*;
pub use validation::*;
