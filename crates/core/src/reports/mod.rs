//! Project report generation.
//!
//! Pure computations over already-closed projects; nothing here mutates the
//! ledger or depends on the allocation engine.

pub mod service;
pub mod types;


pub use service::ReportService;
pub use types::CompletionRow;
