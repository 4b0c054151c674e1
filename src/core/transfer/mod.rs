//! Rule transfer orchestration
//!
//! - [`export`] - listed rules to a USD bundle
//! - [`import`] - bundle rules to native-currency create requests
//! - [`delete`] - chunked, best-effort deletion of an account's rules
//! - [`coordinator`] - per-account state machines and multi-account fan-out
//! - [`summary`] - per-account outcomes and the aggregate summary
//! - [`progress`] - the progress sink the presentation layer implements

pub mod coordinator;
pub mod delete;
pub mod export;
pub mod import;
pub mod progress;
pub mod summary;

pub use coordinator::{TransferCoordinator, TransferSettings};
pub use progress::{ProgressLog, ProgressSink, Severity, TracingSink};
pub use summary::{
    AccountImportResult, DeleteOutcome, ExportOutcome, FanoutSummary, ImportReport, Operation,
};
