//! File-facing layer: CSV format detection, spreadsheet read/write, and the
//! fixed reconciliation pipeline. All parsing semantics live in
//! `conciliador-recon`; this crate only moves bytes in and out of it.

pub mod detect;
pub mod export;
pub mod pipeline;
pub mod xlsx;

pub use pipeline::{reconcile, ReconciliationReport, SourceUpload};
