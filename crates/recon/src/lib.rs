//! Reconciliation engine: normalizes municipal tax exports and accounting
//! ledger rows into a shared schema, derives deterministic match keys, and
//! tags each population by set membership against the other.
//!
//! This crate is pure: no file IO, no formats. Raw grids come in as
//! [`RawTable`] values built by the io crate; everything here is a
//! deterministic function of its inputs.

pub mod error;
pub mod format;
pub mod key;
pub mod mapper;
pub mod model;
pub mod normalize;
pub mod validate;

pub use error::ReconError;
pub use model::{
    CanonicalRecord, Cell, KeyedRecord, MatchStatus, Origin, PopulationSummary, RawTable,
    TableFormat, ValidationResult,
};
