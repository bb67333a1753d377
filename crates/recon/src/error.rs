use std::fmt;

use crate::model::Origin;

#[derive(Debug)]
pub enum ReconError {
    /// No viable encoding/separator/decimal combination produced a table.
    FormatDetection(String),
    /// A mandatory canonical field could not be located in the headers.
    SchemaMapping { origin: Origin, missing: Vec<String> },
    /// An origin-specific transform failed on unexpected data shape.
    Normalization { origin: Origin, message: String },
    /// Workbook serialization failure.
    Export(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FormatDetection(msg) => write!(f, "format detection failed: {msg}"),
            Self::SchemaMapping { origin, missing } => {
                write!(f, "{origin}: missing mandatory column(s): {}", missing.join(", "))
            }
            Self::Normalization { origin, message } => {
                write!(f, "{origin}: normalization failed: {message}")
            }
            Self::Export(msg) => write!(f, "export failed: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
