use std::collections::HashMap;

use crate::error::ReconError;
use crate::model::Origin;

// ---------------------------------------------------------------------------
// Synonym mapping
// ---------------------------------------------------------------------------

/// One canonical field and its header synonyms, in declared priority order.
/// Synonyms are matched as substrings of the normalized header.
pub struct FieldSpec {
    pub field: &'static str,
    pub synonyms: &'static [&'static str],
}

/// Normalize a header for synonym matching: lowercase, trim, strip the
/// punctuation that varies across municipal exports.
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '.' | '/' | '-'))
        .collect()
}

/// Map source headers to canonical fields by synonym substring match.
///
/// Headers are scanned positionally; for each header the first canonical
/// field in declared spec order with a matching synonym wins, and a field
/// already mapped is never remapped. That makes the tie-break explicit:
/// declared field order first, header position second.
pub fn map_columns(headers: &[String], spec: &[FieldSpec]) -> HashMap<&'static str, usize> {
    let mut mapping: HashMap<&'static str, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let normalized = normalize_header(header);
        if normalized.is_empty() {
            continue;
        }
        for field_spec in spec {
            if mapping.contains_key(field_spec.field) {
                continue;
            }
            if field_spec.synonyms.iter().any(|syn| normalized.contains(syn)) {
                mapping.insert(field_spec.field, idx);
                break;
            }
        }
    }

    mapping
}

/// Map source headers through an explicit rename table (exact header match
/// after trimming), for fixed-header sources.
pub fn map_renames(
    headers: &[String],
    renames: &[(&'static str, &'static str)],
) -> HashMap<&'static str, usize> {
    let mut mapping: HashMap<&'static str, usize> = HashMap::new();

    for (idx, header) in headers.iter().enumerate() {
        let trimmed = header.trim();
        for (source, field) in renames {
            if !mapping.contains_key(field) && trimmed == *source {
                mapping.insert(field, idx);
                break;
            }
        }
    }

    mapping
}

/// Check mandatory canonical fields, listing every absent one.
pub fn require(
    mapping: &HashMap<&'static str, usize>,
    mandatory: &[&'static str],
    origin: Origin,
) -> Result<(), ReconError> {
    let missing: Vec<String> = mandatory
        .iter()
        .filter(|field| !mapping.contains_key(**field))
        .map(|field| field.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ReconError::SchemaMapping { origin, missing })
    }
}
