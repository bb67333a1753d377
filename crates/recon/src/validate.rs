//! Cross-population validation: pure set-membership, both directions.

use std::collections::HashSet;

use crate::model::{KeyedRecord, MatchStatus, PopulationSummary, ValidationResult};

/// Tag every record in `a` Matched iff its key exists anywhere in `b`, and
/// symmetrically for `b`. This is membership testing, not 1:1 assignment:
/// several records sharing a key all match as long as the key appears in
/// the opposite population. Empty inputs produce empty outputs.
pub fn validate(
    a: Vec<KeyedRecord>,
    b: Vec<KeyedRecord>,
) -> (Vec<ValidationResult>, Vec<ValidationResult>) {
    let keys_a: HashSet<String> = a.iter().map(|r| r.key.clone()).collect();
    let keys_b: HashSet<String> = b.iter().map(|r| r.key.clone()).collect();

    let tag = |records: Vec<KeyedRecord>, other: &HashSet<String>| -> Vec<ValidationResult> {
        records
            .into_iter()
            .map(|keyed| {
                let status = if other.contains(&keyed.key) {
                    MatchStatus::Matched
                } else {
                    MatchStatus::Unmatched
                };
                ValidationResult {
                    record: keyed.record,
                    key: keyed.key,
                    status,
                }
            })
            .collect()
    };

    let results_a = tag(a, &keys_b);
    let results_b = tag(b, &keys_a);
    (results_a, results_b)
}

pub fn summarize(results: &[ValidationResult]) -> PopulationSummary {
    let matched = results
        .iter()
        .filter(|r| r.status == MatchStatus::Matched)
        .count();
    PopulationSummary {
        total: results.len(),
        matched,
        unmatched: results.len() - matched,
    }
}
