//! Deterministic match-key derivation.
//!
//! A key is `<document number>-<amount>` with the amount rendered at a fixed
//! two decimals, so identical canonical inputs always collapse to the same
//! key regardless of the original textual formatting ("500.0" vs "500",
//! 10.0 vs 10.00). The `-` delimiter keeps "12"+"340" from aliasing
//! "123"+"40".

use crate::model::{CanonicalRecord, KeyedRecord};

/// Strip the trailing ".0" artifact left by numeric-typed identifiers.
pub fn normalize_doc(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix(".0").unwrap_or(trimmed).to_string()
}

/// Render integer cents as a fixed two-decimal string ("10.00", "-3.05").
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    format!("{sign}{}.{:02}", abs / 100, abs % 100)
}

pub fn match_key(doc_number: &str, amount_cents: i64) -> String {
    format!("{}-{}", normalize_doc(doc_number), format_cents(amount_cents))
}

/// Derive keys for a whole population using each record's designated amount.
pub fn key_records(records: Vec<CanonicalRecord>) -> Vec<KeyedRecord> {
    records
        .into_iter()
        .filter_map(|record| {
            let amount = record.key_amount()?;
            let key = match_key(&record.doc_number, amount);
            Some(KeyedRecord { record, key })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Origin;

    #[test]
    fn key_is_idempotent() {
        let first = match_key("500", 1000);
        let second = match_key("500", 1000);
        assert_eq!(first, second);
        assert_eq!(first, "500-10.00");
    }

    #[test]
    fn doc_number_formatting_collapses() {
        assert_eq!(match_key("500.0", 1000), match_key("500", 1000));
        assert_eq!(match_key(" 500 ", 1000), match_key("500", 1000));
    }

    #[test]
    fn amount_formatting_collapses() {
        // 10.0 and 10.00 both coerce to 1000 cents upstream.
        assert_eq!(format_cents(1000), "10.00");
        assert_eq!(format_cents(1001), "10.01");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(-305), "-3.05");
    }

    #[test]
    fn delimiter_prevents_aliasing() {
        // doc "12" amount 340.00 vs doc "123" amount 40.00
        assert_ne!(match_key("12", 34000), match_key("123", 4000));
    }

    #[test]
    fn key_records_uses_designated_amount() {
        let mut municipal = CanonicalRecord::new(Origin::Fortaleza);
        municipal.doc_number = "500".into();
        municipal.tax_cents = Some(1000);

        let mut ledger = CanonicalRecord::new(Origin::Razao);
        ledger.doc_number = "500".into();
        ledger.credit_cents = Some(1000);

        let keyed_a = key_records(vec![municipal]);
        let keyed_b = key_records(vec![ledger]);
        assert_eq!(keyed_a[0].key, keyed_b[0].key);
    }
}
