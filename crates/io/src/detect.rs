//! CSV format detection.
//!
//! Ledger exports arrive with no declared encoding, separator or decimal
//! convention. Detection walks a fixed candidate cascade (caller hint first,
//! then the common Brazilian conventions) and accepts the first combination
//! that yields a plausible table.

use conciliador_recon::model::{Cell, Origin, RawTable, TableFormat};
use conciliador_recon::ReconError;
use encoding_rs::{UTF_16BE, UTF_16LE, WINDOWS_1252};

/// Caller knowledge about a CSV source. Hints are tried first, never trusted
/// blindly: a hint that fails to parse falls through to the cascade.
#[derive(Debug, Clone, Default)]
pub struct CsvHints {
    pub encoding: Option<&'static str>,
    pub separator: Option<char>,
    pub decimal: Option<char>,
}

const ENCODING_CANDIDATES: &[&str] = &["utf-8", "windows-1252", "utf-16"];
const SEPARATOR_CANDIDATES: &[Option<char>] = &[Some(';'), Some(','), Some('\t'), None];

/// Rows scanned when sampling the decimal convention and the header row.
const SCAN_LIMIT: usize = 50;

/// Decode and parse CSV bytes, walking the candidate cascade.
///
/// A candidate is accepted when some row in the scan window splits into at
/// least two fields (banner lines above the real header are single-field);
/// the trailing separator-less candidate accepts single-column files.
/// Exhaustion of the cascade is a `FormatDetection` error.
pub fn detect_csv(
    bytes: &[u8],
    origin: Origin,
    source_name: &str,
    hints: &CsvHints,
) -> Result<RawTable, ReconError> {
    let mut encodings: Vec<&'static str> = Vec::new();
    if let Some(hint) = hints.encoding {
        encodings.push(hint);
    }
    for &candidate in ENCODING_CANDIDATES {
        if !encodings.contains(&candidate) {
            encodings.push(candidate);
        }
    }

    let mut separators: Vec<Option<char>> = Vec::new();
    if let Some(hint) = hints.separator {
        separators.push(Some(hint));
    }
    for &candidate in SEPARATOR_CANDIDATES {
        if !separators.contains(&candidate) {
            separators.push(candidate);
        }
    }

    for &encoding in &encodings {
        let Some(text) = decode(bytes, encoding) else {
            continue;
        };
        for separator in &separators {
            let Some(rows) = parse_with_separator(&text, *separator) else {
                continue;
            };
            let decimal = hints.decimal.or_else(|| detect_decimal(&rows));
            let mut table = RawTable::new(origin, source_name);
            table.format = TableFormat {
                encoding: Some(encoding),
                separator: *separator,
                decimal,
            };
            table.rows = rows;
            return Ok(table);
        }
    }

    Err(ReconError::FormatDetection(format!(
        "{source_name}: no encoding/separator candidate produced a parseable table"
    )))
}

fn decode(bytes: &[u8], encoding: &str) -> Option<String> {
    let text = match encoding {
        "utf-8" => {
            let text = std::str::from_utf8(bytes).ok()?;
            text.trim_start_matches('\u{feff}').to_string()
        }
        "windows-1252" => {
            let (text, _, had_errors) = WINDOWS_1252.decode(bytes);
            if had_errors {
                return None;
            }
            text.into_owned()
        }
        "utf-16" => {
            let codec = if bytes.starts_with(&[0xFE, 0xFF]) {
                UTF_16BE
            } else {
                UTF_16LE
            };
            let (text, had_errors) = codec.decode_with_bom_removal(bytes);
            if had_errors {
                return None;
            }
            text.into_owned()
        }
        _ => return None,
    };
    // Embedded NULs mean we decoded a multibyte file with the wrong codec.
    if text.contains('\0') {
        return None;
    }
    Some(text)
}

fn parse_with_separator(text: &str, separator: Option<char>) -> Option<Vec<Vec<Cell>>> {
    match separator {
        Some(sep) => {
            if !sep.is_ascii() {
                return None;
            }
            let mut reader = csv::ReaderBuilder::new()
                .delimiter(sep as u8)
                .has_headers(false)
                .flexible(true)
                .from_reader(text.as_bytes());

            let mut rows: Vec<Vec<Cell>> = Vec::new();
            for record in reader.records() {
                let record = record.ok()?;
                rows.push(record.iter().map(|f| Cell::Text(f.to_string())).collect());
            }

            let splits = rows.iter().take(SCAN_LIMIT).any(|r| r.len() >= 2);
            let has_data = rows.iter().any(|r| r.iter().any(|c| !c.is_empty()));
            if !splits || !has_data {
                return None;
            }
            Some(rows)
        }
        // Last-resort candidate: the whole line is one column.
        None => {
            let rows: Vec<Vec<Cell>> = text
                .lines()
                .map(|line| vec![Cell::Text(line.to_string())])
                .collect();
            if rows.iter().any(|r| !r[0].is_empty()) {
                Some(rows)
            } else {
                None
            }
        }
    }
}

/// Sample data cells for the decimal convention. Comma wins ties: Brazilian
/// sources are the norm here.
fn detect_decimal(rows: &[Vec<Cell>]) -> Option<char> {
    let mut comma = 0usize;
    let mut dot = 0usize;
    for row in rows.iter().take(SCAN_LIMIT) {
        for cell in row {
            if let Some(text) = cell.as_text() {
                if money_shape(text, ',') {
                    comma += 1;
                } else if money_shape(text, '.') {
                    dot += 1;
                }
            }
        }
    }
    if comma == 0 && dot == 0 {
        None
    } else if dot > comma {
        Some('.')
    } else {
        Some(',')
    }
}

/// True when `text` looks like a money amount with `decimal` as its decimal
/// mark: one or two fractional digits, digits (optionally grouped by the
/// opposite mark) before it.
fn money_shape(text: &str, decimal: char) -> bool {
    let text = text.trim().trim_start_matches('-');
    let Some((head, tail)) = text.rsplit_once(decimal) else {
        return false;
    };
    if tail.is_empty() || tail.len() > 2 || !tail.bytes().all(|b| b.is_ascii_digit()) {
        return false;
    }
    let grouping = if decimal == ',' { '.' } else { ',' };
    !head.is_empty() && head.chars().all(|c| c.is_ascii_digit() || c == grouping)
}

/// Scan the first rows for the real header: the first row where at least two
/// of the expected column keywords appear. Advisory; `None` means the caller
/// keeps the table as-is.
pub fn find_header_row(rows: &[Vec<Cell>], keywords: &[&str], max_scan: usize) -> Option<usize> {
    for (idx, row) in rows.iter().take(max_scan).enumerate() {
        let rendered: Vec<String> = row.iter().map(|c| c.render().to_lowercase()).collect();
        let hits = keywords
            .iter()
            .filter(|kw| rendered.iter().any(|cell| cell.contains(*kw)))
            .count();
        if hits >= 2 {
            return Some(idx);
        }
    }
    None
}
