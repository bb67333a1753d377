use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Raw input
// ---------------------------------------------------------------------------

/// A single typed cell from a CSV field or spreadsheet cell.
///
/// CSV ingestion only ever produces `Text`; spreadsheet ingestion preserves
/// the source cell type so normalizers can tell numeric amounts from
/// currency text.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Bool(bool),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Cell::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Render the cell as display text. Integer-valued floats render without
    /// a decimal tail so numeric-typed identifiers come out clean.
    pub fn render(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{n}")
                }
            }
            Cell::Date(d) => d.format("%d/%m/%Y").to_string(),
            Cell::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        }
    }
}

/// Detected formatting of a raw tabular file, carried as provenance.
#[derive(Debug, Clone, Default)]
pub struct TableFormat {
    pub encoding: Option<&'static str>,
    pub separator: Option<char>,
    pub decimal: Option<char>,
}

/// An in-memory table plus provenance. Transient: discarded after
/// normalization.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub origin: Origin,
    pub source_name: String,
    pub sheet: Option<String>,
    pub format: TableFormat,
    pub rows: Vec<Vec<Cell>>,
}

impl RawTable {
    pub fn new(origin: Origin, source_name: &str) -> Self {
        RawTable {
            origin,
            source_name: source_name.to_string(),
            sheet: None,
            format: TableFormat::default(),
            rows: Vec::new(),
        }
    }

    /// Split the grid at a header offset: the row at `offset` becomes the
    /// header list, everything below it is data.
    pub fn header_at(&self, offset: usize) -> Option<(Vec<String>, &[Vec<Cell>])> {
        let header = self.rows.get(offset)?;
        let headers: Vec<String> = header.iter().map(Cell::render).collect();
        Some((headers, &self.rows[offset + 1..]))
    }
}

// ---------------------------------------------------------------------------
// Origin
// ---------------------------------------------------------------------------

/// Data origin. Selects the normalizer variant and the designated key
/// amount field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Origin {
    Fortaleza,
    VoltaRedonda,
    Razao,
}

impl std::fmt::Display for Origin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fortaleza => write!(f, "Fortaleza"),
            Self::VoltaRedonda => write!(f, "Volta Redonda"),
            Self::Razao => write!(f, "Razão"),
        }
    }
}

// ---------------------------------------------------------------------------
// Canonical record
// ---------------------------------------------------------------------------

/// One row normalized to the shared schema regardless of source origin.
///
/// All money values are integer cents, rounded half-away-from-zero at two
/// places during coercion. After normalization the document number and the
/// origin's designated amount are always present; rows violating that are
/// excluded upstream.
#[derive(Debug, Clone)]
pub struct CanonicalRecord {
    pub origin: Origin,
    pub date: Option<NaiveDate>,
    pub doc_number: String,
    pub counterparty_id: Option<String>,
    pub counterparty_name: Option<String>,
    pub gross_cents: Option<i64>,
    pub tax_cents: Option<i64>,
    pub credit_cents: Option<i64>,
    pub withheld: Option<String>,
    pub acceptance: Option<String>,
    /// Raw document status flag. Internal-only: used for row filtering,
    /// never exported.
    pub doc_status: Option<String>,
    pub description: Option<String>,
}

impl CanonicalRecord {
    pub fn new(origin: Origin) -> Self {
        CanonicalRecord {
            origin,
            date: None,
            doc_number: String::new(),
            counterparty_id: None,
            counterparty_name: None,
            gross_cents: None,
            tax_cents: None,
            credit_cents: None,
            withheld: None,
            acceptance: None,
            doc_status: None,
            description: None,
        }
    }

    /// The amount field designated for key generation: ledger records key on
    /// the credit amount, municipal records on the withheld tax amount.
    pub fn key_amount(&self) -> Option<i64> {
        match self.origin {
            Origin::Razao => self.credit_cents,
            Origin::Fortaleza | Origin::VoltaRedonda => self.tax_cents,
        }
    }
}

/// A canonical record paired with its derived match key.
#[derive(Debug, Clone)]
pub struct KeyedRecord {
    pub record: CanonicalRecord,
    pub key: String,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    Matched,
    Unmatched,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Matched => write!(f, "Validado"),
            Self::Unmatched => write!(f, "Não Encontrado"),
        }
    }
}

/// A canonical record annotated with its validation outcome.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    pub record: CanonicalRecord,
    pub key: String,
    pub status: MatchStatus,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulationSummary {
    pub total: usize,
    pub matched: usize,
    pub unmatched: usize,
}
