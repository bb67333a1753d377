//! Per-origin normalization: `RawTable` → canonical records.
//!
//! One normalizer variant per data origin, selected by origin tag. Each is a
//! pure function over the raw grid; all file handling stays in the io crate.

use std::collections::HashMap;
use std::sync::OnceLock;

use chrono::{Duration, NaiveDate};
use regex::Regex;

use crate::error::ReconError;
use crate::key::normalize_doc;
use crate::mapper::{self, FieldSpec};
use crate::model::{CanonicalRecord, Cell, Origin, RawTable};

// Canonical field names shared by the per-origin specs.
const DATE: &str = "date";
const DOC: &str = "doc";
const COUNTERPARTY_ID: &str = "counterparty_id";
const COUNTERPARTY_NAME: &str = "counterparty_name";
const TAX: &str = "tax";
const GROSS: &str = "gross";
const WITHHELD: &str = "withheld";
const STATUS: &str = "status";
const ACCEPTANCE: &str = "acceptance";
const CREDIT: &str = "credit";
const DESCRIPTION: &str = "description";

/// Normalize one origin's raw table(s) into canonical records.
pub fn normalize(origin: Origin, tables: &[RawTable]) -> Result<Vec<CanonicalRecord>, ReconError> {
    match origin {
        Origin::Fortaleza => fortaleza(tables),
        Origin::VoltaRedonda => volta_redonda(first_table(origin, tables)?),
        Origin::Razao => razao(first_table(origin, tables)?),
    }
}

fn first_table(origin: Origin, tables: &[RawTable]) -> Result<&RawTable, ReconError> {
    tables.first().ok_or_else(|| ReconError::Normalization {
        origin,
        message: "no table to normalize".into(),
    })
}

// ---------------------------------------------------------------------------
// Fortaleza
// ---------------------------------------------------------------------------

const FORTALEZA_TAKEN_SHEET: &str = "Serviços Tomados";
const FORTALEZA_PENDING_SHEET: &str = "Serviços Pendentes";
/// The pending sheet carries a report banner above its header row.
const FORTALEZA_PENDING_OFFSET: usize = 8;

// Declared order is the synonym-match priority: acceptance before status
// ("Status Aceite" carries both words), withheld before tax ("ISS Retido"
// contains "iss").
const FORTALEZA_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: DATE, synonyms: &["data", "emissão", "emissao"] },
    FieldSpec { field: DOC, synonyms: &["número", "numero", "nf", "nota"] },
    FieldSpec { field: COUNTERPARTY_ID, synonyms: &["cpfcnpj", "cnpjcpf", "cnpj", "cpf"] },
    FieldSpec { field: COUNTERPARTY_NAME, synonyms: &["razão", "razao", "prestador", "nome"] },
    FieldSpec { field: ACCEPTANCE, synonyms: &["aceite", "aceitação", "aceitacao"] },
    FieldSpec { field: WITHHELD, synonyms: &["issretido", "retido"] },
    FieldSpec { field: TAX, synonyms: &["valordoiss", "iss", "imposto"] },
    FieldSpec {
        field: GROSS,
        synonyms: &["valordosserviços", "valordosservicos", "valordoserviço", "valordoservico", "serviço", "servico"],
    },
    FieldSpec { field: STATUS, synonyms: &["statusdoc", "status", "situação", "situacao"] },
];

const FORTALEZA_MANDATORY: &[&str] = &[DATE, DOC, COUNTERPARTY_ID, TAX];

fn fortaleza(tables: &[RawTable]) -> Result<Vec<CanonicalRecord>, ReconError> {
    let taken = tables
        .iter()
        .find(|t| sheet_named(t, FORTALEZA_TAKEN_SHEET))
        .or_else(|| tables.first())
        .ok_or_else(|| ReconError::Normalization {
            origin: Origin::Fortaleza,
            message: "workbook has no sheets".into(),
        })?;

    let (headers, rows) = taken.header_at(0).ok_or_else(|| ReconError::Normalization {
        origin: Origin::Fortaleza,
        message: format!("sheet '{FORTALEZA_TAKEN_SHEET}' is empty"),
    })?;

    let mapping = mapper::map_columns(&headers, FORTALEZA_FIELDS);
    mapper::require(&mapping, FORTALEZA_MANDATORY, Origin::Fortaleza)?;

    let mut records = Vec::new();

    for row in rows {
        let doc_status = text_of(row, &mapping, STATUS);
        if is_cancelled(doc_status.as_deref()) {
            continue;
        }
        let withheld = text_of(row, &mapping, WITHHELD);
        if is_not_withheld(withheld.as_deref()) {
            continue;
        }

        let mut record = municipal_record(Origin::Fortaleza, row, &mapping);
        record.doc_status = doc_status;
        record.withheld = withheld;
        if record.doc_number.is_empty() || record.tax_cents.is_none() {
            continue;
        }
        records.push(record);
    }

    // Pending sheet is optional: any shape problem just means no pending
    // rows, exactly like the taken/pending split in the source system.
    if let Some(pending) = tables.iter().find(|t| sheet_named(t, FORTALEZA_PENDING_SHEET)) {
        records.extend(fortaleza_pending(pending).unwrap_or_default());
    }

    Ok(records)
}

fn fortaleza_pending(table: &RawTable) -> Option<Vec<CanonicalRecord>> {
    let (headers, rows) = table.header_at(FORTALEZA_PENDING_OFFSET)?;
    let mapping = mapper::map_columns(&headers, FORTALEZA_FIELDS);
    mapper::require(&mapping, &[DOC, TAX], Origin::Fortaleza).ok()?;

    let mut records = Vec::new();
    for row in rows {
        let mut record = municipal_record(Origin::Fortaleza, row, &mapping);
        record.acceptance = Some("Pendente".into());
        if record.doc_number.is_empty() || record.tax_cents.is_none() {
            continue;
        }
        records.push(record);
    }
    Some(records)
}

fn sheet_named(table: &RawTable, name: &str) -> bool {
    table
        .sheet
        .as_deref()
        .map(|s| s.trim() == name)
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Volta Redonda
// ---------------------------------------------------------------------------

/// The VR export carries a 16-row report banner above the header.
const VR_HEADER_OFFSET: usize = 16;

const VR_RENAMES: &[(&str, &str)] = &[
    ("CNPJ Prestador", COUNTERPARTY_ID),
    ("Razão Social", COUNTERPARTY_NAME),
    ("Nº", DOC),
    ("Dt Emiss", DATE),
    ("Nota Fiscal", GROSS),
    ("Imposto", TAX),
    ("Retido", WITHHELD),
    ("Status", STATUS),
];

const VR_MANDATORY: &[&str] = &[DATE, DOC, TAX];

fn volta_redonda(table: &RawTable) -> Result<Vec<CanonicalRecord>, ReconError> {
    // Some VR exports ship without the banner; fall back to a top header
    // when the fixed offset yields no mandatory columns.
    let (mapping, rows) = match vr_header(table, VR_HEADER_OFFSET) {
        Ok(parsed) => parsed,
        Err(_) => vr_header(table, 0)?,
    };

    let mut records = Vec::new();
    for row in rows {
        // Trailer/total rows have no counterparty name.
        let name = text_of(row, &mapping, COUNTERPARTY_NAME);
        if mapping.contains_key(COUNTERPARTY_NAME) && name.is_none() {
            continue;
        }
        let doc_status = text_of(row, &mapping, STATUS);
        if is_cancelled(doc_status.as_deref()) {
            continue;
        }

        let mut record = municipal_record(Origin::VoltaRedonda, row, &mapping);
        record.doc_status = doc_status;
        if record.doc_number.is_empty() || record.tax_cents.is_none() {
            continue;
        }
        records.push(record);
    }

    Ok(records)
}

type ParsedHeader<'a> = (HashMap<&'static str, usize>, &'a [Vec<Cell>]);

fn vr_header(table: &RawTable, offset: usize) -> Result<ParsedHeader<'_>, ReconError> {
    let (headers, rows) = table.header_at(offset).ok_or_else(|| ReconError::Normalization {
        origin: Origin::VoltaRedonda,
        message: format!("no header row at offset {offset}"),
    })?;
    let mapping = mapper::map_renames(&headers, VR_RENAMES);
    mapper::require(&mapping, VR_MANDATORY, Origin::VoltaRedonda)?;
    Ok((mapping, rows))
}

// ---------------------------------------------------------------------------
// Razão (ledger)
// ---------------------------------------------------------------------------

const RAZAO_FIELDS: &[FieldSpec] = &[
    FieldSpec { field: DATE, synonyms: &["data"] },
    FieldSpec { field: DOC, synonyms: &["número", "numero", "documento", "nf"] },
    FieldSpec { field: CREDIT, synonyms: &["crédito", "credito"] },
    FieldSpec {
        field: DESCRIPTION,
        synonyms: &["histórico", "historico", "descrição", "descricao", "complemento"],
    },
];

const RAZAO_MANDATORY: &[&str] = &[CREDIT];

/// Opening-balance and payment-confirmation artifact rows, matched by
/// uppercase prefix on the description.
const RAZAO_EXCLUDE_PREFIXES: &[&str] = &[
    "SALDO ANTERIOR",
    "SALDO INICIAL",
    "CONFIRMACAO DE PAGAMENTO",
    "CONFIRMAÇÃO DE PAGAMENTO",
];

fn doc_in_description(description: &str) -> Option<String> {
    static DOC_RE: OnceLock<Regex> = OnceLock::new();
    let re = DOC_RE.get_or_init(|| {
        Regex::new(r"(?i)(?:doc|nf|nota|n[ºo°])\D{0,8}?(\d+)").unwrap()
    });
    re.captures(description)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn razao(table: &RawTable) -> Result<Vec<CanonicalRecord>, ReconError> {
    let (headers, rows) = table.header_at(0).ok_or_else(|| ReconError::Normalization {
        origin: Origin::Razao,
        message: "ledger table is empty".into(),
    })?;

    let mapping = mapper::map_columns(&headers, RAZAO_FIELDS);
    mapper::require(&mapping, RAZAO_MANDATORY, Origin::Razao)?;
    // Credit text follows whatever decimal convention detection recorded;
    // absent a detected convention the Brazilian one applies.
    let credit_of: fn(&Cell) -> Option<i64> =
        if table.format.decimal == Some('.') { money_plain } else { money_brl };
    // The document number must be locatable somewhere: its own column or
    // the free-text description.
    if !mapping.contains_key(DOC) && !mapping.contains_key(DESCRIPTION) {
        return Err(ReconError::SchemaMapping {
            origin: Origin::Razao,
            missing: vec![DOC.to_string()],
        });
    }

    let mut records = Vec::new();
    for row in rows {
        let description = text_of(row, &mapping, DESCRIPTION);
        if let Some(ref desc) = description {
            let upper = desc.trim().to_uppercase();
            if RAZAO_EXCLUDE_PREFIXES.iter().any(|p| upper.starts_with(p)) {
                continue;
            }
        }

        let doc_number = text_of(row, &mapping, DOC)
            .map(|s| normalize_doc(&s))
            .or_else(|| description.as_deref().and_then(doc_in_description))
            .unwrap_or_default();

        let credit_cents = field_cell(row, &mapping, CREDIT).and_then(credit_of);
        if doc_number.is_empty() || credit_cents.is_none() {
            continue;
        }

        let mut record = CanonicalRecord::new(Origin::Razao);
        record.date = field_cell(row, &mapping, DATE).and_then(date_of);
        record.doc_number = doc_number;
        record.credit_cents = credit_cents;
        record.description = description;
        records.push(record);
    }

    Ok(records)
}

// ---------------------------------------------------------------------------
// Shared row coercion
// ---------------------------------------------------------------------------

fn municipal_record(
    origin: Origin,
    row: &[Cell],
    mapping: &HashMap<&'static str, usize>,
) -> CanonicalRecord {
    let mut record = CanonicalRecord::new(origin);
    record.date = field_cell(row, mapping, DATE).and_then(date_of);
    record.doc_number = text_of(row, mapping, DOC)
        .map(|s| normalize_doc(&s))
        .unwrap_or_default();
    record.counterparty_id = text_of(row, mapping, COUNTERPARTY_ID);
    record.counterparty_name = text_of(row, mapping, COUNTERPARTY_NAME);
    record.tax_cents = field_cell(row, mapping, TAX).and_then(money_plain);
    record.gross_cents = field_cell(row, mapping, GROSS).and_then(money_plain);
    record.withheld = text_of(row, mapping, WITHHELD);
    record.acceptance = text_of(row, mapping, ACCEPTANCE);
    record
}

fn field_cell<'a>(
    row: &'a [Cell],
    mapping: &HashMap<&'static str, usize>,
    field: &'static str,
) -> Option<&'a Cell> {
    mapping.get(field).and_then(|idx| row.get(*idx))
}

fn text_of(
    row: &[Cell],
    mapping: &HashMap<&'static str, usize>,
    field: &'static str,
) -> Option<String> {
    let cell = field_cell(row, mapping, field)?;
    if cell.is_empty() {
        return None;
    }
    Some(cell.render().trim().to_string())
}

fn is_cancelled(status: Option<&str>) -> bool {
    status
        .map(|s| s.trim().to_uppercase() == "CANCELADA")
        .unwrap_or(false)
}

fn is_not_withheld(flag: Option<&str>) -> bool {
    matches!(
        flag.map(|s| s.trim().to_uppercase()),
        Some(ref s) if s == "NÃO" || s == "NAO"
    )
}

/// Round a parsed amount to integer cents, half away from zero.
pub fn to_cents(value: f64) -> i64 {
    (value * 100.0).round() as i64
}

/// Parse currency text in Brazilian convention: keep only digits, comma,
/// dot and minus; strip thousands dots; decimal comma becomes a dot.
/// Unparsable values are missing, never an error.
pub fn parse_brl_text(text: &str) -> Option<i64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, ',' | '.' | '-'))
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    let decimal = cleaned.replace('.', "").replace(',', ".");
    decimal.parse::<f64>().ok().map(to_cents)
}

/// Numeric cells pass through; text is parsed as plain decimal notation
/// (municipal exports type their amount columns numerically).
fn money_plain(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(n) => Some(to_cents(*n)),
        Cell::Text(s) => s.trim().parse::<f64>().ok().map(to_cents),
        _ => None,
    }
}

/// Numeric cells pass through; text goes through the Brazilian parser.
fn money_brl(cell: &Cell) -> Option<i64> {
    match cell {
        Cell::Number(n) => Some(to_cents(*n)),
        Cell::Text(s) => parse_brl_text(s),
        _ => None,
    }
}

/// Day-first date parsing; unparsable dates are missing, never an error.
pub fn parse_date_text(text: &str) -> Option<NaiveDate> {
    let head = text.trim();
    let head = head.split(['T', ' ']).next().unwrap_or(head);
    for format in ["%d/%m/%Y", "%d/%m/%y", "%d-%m-%Y", "%Y-%m-%d"] {
        if let Ok(date) = NaiveDate::parse_from_str(head, format) {
            return Some(date);
        }
    }
    None
}

fn date_of(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::Date(d) => Some(*d),
        // Excel serial date, 1900 system.
        Cell::Number(serial) if *serial > 0.0 => {
            NaiveDate::from_ymd_opt(1899, 12, 30)?
                .checked_add_signed(Duration::days(serial.trunc() as i64))
        }
        Cell::Text(s) => parse_date_text(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<Cell> {
        cells.iter().map(|s| Cell::Text(s.to_string())).collect()
    }

    fn fortaleza_taken() -> RawTable {
        let mut table = RawTable::new(Origin::Fortaleza, "fortaleza.xlsx");
        table.sheet = Some(FORTALEZA_TAKEN_SHEET.into());
        table.rows = vec![
            text_row(&[
                "Data",
                "CPF/CNPJ Prestador",
                "Razão Social/Nome do Prestador",
                "Número",
                "Valor do ISS",
                "Valor dos Serviços",
                "ISS Retido",
                "Status Doc.",
            ]),
            vec![
                Cell::Text("05/01/2024".into()),
                Cell::Text("12345678000190".into()),
                Cell::Text("ACME LTDA".into()),
                Cell::Number(500.0),
                Cell::Number(10.0),
                Cell::Number(200.0),
                Cell::Text("Sim".into()),
                Cell::Text("NORMAL".into()),
            ],
            vec![
                Cell::Text("06/01/2024".into()),
                Cell::Text("12345678000190".into()),
                Cell::Text("ACME LTDA".into()),
                Cell::Number(501.0),
                Cell::Number(12.0),
                Cell::Number(240.0),
                Cell::Text("Sim".into()),
                Cell::Text("CANCELADA".into()),
            ],
            vec![
                Cell::Text("07/01/2024".into()),
                Cell::Text("12345678000190".into()),
                Cell::Text("ACME LTDA".into()),
                Cell::Number(502.0),
                Cell::Number(15.0),
                Cell::Number(300.0),
                Cell::Text("Não".into()),
                Cell::Text("NORMAL".into()),
            ],
        ];
        table
    }

    #[test]
    fn fortaleza_filters_cancelled_and_unwithheld() {
        let records = normalize(Origin::Fortaleza, &[fortaleza_taken()]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].doc_number, "500");
        assert_eq!(records[0].tax_cents, Some(1000));
        assert_eq!(records[0].gross_cents, Some(20000));
        assert_eq!(
            records[0].date,
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn fortaleza_unions_pending_sheet() {
        let mut pending = RawTable::new(Origin::Fortaleza, "fortaleza.xlsx");
        pending.sheet = Some(FORTALEZA_PENDING_SHEET.into());
        // Report banner rows above the real header.
        pending.rows = vec![vec![Cell::Empty]; FORTALEZA_PENDING_OFFSET];
        pending.rows.push(text_row(&[
            "Data",
            "CNPJ/CPF Prestador",
            "Razão Social/Nome do Prestador",
            "Número",
            "Valor do ISS",
            "Valor do Serviço",
        ]));
        pending.rows.push(vec![
            Cell::Text("10/01/2024".into()),
            Cell::Text("98765432000100".into()),
            Cell::Text("BETA SA".into()),
            Cell::Number(900.0),
            Cell::Number(5.0),
            Cell::Number(100.0),
        ]);

        let records = normalize(Origin::Fortaleza, &[fortaleza_taken(), pending]).unwrap();
        assert_eq!(records.len(), 2);
        let pending_rec = &records[1];
        assert_eq!(pending_rec.doc_number, "900");
        assert_eq!(pending_rec.acceptance.as_deref(), Some("Pendente"));
        assert_eq!(pending_rec.gross_cents, Some(10000));
    }

    #[test]
    fn fortaleza_missing_mandatory_column_fails() {
        let mut table = fortaleza_taken();
        // Drop the "Número" column from every row.
        for row in &mut table.rows {
            row.remove(3);
        }
        let err = normalize(Origin::Fortaleza, &[table]).unwrap_err();
        assert!(matches!(err, ReconError::SchemaMapping { missing, .. } if missing == vec![DOC.to_string()]));
    }

    fn vr_table(offset: usize) -> RawTable {
        let mut table = RawTable::new(Origin::VoltaRedonda, "vr.xls");
        table.rows = vec![vec![Cell::Text("Relatório".into())]; offset];
        table.rows.push(text_row(&[
            "CNPJ Prestador",
            "Razão Social",
            "Nº",
            "Dt Emiss",
            "Nota Fiscal",
            "Imposto",
            "Retido",
            "Status",
        ]));
        table.rows.push(vec![
            Cell::Text("11222333000144".into()),
            Cell::Text("GAMA ME".into()),
            Cell::Text("777.0".into()),
            Cell::Text("02/03/2024".into()),
            Cell::Number(150.0),
            Cell::Number(7.5),
            Cell::Text("Sim".into()),
            Cell::Text("NORMAL".into()),
        ]);
        // Trailer row: totals, no counterparty name.
        table.rows.push(vec![
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Empty,
            Cell::Number(150.0),
            Cell::Number(7.5),
        ]);
        table
    }

    #[test]
    fn volta_redonda_reads_fixed_offset() {
        let records = normalize(Origin::VoltaRedonda, &[vr_table(VR_HEADER_OFFSET)]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].doc_number, "777");
        assert_eq!(records[0].tax_cents, Some(750));
        assert_eq!(records[0].counterparty_name.as_deref(), Some("GAMA ME"));
    }

    #[test]
    fn volta_redonda_falls_back_to_top_header() {
        let records = normalize(Origin::VoltaRedonda, &[vr_table(0)]).unwrap();
        assert_eq!(records.len(), 1);
    }

    #[test]
    fn volta_redonda_missing_tax_column_fails() {
        let mut table = vr_table(0);
        for row in &mut table.rows {
            if row.len() > 5 {
                row.remove(5);
            }
        }
        // Header loses "Imposto" entirely.
        table.rows[0] = text_row(&[
            "CNPJ Prestador",
            "Razão Social",
            "Nº",
            "Dt Emiss",
            "Nota Fiscal",
            "Retido",
            "Status",
        ]);
        let err = normalize(Origin::VoltaRedonda, &[table]).unwrap_err();
        assert!(matches!(err, ReconError::SchemaMapping { origin: Origin::VoltaRedonda, .. }));
    }

    fn razao_table(rows: Vec<Vec<Cell>>) -> RawTable {
        let mut table = RawTable::new(Origin::Razao, "razao.csv");
        table.rows = rows;
        table
    }

    #[test]
    fn razao_parses_brl_text_and_extracts_doc_from_description() {
        let table = razao_table(vec![
            text_row(&["Data", "Histórico", "Crédito"]),
            text_row(&["05/01/2024", "Vr. ref. a ACME - Doc. N° 500", "1.234,56"]),
            text_row(&["05/01/2024", "SALDO ANTERIOR", "9.999,99"]),
        ]);
        let records = normalize(Origin::Razao, &[table]).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].doc_number, "500");
        assert_eq!(records[0].credit_cents, Some(123456));
    }

    #[test]
    fn razao_prefers_document_column() {
        let table = razao_table(vec![
            text_row(&["Data", "Número", "Histórico", "Crédito"]),
            text_row(&["05/01/2024", "500.0", "Doc. N° 999", "10,00"]),
        ]);
        let records = normalize(Origin::Razao, &[table]).unwrap();
        assert_eq!(records[0].doc_number, "500");
        assert_eq!(records[0].credit_cents, Some(1000));
    }

    #[test]
    fn razao_honors_detected_dot_decimal() {
        let mut table = razao_table(vec![
            text_row(&["Data", "Número", "Crédito"]),
            text_row(&["05/01/2024", "500", "1234.56"]),
        ]);
        table.format.decimal = Some('.');
        let records = normalize(Origin::Razao, &[table]).unwrap();
        assert_eq!(records[0].credit_cents, Some(123456));
    }

    #[test]
    fn razao_without_credit_column_fails() {
        let table = razao_table(vec![
            text_row(&["Data", "Número", "Histórico"]),
            text_row(&["05/01/2024", "500", "x"]),
        ]);
        let err = normalize(Origin::Razao, &[table]).unwrap_err();
        assert!(matches!(err, ReconError::SchemaMapping { origin: Origin::Razao, .. }));
    }

    #[test]
    fn brl_text_parsing() {
        assert_eq!(parse_brl_text("1.234,56"), Some(123456));
        assert_eq!(parse_brl_text("R$ 10,00"), Some(1000));
        assert_eq!(parse_brl_text("-3,05"), Some(-305));
        assert_eq!(parse_brl_text(""), None);
        assert_eq!(parse_brl_text("n/a"), None);
    }

    #[test]
    fn date_coercion_is_day_first() {
        assert_eq!(
            parse_date_text("05/01/2024"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(
            parse_date_text("2024-01-05"),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
        assert_eq!(parse_date_text("não informado"), None);
        // Excel serial for 2024-01-05.
        assert_eq!(
            date_of(&Cell::Number(45296.0)),
            NaiveDate::from_ymd_opt(2024, 1, 5)
        );
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        // 0.125 is exactly representable, so the .5 case is real.
        assert_eq!(to_cents(0.125), 13);
        assert_eq!(to_cents(-0.125), -13);
        assert_eq!(to_cents(10.0), 1000);
    }
}
