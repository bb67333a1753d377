//! Annotated xlsx export.
//!
//! Presentation snapshot for the finance team, not a round-trip format:
//! two sheets, one per population, every row carrying its validation status.

use chrono::NaiveDate;
use conciliador_recon::format::format_cnpj;
use conciliador_recon::model::{MatchStatus, ValidationResult};
use conciliador_recon::ReconError;
use rust_xlsxwriter::{Color, Format, Workbook, Worksheet, XlsxError};

pub const MUNICIPAL_SHEET: &str = "Prefeitura";
pub const LEDGER_SHEET: &str = "Financeiro";

const MUNICIPAL_HEADERS: &[&str] = &[
    "Data",
    "CPF/CNPJ Prestador",
    "Razão Social/Nome do Prestador",
    "Número",
    "Valor do ISS",
    "Valor dos Serviços",
    "ISS Retido",
    "Status Aceite",
    "Origem",
    "Status_Validacao",
];

const LEDGER_HEADERS: &[&str] =
    &["Data", "Número", "Histórico", "Crédito", "Status_Validacao"];

/// Matched-status fill, the conventional light green.
const MATCHED_FILL: u32 = 0xC6EFCE;

struct SheetFormats {
    header: Format,
    money: Format,
    matched: Format,
}

impl SheetFormats {
    fn new() -> Self {
        SheetFormats {
            header: Format::new().set_bold(),
            money: Format::new().set_num_format("#,##0.00"),
            matched: Format::new().set_background_color(Color::RGB(MATCHED_FILL)),
        }
    }
}

fn export_err(e: XlsxError) -> ReconError {
    ReconError::Export(e.to_string())
}

/// Build the two-sheet annotated workbook and return the serialized bytes.
pub fn export_workbook(
    municipal: &[ValidationResult],
    ledger: &[ValidationResult],
) -> Result<Vec<u8>, ReconError> {
    let formats = SheetFormats::new();
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet();
    sheet.set_name(MUNICIPAL_SHEET).map_err(export_err)?;
    write_municipal_sheet(sheet, municipal, &formats)?;

    let sheet = workbook.add_worksheet();
    sheet.set_name(LEDGER_SHEET).map_err(export_err)?;
    write_ledger_sheet(sheet, ledger, &formats)?;

    workbook.save_to_buffer().map_err(export_err)
}

fn write_municipal_sheet(
    sheet: &mut Worksheet,
    results: &[ValidationResult],
    formats: &SheetFormats,
) -> Result<(), ReconError> {
    write_header_row(sheet, MUNICIPAL_HEADERS, formats)?;

    for (idx, result) in results.iter().enumerate() {
        let row = (idx + 1) as u32;
        let rec = &result.record;

        sheet
            .write_string(row, 0, date_text(rec.date))
            .map_err(export_err)?;
        let cnpj = rec
            .counterparty_id
            .as_deref()
            .map(format_cnpj)
            .unwrap_or_default();
        sheet.write_string(row, 1, cnpj).map_err(export_err)?;
        sheet
            .write_string(row, 2, rec.counterparty_name.as_deref().unwrap_or(""))
            .map_err(export_err)?;
        sheet
            .write_string(row, 3, &rec.doc_number)
            .map_err(export_err)?;
        write_money(sheet, row, 4, rec.tax_cents, formats)?;
        write_money(sheet, row, 5, rec.gross_cents, formats)?;
        sheet
            .write_string(row, 6, rec.withheld.as_deref().unwrap_or(""))
            .map_err(export_err)?;
        sheet
            .write_string(row, 7, rec.acceptance.as_deref().unwrap_or(""))
            .map_err(export_err)?;
        sheet
            .write_string(row, 8, rec.origin.to_string())
            .map_err(export_err)?;
        write_status(sheet, row, 9, result.status, formats)?;
    }

    sheet
        .autofilter(0, 0, results.len() as u32, (MUNICIPAL_HEADERS.len() - 1) as u16)
        .map_err(export_err)?;
    sheet.set_column_width(2, 40).map_err(export_err)?;
    Ok(())
}

fn write_ledger_sheet(
    sheet: &mut Worksheet,
    results: &[ValidationResult],
    formats: &SheetFormats,
) -> Result<(), ReconError> {
    write_header_row(sheet, LEDGER_HEADERS, formats)?;

    for (idx, result) in results.iter().enumerate() {
        let row = (idx + 1) as u32;
        let rec = &result.record;

        sheet
            .write_string(row, 0, date_text(rec.date))
            .map_err(export_err)?;
        sheet
            .write_string(row, 1, &rec.doc_number)
            .map_err(export_err)?;
        sheet
            .write_string(row, 2, rec.description.as_deref().unwrap_or(""))
            .map_err(export_err)?;
        write_money(sheet, row, 3, rec.credit_cents, formats)?;
        write_status(sheet, row, 4, result.status, formats)?;
    }

    sheet
        .autofilter(0, 0, results.len() as u32, (LEDGER_HEADERS.len() - 1) as u16)
        .map_err(export_err)?;
    sheet.set_column_width(2, 50).map_err(export_err)?;
    Ok(())
}

fn write_header_row(
    sheet: &mut Worksheet,
    headers: &[&str],
    formats: &SheetFormats,
) -> Result<(), ReconError> {
    for (col, title) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *title, &formats.header)
            .map_err(export_err)?;
    }
    Ok(())
}

fn write_money(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cents: Option<i64>,
    formats: &SheetFormats,
) -> Result<(), ReconError> {
    if let Some(cents) = cents {
        sheet
            .write_number_with_format(row, col, cents as f64 / 100.0, &formats.money)
            .map_err(export_err)?;
    }
    Ok(())
}

fn write_status(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    status: MatchStatus,
    formats: &SheetFormats,
) -> Result<(), ReconError> {
    let text = status.to_string();
    if status == MatchStatus::Matched {
        sheet
            .write_string_with_format(row, col, text, &formats.matched)
            .map_err(export_err)?;
    } else {
        sheet.write_string(row, col, text).map_err(export_err)?;
    }
    Ok(())
}

fn date_text(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%d/%m/%Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xlsx;
    use conciliador_recon::model::{CanonicalRecord, Origin};

    fn municipal_result(status: MatchStatus) -> ValidationResult {
        let mut rec = CanonicalRecord::new(Origin::Fortaleza);
        rec.date = NaiveDate::from_ymd_opt(2024, 1, 5);
        rec.doc_number = "500".into();
        rec.counterparty_id = Some("12345678000190".into());
        rec.counterparty_name = Some("ACME LTDA".into());
        rec.tax_cents = Some(1000);
        rec.gross_cents = Some(20000);
        ValidationResult { record: rec, key: "500-10.00".into(), status }
    }

    fn ledger_result(status: MatchStatus) -> ValidationResult {
        let mut rec = CanonicalRecord::new(Origin::Razao);
        rec.date = NaiveDate::from_ymd_opt(2024, 1, 8);
        rec.doc_number = "500".into();
        rec.description = Some("Doc 500".into());
        rec.credit_cents = Some(1000);
        ValidationResult { record: rec, key: "500-10.00".into(), status }
    }

    #[test]
    fn workbook_has_both_sheets_with_annotations() {
        let bytes = export_workbook(
            &[municipal_result(MatchStatus::Matched)],
            &[ledger_result(MatchStatus::Unmatched)],
        )
        .unwrap();

        let tables = xlsx::read_workbook(&bytes, Origin::Razao, "out.xlsx").unwrap();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].sheet.as_deref(), Some(MUNICIPAL_SHEET));
        assert_eq!(tables[1].sheet.as_deref(), Some(LEDGER_SHEET));

        let municipal = &tables[0];
        assert_eq!(municipal.rows[0][9].render(), "Status_Validacao");
        assert_eq!(municipal.rows[1][9].render(), "Validado");
        assert_eq!(municipal.rows[1][1].render(), "12.345.678/0001-90");
        assert_eq!(municipal.rows[1][4], conciliador_recon::model::Cell::Number(10.0));

        let ledger = &tables[1];
        assert_eq!(ledger.rows[1][4].render(), "Não Encontrado");
        assert_eq!(ledger.rows[1][3], conciliador_recon::model::Cell::Number(10.0));
    }

    #[test]
    fn empty_populations_still_export_headers() {
        let bytes = export_workbook(&[], &[]).unwrap();
        let tables = xlsx::read_workbook(&bytes, Origin::Razao, "out.xlsx").unwrap();
        assert_eq!(tables[0].rows.len(), 1);
        assert_eq!(tables[0].rows[0][0].render(), "Data");
    }
}
