//! Spreadsheet ingestion (xlsx, xls, xlsb, ods) via calamine.
//!
//! One-way conversion into raw grids; cell types are preserved so the
//! normalizers can tell numeric amounts from currency text.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::{Duration, NaiveDate};
use conciliador_recon::model::{Cell, Origin, RawTable};
use conciliador_recon::ReconError;

/// Read every sheet of a workbook into a raw grid, one table per sheet.
///
/// Sheets whose used range does not start at A1 are padded with empty rows
/// and columns so fixed header offsets stay aligned with the visible layout.
pub fn read_workbook(
    bytes: &[u8],
    origin: Origin,
    source_name: &str,
) -> Result<Vec<RawTable>, ReconError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| ReconError::FormatDetection(format!("{source_name}: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err(ReconError::FormatDetection(format!(
            "{source_name}: workbook contains no sheets"
        )));
    }

    let mut tables = Vec::new();
    for sheet_name in &sheet_names {
        let range = workbook.worksheet_range(sheet_name).map_err(|e| {
            ReconError::FormatDetection(format!("{source_name}: sheet '{sheet_name}': {e}"))
        })?;

        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut table = RawTable::new(origin, source_name);
        table.sheet = Some(sheet_name.clone());
        table.rows = vec![Vec::new(); start_row];
        for row in range.rows() {
            let mut cells = vec![Cell::Empty; start_col];
            cells.extend(row.iter().map(convert));
            table.rows.push(cells);
        }
        tables.push(table);
    }

    Ok(tables)
}

fn convert(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(n) => Cell::Number(*n),
        Data::Int(n) => Cell::Number(*n as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::Error(e) => Cell::Text(format!("#{e:?}")),
        Data::DateTime(dt) => {
            // 1900 date system; time-of-day is irrelevant downstream.
            let serial = dt.as_f64();
            serial_to_date(serial)
                .map(Cell::Date)
                .unwrap_or(Cell::Number(serial))
        }
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
    }
}

fn serial_to_date(serial: f64) -> Option<NaiveDate> {
    if serial <= 0.0 {
        return None;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(serial.trunc() as i64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;

    fn fixture() -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Serviços Tomados").unwrap();
        sheet.write_string(0, 0, "Número").unwrap();
        sheet.write_string(0, 1, "Valor do ISS").unwrap();
        sheet.write_number(1, 0, 500.0).unwrap();
        sheet.write_number(1, 1, 10.5).unwrap();
        workbook.save_to_buffer().unwrap()
    }

    #[test]
    fn reads_sheets_with_typed_cells() {
        let tables = read_workbook(&fixture(), Origin::Fortaleza, "fortaleza.xlsx").unwrap();
        assert_eq!(tables.len(), 1);
        let table = &tables[0];
        assert_eq!(table.sheet.as_deref(), Some("Serviços Tomados"));
        assert_eq!(table.rows[0][0], Cell::Text("Número".into()));
        assert_eq!(table.rows[1][0], Cell::Number(500.0));
        assert_eq!(table.rows[1][1], Cell::Number(10.5));
    }

    #[test]
    fn garbage_bytes_are_a_detection_error() {
        let err = read_workbook(b"not a workbook", Origin::Razao, "razao.xlsx").unwrap_err();
        assert!(matches!(err, ReconError::FormatDetection(_)));
    }

    #[test]
    fn serial_dates_use_the_1900_system() {
        assert_eq!(serial_to_date(45296.0), NaiveDate::from_ymd_opt(2024, 1, 5));
        assert_eq!(serial_to_date(0.0), None);
    }
}
