//! The fixed reconciliation pipeline: read, normalize, key, validate, export.
//!
//! Stage order never varies. A source that fails to load degrades to an
//! empty population and a run-log line; only export failure aborts the run.

use conciliador_recon::model::{
    Origin, PopulationSummary, RawTable, ValidationResult,
};
use conciliador_recon::{key, normalize, validate, CanonicalRecord, ReconError};

use crate::detect::{self, CsvHints};
use crate::{export, xlsx};

/// One uploaded source file. The name is only used for run-log lines and
/// ledger format dispatch.
#[derive(Debug, Clone)]
pub struct SourceUpload {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceUpload {
    pub fn new(name: &str, bytes: Vec<u8>) -> Self {
        SourceUpload { name: name.to_string(), bytes }
    }
}

/// Advisory progress callback: percent milestone plus a display message.
pub type ProgressFn<'a> = &'a mut dyn FnMut(u8, &str);

/// Everything a run produces. `workbook` is the serialized two-sheet xlsx.
#[derive(Debug)]
pub struct ReconciliationReport {
    pub municipal: Vec<ValidationResult>,
    pub ledger: Vec<ValidationResult>,
    pub municipal_summary: PopulationSummary,
    pub ledger_summary: PopulationSummary,
    pub workbook: Vec<u8>,
    pub logs: Vec<String>,
}

/// Keywords marking the real ledger header row, below any statement banner.
const LEDGER_HEADER_KEYWORDS: &[&str] = &[
    "data",
    "crédito",
    "credito",
    "débito",
    "debito",
    "histórico",
    "historico",
    "documento",
    "saldo",
];

const LEDGER_HEADER_SCAN: usize = 30;

/// Run the full reconciliation over up to three uploaded sources.
///
/// Each milestone is reported through `progress` before its stage runs;
/// the callback is advisory and may be `None`.
pub fn reconcile(
    fortaleza: Option<&SourceUpload>,
    volta_redonda: Option<&SourceUpload>,
    razao: Option<&SourceUpload>,
    mut progress: Option<ProgressFn<'_>>,
) -> Result<ReconciliationReport, ReconError> {
    let mut logs: Vec<String> = Vec::new();

    emit(&mut progress, 5, "Iniciando leitura de arquivos.");
    let fortaleza_records = load_municipal(Origin::Fortaleza, fortaleza, &mut logs);
    let vr_records = load_municipal(Origin::VoltaRedonda, volta_redonda, &mut logs);

    emit(&mut progress, 40, "Unificando registros das Prefeituras.");
    let mut municipal = fortaleza_records;
    municipal.extend(vr_records);

    emit(&mut progress, 55, "Lendo arquivo Razão.");
    let ledger_table = load_ledger_table(razao, &mut logs);

    emit(&mut progress, 70, "Limpando dados.");
    let ledger = match ledger_table {
        Some(table) => match normalize::normalize(Origin::Razao, &[table]) {
            Ok(records) => records,
            Err(e) => {
                logs.push(format!("Erro ao carregar Razão: {e}"));
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    emit(&mut progress, 82, "Gerando IDs.");
    let municipal_keyed = key::key_records(municipal);
    let ledger_keyed = key::key_records(ledger);

    emit(&mut progress, 92, "Aplicando validação.");
    let (municipal_results, ledger_results) = validate::validate(municipal_keyed, ledger_keyed);
    let municipal_summary = validate::summarize(&municipal_results);
    let ledger_summary = validate::summarize(&ledger_results);

    emit(&mut progress, 97, "Gerando Excel.");
    let workbook = export::export_workbook(&municipal_results, &ledger_results)?;

    emit(&mut progress, 100, "Concluído.");
    Ok(ReconciliationReport {
        municipal: municipal_results,
        ledger: ledger_results,
        municipal_summary,
        ledger_summary,
        workbook,
        logs,
    })
}

fn emit(progress: &mut Option<ProgressFn<'_>>, percent: u8, message: &str) {
    if let Some(callback) = progress {
        callback(percent, message);
    }
}

fn load_municipal(
    origin: Origin,
    upload: Option<&SourceUpload>,
    logs: &mut Vec<String>,
) -> Vec<CanonicalRecord> {
    let Some(upload) = upload else {
        logs.push(format!("{origin} não fornecido."));
        return Vec::new();
    };
    let loaded = xlsx::read_workbook(&upload.bytes, origin, &upload.name)
        .and_then(|tables| normalize::normalize(origin, &tables));
    match loaded {
        Ok(records) => records,
        Err(e) => {
            logs.push(format!("Erro ao processar {origin}: {e}"));
            Vec::new()
        }
    }
}

/// Ledger dispatch is by file extension: CSV goes through format detection,
/// spreadsheets through calamine. Unknown extensions degrade to an empty
/// population.
fn load_ledger_table(upload: Option<&SourceUpload>, logs: &mut Vec<String>) -> Option<RawTable> {
    let upload = match upload {
        Some(u) => u,
        None => {
            logs.push("Razão não fornecido.".into());
            return None;
        }
    };

    let name = upload.name.to_lowercase();
    let loaded = if name.ends_with(".csv") || name.ends_with(".txt") {
        let hints = CsvHints { separator: Some(';'), ..Default::default() };
        detect::detect_csv(&upload.bytes, Origin::Razao, &upload.name, &hints)
    } else if [".xlsx", ".xls", ".xlsb", ".ods"].iter().any(|ext| name.ends_with(ext)) {
        xlsx::read_workbook(&upload.bytes, Origin::Razao, &upload.name).and_then(|mut tables| {
            if tables.is_empty() {
                Err(ReconError::FormatDetection(format!(
                    "{}: workbook contains no sheets",
                    upload.name
                )))
            } else {
                Ok(tables.swap_remove(0))
            }
        })
    } else {
        logs.push("Arquivo Razão em formato não suportado.".into());
        return None;
    };

    match loaded {
        Ok(mut table) => {
            // Statement exports often carry a banner above the header.
            if let Some(idx) =
                detect::find_header_row(&table.rows, LEDGER_HEADER_KEYWORDS, LEDGER_HEADER_SCAN)
            {
                table.rows.drain(..idx);
            }
            Some(table)
        }
        Err(e) => {
            logs.push(format!("Erro ao carregar Razão: {e}"));
            None
        }
    }
}
