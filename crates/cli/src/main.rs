// Conciliador CLI - headless reconciliation runs

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use conciliador_io::pipeline::{reconcile, SourceUpload};
use conciliador_recon::format::format_brl;

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;
pub const EXIT_IO_ERROR: u8 = 3;

#[derive(Parser)]
#[command(name = "conciliador")]
#[command(about = "Concilia notas das Prefeituras com o Razão contábil")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the reconciliation and write the annotated workbook
    #[command(after_help = "\
Examples:
  conciliador run --fortaleza fortaleza.xlsx --razao razao.csv
  conciliador run --volta-redonda vr.xls --razao razao.xlsx -o conciliado.xlsx
  conciliador run --razao razao.csv --json")]
    Run {
        /// Fortaleza municipal export (xlsx)
        #[arg(long)]
        fortaleza: Option<PathBuf>,

        /// Volta Redonda municipal export (xls/xlsx)
        #[arg(long)]
        volta_redonda: Option<PathBuf>,

        /// Accounting ledger export (csv or spreadsheet)
        #[arg(long)]
        razao: Option<PathBuf>,

        /// Output workbook (default: <razão stem>_conciliado.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print the run summary as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Suppress progress output
        #[arg(long, short = 'q')]
        quiet: bool,
    },
}

struct CliError {
    code: u8,
    message: String,
}

impl CliError {
    fn io(path: &Path, err: std::io::Error) -> Self {
        CliError {
            code: EXIT_IO_ERROR,
            message: format!("{}: {}", path.display(), err),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("erro: {}", e.message);
            ExitCode::from(e.code)
        }
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Commands::Run { fortaleza, volta_redonda, razao, output, json, quiet } => {
            run_reconcile(fortaleza, volta_redonda, razao, output, json, quiet)
        }
    }
}

fn run_reconcile(
    fortaleza: Option<PathBuf>,
    volta_redonda: Option<PathBuf>,
    razao: Option<PathBuf>,
    output: Option<PathBuf>,
    json: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if fortaleza.is_none() && volta_redonda.is_none() && razao.is_none() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "nada a fazer: informe ao menos um de --fortaleza, --volta-redonda, --razao"
                .to_string(),
        });
    }

    let fortaleza_upload = read_upload(fortaleza.as_deref())?;
    let vr_upload = read_upload(volta_redonda.as_deref())?;
    let razao_upload = read_upload(razao.as_deref())?;

    let mut print_progress = |percent: u8, message: &str| {
        eprintln!("[{percent:>3}%] {message}");
    };
    let progress: Option<&mut dyn FnMut(u8, &str)> = if quiet {
        None
    } else {
        Some(&mut print_progress)
    };

    let report = reconcile(
        fortaleza_upload.as_ref(),
        vr_upload.as_ref(),
        razao_upload.as_ref(),
        progress,
    )
    .map_err(|e| CliError { code: EXIT_ERROR, message: e.to_string() })?;

    for line in &report.logs {
        eprintln!("{line}");
    }

    let output_path = output.unwrap_or_else(|| default_output(razao.as_deref()));
    std::fs::write(&output_path, &report.workbook)
        .map_err(|e| CliError::io(&output_path, e))?;

    let municipal_tax: i64 = report
        .municipal
        .iter()
        .filter_map(|r| r.record.tax_cents)
        .sum();
    let ledger_credit: i64 = report
        .ledger
        .iter()
        .filter_map(|r| r.record.credit_cents)
        .sum();

    if json {
        let summary = serde_json::json!({
            "output": output_path.display().to_string(),
            "prefeitura": report.municipal_summary,
            "financeiro": report.ledger_summary,
            "iss_total": format_brl(municipal_tax),
            "credito_total": format_brl(ledger_credit),
            "logs": report.logs,
        });
        println!("{}", serde_json::to_string_pretty(&summary).unwrap_or_default());
    } else {
        println!(
            "Prefeitura: {} de {} validados (ISS R$ {})",
            report.municipal_summary.matched,
            report.municipal_summary.total,
            format_brl(municipal_tax)
        );
        println!(
            "Financeiro: {} de {} validados (Crédito R$ {})",
            report.ledger_summary.matched,
            report.ledger_summary.total,
            format_brl(ledger_credit)
        );
        println!("Gerado: {}", output_path.display());
    }

    Ok(())
}

fn read_upload(path: Option<&Path>) -> Result<Option<SourceUpload>, CliError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let bytes = std::fs::read(path).map_err(|e| CliError::io(path, e))?;
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("arquivo")
        .to_string();
    Ok(Some(SourceUpload { name, bytes }))
}

fn default_output(razao: Option<&Path>) -> PathBuf {
    match razao.and_then(|p| p.file_stem()).and_then(|s| s.to_str()) {
        Some(stem) => {
            let mut path = PathBuf::new();
            if let Some(parent) = razao.and_then(|p| p.parent()) {
                path.push(parent);
            }
            path.push(format!("{stem}_conciliado.xlsx"));
            path
        }
        None => PathBuf::from("conciliado.xlsx"),
    }
}
