//! Import command - write one sheet per input file.

use std::path::PathBuf;

use colored::Colorize;
use csvsheet::{
    CsvDirectorySink, FileOutcome, ImportReport, ImportSession, Importer, JsonWorkbookSink,
    TableSink,
};

use super::load_config;
use crate::cli::OutputFormat;

/// Flags of the import command besides the file list.
pub struct ImportOptions {
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub config: Option<PathBuf>,
    pub encoding: Option<String>,
    pub strict: bool,
}

pub async fn run(
    files: Vec<PathBuf>,
    options: ImportOptions,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(
        options.config.as_deref(),
        options.encoding.as_deref(),
        options.strict,
    )?;
    let output = options
        .output
        .clone()
        .unwrap_or_else(|| options.format.default_output());

    println!(
        "{} {} file(s) as {}",
        "Importing".cyan().bold(),
        files.len().to_string().white().bold(),
        options.format.to_string().white()
    );

    let importer = Importer::with_config(config.clone());
    let report = match options.format {
        OutputFormat::Json => {
            let sink = JsonWorkbookSink::new(&output, config.number_format.clone());
            run_session(importer, sink, &files).await?
        }
        OutputFormat::Csv => {
            let sink = CsvDirectorySink::new(&output)
                .with_delimiter(config.output_delimiter as u8)
                .with_number_format(config.number_format.clone());
            run_session(importer, sink, &files).await?
        }
    };

    println!();
    for outcome in &report.outcomes {
        print_outcome(outcome, verbose);
    }

    println!();
    println!(
        "Imported {} sheet(s) ({} empty, {} skipped)",
        report.imported_count().to_string().white().bold(),
        report.empty_count().to_string().yellow(),
        report.skipped_count().to_string().red()
    );

    if report.imported_count() > 0 {
        println!(
            "{} {}",
            "Saved to".green().bold(),
            output.display().to_string().white()
        );
    }

    Ok(())
}

async fn run_session<S: TableSink>(
    importer: Importer,
    sink: S,
    files: &[PathBuf],
) -> csvsheet::Result<ImportReport> {
    let mut session = ImportSession::new(importer, sink);
    session.import_paths(files).await?;
    let (_, report) = session.finish()?;
    Ok(report)
}

fn print_outcome(outcome: &FileOutcome, verbose: bool) {
    match outcome {
        FileOutcome::Imported {
            file,
            sheet,
            rows,
            columns,
            numeric_columns,
        } => {
            println!(
                "  {} {} -> {} ({} rows x {} columns)",
                "✓".green(),
                file.white(),
                sheet.cyan(),
                rows,
                columns
            );
            if verbose && !numeric_columns.is_empty() {
                let list: Vec<String> = numeric_columns.iter().map(|c| c.to_string()).collect();
                println!("      numeric columns: {}", list.join(", "));
            }
        }
        FileOutcome::Empty { file } => {
            println!("  {} {} (empty)", "-".yellow(), file.white());
        }
        FileOutcome::Skipped { file, reason } => {
            println!("  {} {}: {}", "✗".red(), file.white(), reason.red());
        }
    }
}
