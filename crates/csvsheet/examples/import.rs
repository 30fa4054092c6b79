//! Example: Import CSV files into a JSON workbook.
//!
//! Usage:
//!   cargo run --example import -- <output.json> <file>...
//!
//! Example:
//!   cargo run --example import -- book.json gennaio.csv febbraio.csv

use std::env;

use csvsheet::{FileOutcome, ImportSession, Importer, JsonWorkbookSink, NumberFormat};

#[tokio::main]
async fn main() -> csvsheet::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: cargo run --example import -- <output.json> <file>...");
        std::process::exit(1);
    }

    let sink = JsonWorkbookSink::new(&args[1], NumberFormat::default());
    let mut session = ImportSession::new(Importer::new(), sink);
    session.import_paths(&args[2..]).await?;
    let (sink, report) = session.finish()?;

    for outcome in &report.outcomes {
        match outcome {
            FileOutcome::Imported {
                file,
                sheet,
                rows,
                columns,
                numeric_columns,
            } => println!(
                "{} -> '{}' ({}x{}, numeric columns {:?})",
                file, sheet, rows, columns, numeric_columns
            ),
            FileOutcome::Empty { file } => println!("{}: empty", file),
            FileOutcome::Skipped { file, reason } => println!("{}: skipped ({})", file, reason),
        }
    }

    println!(
        "\nWrote {} sheet(s) to {}",
        sink.workbook().len(),
        sink.path().display()
    );

    Ok(())
}
