//! Inspect command - show how a file would be imported without writing it.

use std::path::{Path, PathBuf};

use colored::Colorize;
use csvsheet::sink::render_table;
use csvsheet::{ImportedTable, Importer};

use super::load_config;

const PREVIEW_ROWS: usize = 10;

pub fn run(
    file: PathBuf,
    json_output: bool,
    config: Option<PathBuf>,
    encoding: Option<String>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let (importer, table) = load_table(&file, config.as_deref(), encoding.as_deref())?;

    if json_output {
        println!("{}", serde_json::to_string_pretty(&report(&table))?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Inspecting".cyan().bold(),
        file.display().to_string().white()
    );
    println!();

    if let Some(source) = &table.source {
        println!("Encoding:   {}", source.encoding.white());
        if verbose {
            println!("SHA-256:    {}", source.hash);
            println!("Size:       {} bytes", source.size_bytes);
        }
    }
    println!(
        "Dimensions: {} rows x {} columns",
        table.row_count().to_string().white().bold(),
        table.column_count().to_string().white().bold()
    );
    println!("Dialect:    {}", table.grid.dialect_summary().white());
    println!();

    if table.is_empty() {
        println!("{}", "Nothing to import - file is empty.".yellow());
        return Ok(());
    }

    println!("{}", "Columns:".yellow().bold());
    for (index, name) in table.grid.header_names().iter().enumerate() {
        let kind = if table.mask.is_numeric(index) {
            "numeric".green()
        } else {
            "text".normal()
        };
        println!("  {:3} {:24} {}", index, name, kind);
    }
    println!();

    let rendered = render_table(&table, &importer.config().number_format);
    let shown = rendered.len().min(PREVIEW_ROWS);
    println!("{}", "Preview:".yellow().bold());
    for row in &rendered[..shown] {
        println!("  {}", row.join(" | "));
    }
    if rendered.len() > shown {
        println!("  ... {} more row(s)", rendered.len() - shown);
    }

    Ok(())
}

/// Import `file` with the same configuration the import command would use.
fn load_table(
    file: &Path,
    config: Option<&Path>,
    encoding: Option<&str>,
) -> Result<(Importer, ImportedTable), Box<dyn std::error::Error>> {
    let importer = Importer::with_config(load_config(config, encoding, false)?);
    let table = importer.import_file(file)?;
    Ok((importer, table))
}

fn report(table: &ImportedTable) -> serde_json::Value {
    serde_json::json!({
        "source": table.source,
        "sheet": table.sheet_name,
        "rows": table.row_count(),
        "columns": table.column_count(),
        "dialect": table.grid.dialect_summary(),
        "headers": table.grid.header_names(),
        "numeric_columns": table.mask.numeric_columns().collect::<Vec<_>>(),
        "empty": table.is_empty(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_report() {
        let table = Importer::new().import_text("Matricola;Ore\n00123;7,5", Some("ore".into()));
        let value = report(&table);

        assert_eq!(value["rows"], 2);
        assert_eq!(value["columns"], 2);
        assert_eq!(value["dialect"], "semicolon");
        assert_eq!(value["numeric_columns"], serde_json::json!([1]));
        assert_eq!(value["headers"], serde_json::json!(["Matricola", "Ore"]));
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(run(PathBuf::from("/nonexistent/file.csv"), false, None, None, false).is_err());
    }

    #[test]
    fn test_inspect_uses_encoding_and_config() {
        let dir = tempfile::tempdir().unwrap();
        let data = dir.path().join("ore.csv");
        std::fs::write(&data, b"Citt\xE0;Codice\r\nRoma;1,5\r\n").unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"{"analyzer": {"excluded_headers": ["codice"]}}"#).unwrap();

        let (_, table) = load_table(&data, Some(config.as_path()), Some("windows-1252")).unwrap();
        let value = report(&table);

        assert_eq!(value["headers"], serde_json::json!(["Città", "Codice"]));
        assert_eq!(value["numeric_columns"], serde_json::json!([]));
        assert_eq!(value["source"]["encoding"], "windows-1252");
    }
}
