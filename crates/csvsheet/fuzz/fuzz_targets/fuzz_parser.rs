//! Fuzz target for the import pipeline.
//!
//! Decoding, tokenizing, alignment and column analysis must never panic,
//! and every built grid must be rectangular.

#![no_main]

use csvsheet::{Importer, ImporterConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    let lossy = Importer::new();
    if let Ok(table) = lossy.import_bytes(data, "fuzz.csv") {
        assert!(table.grid.is_rectangular());
        assert_eq!(table.mask.len(), table.grid.column_count());
    }

    let strict = Importer::with_config(
        ImporterConfig::default()
            .with_encoding("windows-1252")
            .with_strict_decoding(true),
    );
    let _ = strict.import_bytes(data, "fuzz.csv");
});
