//! Parser performance benchmarks.
//!
//! Measures grid building and column analysis across sizes and dialects.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use csvsheet::{ColumnTypeAnalyzer, GridBuilder, Parser};
use std::io::Write;
use tempfile::NamedTempFile;

/// Generate synthetic semicolon data with decimal commas.
fn generate_semicolon_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    // Header row
    for i in 0..cols {
        if i > 0 {
            data.push(';');
        }
        data.push_str(&format!("colonna_{}", i + 1));
    }
    data.push_str("\r\n");

    // Data rows
    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push(';');
            }
            // Mix of cell kinds
            match col % 4 {
                0 => data.push_str(&format!("{:06}", row)),
                1 => data.push_str(&format!("{},{:02}", row, row % 100)),
                2 => data.push_str(&format!("Categoria {}", row % 10)),
                3 => data.push_str(&format!("{}.5", row % 1000)),
                _ => unreachable!(),
            }
        }
        data.push_str("\r\n");
    }

    data
}

/// Generate synthetic comma data with quoted fields.
fn generate_comma_data(rows: usize, cols: usize) -> String {
    let mut data = String::new();

    for i in 0..cols {
        if i > 0 {
            data.push(',');
        }
        data.push_str(&format!("column_{}", i + 1));
    }
    data.push('\n');

    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push(',');
            }
            match col % 3 {
                0 => data.push_str(&format!("\"Name {}, Jr.\"", row)),
                1 => data.push_str(&format!("{}.25", row)),
                2 => data.push_str(&format!("{}", row)),
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

/// Benchmark building grids from semicolon text.
fn bench_build_semicolon(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_semicolon");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_semicolon_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let builder = GridBuilder::new();
            b.iter(|| black_box(builder.build(data)))
        });
    }

    group.finish();
}

/// Benchmark building grids from quoted comma text.
fn bench_build_comma(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_comma");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_comma_data(*rows, 9);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let builder = GridBuilder::new();
            b.iter(|| black_box(builder.build(data)))
        });
    }

    group.finish();
}

/// Benchmark column analysis on a built grid.
fn bench_analyze_columns(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze_columns");

    for cols in [5, 10, 20, 50].iter() {
        let grid = GridBuilder::new().build(&generate_semicolon_data(1_000, *cols));
        let analyzer = ColumnTypeAnalyzer::new();

        group.bench_with_input(BenchmarkId::new("cols", cols), &grid, |b, grid| {
            b.iter(|| black_box(analyzer.analyze(grid)))
        });
    }

    group.finish();
}

/// Benchmark end-to-end file parsing including decode and hashing.
fn bench_parse_file(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_file");

    for rows in [1_000, 10_000].iter() {
        let data = generate_semicolon_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            b.iter_with_setup(
                || {
                    let mut temp = NamedTempFile::with_suffix(".csv").unwrap();
                    temp.write_all(data.as_bytes()).unwrap();
                    temp
                },
                |temp| {
                    let parser = Parser::new();
                    black_box(parser.parse_file(temp.path()).unwrap())
                },
            )
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build_semicolon,
    bench_build_comma,
    bench_analyze_columns,
    bench_parse_file,
);
criterion_main!(benches);
