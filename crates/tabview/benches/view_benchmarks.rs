//! View pipeline benchmarks.
//!
//! Measures parsing and the filter/sort/paginate pipeline at the dataset
//! sizes the row cap allows.

use std::num::NonZeroUsize;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use tabview::export;
use tabview::view::recompute_view;
use tabview::{
    ColumnState, Dataset, FilterScope, FilterState, PageState, Parser, ParserConfig,
    SortDirection, SortState,
};

/// Generate synthetic CSV data with the specified number of rows and columns.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut rng = StdRng::seed_from_u64(42);
    let mut data = String::new();

    let header: Vec<String> = (0..cols).map(|i| format!("column_{}", i + 1)).collect();
    data.push_str(&header.join(","));
    data.push('\n');

    for row in 0..rows {
        for col in 0..cols {
            if col > 0 {
                data.push(',');
            }
            // Mix of numbers, words and blanks
            match col % 4 {
                0 => data.push_str(&format!("ID_{:06}", row)),
                1 => data.push_str(&format!("{:.2}", rng.gen_range(0.0..1000.0))),
                2 => data.push_str(&format!("Category_{}", rng.gen_range(0..10))),
                3 => {
                    if rng.gen_bool(0.8) {
                        data.push_str(&rng.gen_range(0..100_000).to_string());
                    }
                }
                _ => unreachable!(),
            }
        }
        data.push('\n');
    }

    data
}

fn load(rows: usize, cols: usize) -> Dataset {
    let config = ParserConfig {
        max_rows: None,
        ..ParserConfig::default()
    };
    let output = Parser::with_config(config)
        .parse_str(&generate_csv_data(rows, cols))
        .unwrap();
    Dataset::ingest("bench.csv", output.fields, output.records).unwrap()
}

/// Benchmark parsing CSV text of various sizes.
fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 5_000].iter() {
        let data = generate_csv_data(*rows, 10);

        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_str(data).unwrap()))
        });
    }

    group.finish();
}

/// Benchmark the full pipeline with a search term and a numeric sort.
fn bench_recompute(c: &mut Criterion) {
    let mut group = c.benchmark_group("recompute_view");

    for rows in [100, 1_000, 5_000].iter() {
        let dataset = load(*rows, 10);
        let columns = ColumnState::with_defaults(dataset.fields(), 10);
        let filter = FilterState::new("category_3", FilterScope::All);
        let sort = SortState::by("column_2", SortDirection::Descending);
        let page = PageState::new(NonZeroUsize::new(50).unwrap());

        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter(|| black_box(recompute_view(dataset, &filter, &sort, &page, &columns).matched_count()))
        });
    }

    group.finish();
}

/// Benchmark sorting a column that mixes numbers and text.
fn bench_mixed_sort(c: &mut Criterion) {
    let dataset = load(5_000, 4);
    let columns = ColumnState::with_defaults(dataset.fields(), 4);
    let sort = SortState::by("column_4", SortDirection::Ascending);

    c.bench_function("sort_mixed_5000", |b| {
        b.iter(|| {
            black_box(
                recompute_view(&dataset, &FilterState::default(), &sort, &PageState::default(), &columns)
                    .matched_count(),
            )
        })
    });
}

/// Benchmark exporting every row as JSON and CSV.
fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");
    let dataset = load(5_000, 10);
    let records: Vec<_> = dataset.records().iter().collect();

    group.bench_function("json", |b| b.iter(|| black_box(export::to_json(&records).unwrap())));
    group.bench_function("csv", |b| {
        b.iter(|| black_box(export::to_delimited_text(dataset.fields(), &records).unwrap()))
    });

    group.finish();
}

criterion_group!(benches, bench_parse, bench_recompute, bench_mixed_sort, bench_export);
criterion_main!(benches);
