//! SVG path data parsing and curve conversion benchmarks

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use folio::GraphicsPath;
use std::hint::black_box;

/// A zig-zag outline with a mix of absolute, relative and curved commands.
fn path_data(segments: usize) -> String {
    let mut data = String::from("M0,0");
    for i in 0..segments {
        match i % 4 {
            0 => data.push_str(" l10-5"),
            1 => data.push_str(" c2 4 6 4 8 0"),
            2 => data.push_str(" q4-6 8 0"),
            _ => data.push_str(" a5 5 0 0 1 10 0"),
        }
    }
    data.push('Z');
    data
}

fn benchmark_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_parse");

    for segments in [10, 100, 1000] {
        let data = path_data(segments);
        group.bench_with_input(BenchmarkId::new("segments", segments), &data, |b, data| {
            b.iter(|| GraphicsPath::parse(black_box(data)).expect("Failed to parse path data"));
        });
    }

    group.finish();
}

fn benchmark_to_cubic(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_to_cubic");

    for segments in [10, 100, 1000] {
        let path = GraphicsPath::parse(&path_data(segments)).expect("Failed to parse path data");
        group.bench_with_input(BenchmarkId::new("segments", segments), &path, |b, path| {
            b.iter(|| black_box(path).to_cubic_path().expect("Failed to convert path"));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parse, benchmark_to_cubic);
criterion_main!(benches);
