use achei::index::term_directory::TermDirectory;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::io::Write;

/// Writes a synthetic `final/index`-shaped file with `term_count` terms,
/// each posted to `postings_per_term` doc-ids, and returns its path.
fn write_synthetic_index(dir: &std::path::Path, term_count: usize, postings_per_term: u32) -> std::path::PathBuf {
    let path = dir.join("index");
    let mut file = std::fs::File::create(&path).unwrap();

    let mut lines = Vec::with_capacity(term_count);
    for i in 0..term_count {
        let term = format!("term{:06}", i);
        let mut postings = String::new();
        for doc_id in 0..postings_per_term {
            postings.push_str(&format!("({},{}),", doc_id, doc_id % 5 + 1));
        }
        lines.push(format!("{}: [{}]", term, postings));
    }
    file.write_all(lines.join("\n").as_bytes()).unwrap();

    path
}

fn bench_term_directory_open(c: &mut Criterion) {
    let small_dir = tempfile::tempdir().unwrap();
    let small_index = write_synthetic_index(small_dir.path(), 100, 10);
    let medium_dir = tempfile::tempdir().unwrap();
    let medium_index = write_synthetic_index(medium_dir.path(), 10_000, 10);

    let mut group = c.benchmark_group("term_directory_open");

    group.bench_with_input(BenchmarkId::new("open", "100_terms"), &small_index, |b, path| {
        b.iter(|| {
            let directory = TermDirectory::open(black_box(path)).unwrap();
            black_box(directory);
        });
    });

    group.bench_with_input(BenchmarkId::new("open", "10000_terms"), &medium_index, |b, path| {
        b.iter(|| {
            let directory = TermDirectory::open(black_box(path)).unwrap();
            black_box(directory);
        });
    });

    group.finish();
}

fn bench_term_lookup(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let index_path = write_synthetic_index(dir.path(), 10_000, 10);
    let directory = TermDirectory::open(&index_path).unwrap();

    c.bench_function("term_directory_get_existing_term", |b| {
        b.iter(|| {
            let postings = directory.get(black_box("term005000")).unwrap();
            black_box(postings);
        });
    });
}

criterion_group!(benches, bench_term_directory_open, bench_term_lookup);
criterion_main!(benches);
