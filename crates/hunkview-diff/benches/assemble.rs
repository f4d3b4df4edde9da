use criterion::{black_box, criterion_group, criterion_main, Criterion};

use hunkview_diff::{assemble, Edit, SparseFileContent};

const LINES: usize = 100_000;
const EDIT_EVERY: usize = 1_000;
const CONTEXT: usize = 10;

/// A large file with a one-line replacement every `EDIT_EVERY` lines and
/// only the surrounding context loaded.
fn sparse_case() -> (SparseFileContent, SparseFileContent, Vec<Edit>) {
    let mut a = SparseFileContent::new(LINES);
    let mut b = SparseFileContent::new(LINES);
    let mut edits = Vec::new();

    for at in (EDIT_EVERY / 2..LINES).step_by(EDIT_EVERY) {
        for i in at.saturating_sub(CONTEXT)..(at + CONTEXT + 1).min(LINES) {
            let text = format!("line {i}");
            a.insert(i, text.clone()).unwrap();
            b.insert(i, text).unwrap();
        }
        a.insert(at, format!("old {at}")).unwrap();
        b.insert(at, format!("new {at}")).unwrap();
        edits.push(Edit::replace(at, at + 1, at, at + 1));
    }
    (a, b, edits)
}

fn bench_assemble(c: &mut Criterion) {
    let (a, b, edits) = sparse_case();
    c.bench_function("assemble_sparse_100k", |bench| {
        bench.iter(|| assemble(black_box(&edits), &a, &b).unwrap())
    });

    let full: Vec<String> = (0..LINES).map(|i| format!("line {i}")).collect();
    let a = SparseFileContent::full(full.clone());
    let b = SparseFileContent::full(full);
    let no_edits: Vec<Edit> = Vec::new();
    c.bench_function("assemble_full_identical_100k", |bench| {
        bench.iter(|| assemble(black_box(&no_edits), &a, &b).unwrap())
    });
}

criterion_group!(benches, bench_assemble);
criterion_main!(benches);
