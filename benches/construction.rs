//! Construction and lookup benchmarks
//!
//! Run with: `cargo bench`
//! Save baseline: `cargo bench -- --save-baseline main`
//! Compare: `cargo bench -- --baseline main`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use stx::index::SuffixTree;

/// Deterministic pseudo-random text over `alphabet`
fn generate_text(len: usize, alphabet: &[u8]) -> Vec<u8> {
    let mut state: u64 = 0x2545_F491_4F6C_DD1D;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            alphabet[(state % alphabet.len() as u64) as usize]
        })
        .collect()
}

/// Source-code-like text with many repeats
fn generate_code(len: usize) -> Vec<u8> {
    let mut text = Vec::with_capacity(len);
    let mut i = 0;
    while text.len() < len {
        text.extend_from_slice(
            format!("fn function_{i}() {{\n    let x = {i} * 2;\n    println!(\"{{}}\", x);\n}}\n")
                .as_bytes(),
        );
        i += 1;
    }
    text.truncate(len);
    text
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    for size in [1_000, 10_000, 100_000] {
        let dna = generate_text(size, b"acgt");
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("dna", size), &dna, |b, text| {
            b.iter(|| SuffixTree::build(black_box(text.clone())))
        });

        let code = generate_code(size);
        group.bench_with_input(BenchmarkId::new("code", size), &code, |b, text| {
            b.iter(|| SuffixTree::build(black_box(text.clone())))
        });
    }

    // Worst case for naive builders: a single repeated symbol
    let run = vec![b'a'; 100_000];
    group.bench_function("run_100000", |b| {
        b.iter(|| SuffixTree::build(black_box(run.clone())))
    });

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let code = generate_code(200_000);
    let tree = SuffixTree::build(code);

    let patterns: [&[u8]; 4] = [b"fn", b"println!", b"function_1234()", b"not present anywhere"];

    let mut group = c.benchmark_group("lookup");
    for pattern in patterns {
        group.bench_with_input(
            BenchmarkId::from_parameter(String::from_utf8_lossy(pattern)),
            &pattern,
            |b, &p| b.iter(|| tree.find(black_box(p))),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_construction, bench_lookup);
criterion_main!(benches);
