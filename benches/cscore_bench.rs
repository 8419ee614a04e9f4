//! Scoring and colorizing throughput.
#![allow(missing_docs, clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use msa_cscore::{
    columns_from_rows, score_alignment, AlignmentColumns, Color, Gradient,
    ScoreSpace, ScoringOptions, SubstitutionMatrix,
};
use rand::{rngs::StdRng, Rng, SeedableRng};

const ALPHABET: &[u8] = b"ARNDCQEGHILKMFPSTWYV*";

/// Diagonal-heavy toy matrix over the 20 amino acids plus the wildcard.
fn toy_matrix() -> SubstitutionMatrix {
    let n = ALPHABET.len();
    let scores = (0..n * n)
        .map(|k| {
            let (i, j) = (k / n, k % n);
            if i == j {
                5
            } else if i == n - 1 || j == n - 1 {
                -4
            } else {
                ((i * 7 + j * 3) % 5) as i32 - 2
            }
        })
        .collect();
    SubstitutionMatrix::new("toy", ALPHABET, scores).unwrap()
}

fn random_alignment(n_seq: usize, n_pos: usize) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(3);
    let symbols = b"ARNDCQEGHILKMFPSTWYV--.X";
    let rows: Vec<Vec<u8>> = (0..n_seq)
        .map(|_| {
            (0..n_pos)
                .map(|_| symbols[rng.random_range(0..symbols.len())])
                .collect()
        })
        .collect();
    columns_from_rows(&rows).unwrap()
}

fn score_benchmark(c: &mut Criterion) {
    let space = ScoreSpace::new(&toy_matrix(), Some(b'*')).unwrap();
    let mut group = c.benchmark_group("score_alignment");

    for (n_seq, n_pos) in [(50, 500), (500, 2000)] {
        let data = random_alignment(n_seq, n_pos);
        let columns = AlignmentColumns::new(&data, n_seq, n_pos).unwrap();
        for parallel in [false, true] {
            let options = ScoringOptions {
                parallel,
                ..ScoringOptions::default()
            };
            let mode = if parallel { "parallel" } else { "serial" };
            group.bench_function(format!("{n_seq}x{n_pos}_{mode}"), |b| {
                b.iter(|| {
                    black_box(
                        score_alignment(&space, &columns, &options).unwrap(),
                    )
                })
            });
        }
    }
    group.finish();
}

fn colorize_benchmark(c: &mut Criterion) {
    let gradient = Gradient::preset("jet").unwrap();
    let values: Vec<f64> = (0..1_000_000).map(|i| f64::from(i) / 1e6).collect();
    let mut image = vec![Color::TRANSPARENT; values.len()];

    c.bench_function("colorize_1m", |b| {
        b.iter(|| {
            gradient.colorize(black_box(&values), &mut image).unwrap();
        })
    });
    c.bench_function("par_colorize_1m", |b| {
        b.iter(|| {
            gradient.par_colorize(black_box(&values), &mut image).unwrap();
        })
    });
}

criterion_group!(benches, score_benchmark, colorize_benchmark);
criterion_main!(benches);
