//! Benchmarks for evaluator panel throughput

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use golden_eval::evaluators::{default_panel, run_panel};

fn sample_output(sentences: usize) -> String {
    (0..sentences)
        .map(|i| format!("Fact number {i} describes one part of the overall process in detail."))
        .collect::<Vec<_>>()
        .join(" ")
}

fn benchmark_single_evaluators(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_evaluator");

    let input = "Explain how the water cycle works and why it matters?";
    let output = sample_output(10);
    let expected = "Water evaporates, condenses into clouds, and falls as precipitation.";

    let panel = default_panel();
    for evaluator in &panel {
        group.bench_function(evaluator.name(), |b| {
            b.iter(|| {
                evaluator.evaluate(black_box(input), black_box(&output), Some(black_box(expected)))
            });
        });
    }

    group.finish();
}

fn benchmark_full_panel(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_panel");

    let input = "Explain how the water cycle works and why it matters?";
    let expected = "Water evaporates, condenses into clouds, and falls as precipitation.";
    let panel = default_panel();

    for size in &[5, 20, 80] {
        let output = sample_output(*size);

        group.bench_function(format!("panel_{size}_sentences"), |b| {
            b.iter(|| {
                run_panel(
                    black_box(&panel),
                    black_box(input),
                    black_box(&output),
                    Some(black_box(expected)),
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_evaluators, benchmark_full_panel);
criterion_main!(benches);
