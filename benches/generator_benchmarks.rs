// Benchmarks for the transposition generator and cycle partitioning

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use vocal_trainer::exercise::generator::{
    generate_cycle_relative_steps, generate_transposed_steps,
};
use vocal_trainer::exercise::sequence::TranspositionDirection;
use vocal_trainer::exercise::step::SequenceStep;
use vocal_trainer::pitch::Note;
use vocal_trainer::playback::cycles::detect_cycles;

fn note(s: &str) -> Note {
    s.parse().unwrap()
}

fn base_pattern(len: usize) -> Vec<SequenceStep> {
    (0..len)
        .map(|i| SequenceStep::new(note("C3").transpose((i % 12) as i32), i as f64 * 125.0, 0.3))
        .collect()
}

fn bench_generator(c: &mut Criterion) {
    let base = base_pattern(16);
    let root = note("C3");
    let min = note("C2");
    let max = note("C6");

    c.bench_function("generate_one_way_4_octaves", |b| {
        b.iter(|| {
            generate_transposed_steps(
                black_box(&base),
                root,
                min,
                max,
                TranspositionDirection::OneWay,
            )
        })
    });

    c.bench_function("generate_both_ways_4_octaves", |b| {
        b.iter(|| {
            generate_transposed_steps(
                black_box(&base),
                root,
                min,
                max,
                TranspositionDirection::BothWays,
            )
        })
    });
}

fn bench_cycle_detection(c: &mut Criterion) {
    let base = base_pattern(16);
    let steps = generate_cycle_relative_steps(
        &base,
        note("C3"),
        note("C2"),
        note("C6"),
        TranspositionDirection::BothWays,
    );

    c.bench_function("detect_cycles_both_ways_4_octaves", |b| {
        b.iter(|| detect_cycles(black_box(&steps)))
    });
}

criterion_group!(benches, bench_generator, bench_cycle_detection);
criterion_main!(benches);
