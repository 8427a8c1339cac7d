use criterion::{black_box, criterion_group, criterion_main, Criterion};
use decoder_core::test_utils::simulator::{Fist, Simulator};
use decoder_core::{decode, DecoderConfig, Symbol, MORSE_TABLE};

fn table_lookup(c: &mut Criterion) {
    let codes: Vec<Vec<Symbol>> = MORSE_TABLE
        .iter()
        .map(|(pattern, _)| pattern.chars().filter_map(Symbol::from_char).collect())
        .collect();

    c.bench_function("decode_full_table", |b| {
        b.iter(|| {
            for code in &codes {
                black_box(decode(black_box(code)));
            }
        })
    });
}

fn simulated_keying(c: &mut Criterion) {
    c.bench_function("simulate_paris", |b| {
        b.iter(|| {
            let mut sim = Simulator::new(DecoderConfig::default());
            sim.key_text(black_box("PARIS"), Fist::default());
            black_box(sim.now())
        })
    });
}

criterion_group!(benches, table_lookup, simulated_keying);
criterion_main!(benches);
