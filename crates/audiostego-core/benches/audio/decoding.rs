use criterion::{criterion_group, criterion_main, Criterion};

use audiostego_core::media::load;
use audiostego_core::{pipeline, Embedding, PhaseCoding};

pub fn audio_decoding(c: &mut Criterion) {
    let carrier = load("tests/audio/carrier-music-stereo.wav").expect("Cannot load carrier");

    let lsb = Embedding::default();
    let secret = pipeline::hide(&carrier, "Hello World!", &lsb, 0)
        .expect("Cannot hide message")
        .buffer;
    c.bench_function("Audio Decoding, LSB plane", |b| {
        b.iter(|| pipeline::unveil(&secret, &lsb).expect("Cannot unveil"))
    });

    let phase: Embedding = PhaseCoding::default().into();
    let secret = pipeline::hide(&carrier, "Hello World!", &phase, 0)
        .expect("Cannot hide message")
        .buffer;
    c.bench_function("Audio Decoding, phase coding", |b| {
        b.iter(|| pipeline::unveil(&secret, &phase).expect("Cannot unveil"))
    });
}

criterion_group!(benches, audio_decoding);
criterion_main!(benches);
