use criterion::{criterion_group, criterion_main, Criterion};

use audiostego_core::media::load;
use audiostego_core::{pipeline, EchoDelay, Embedding, LsbPlane, PhaseCoding};

pub fn audio_encoding(c: &mut Criterion) {
    let carrier = load("tests/audio/carrier-music-stereo.wav").expect("Cannot load carrier");
    let secret_message = "Hello!";
    let strategies: [(&str, Embedding); 3] = [
        ("LSB plane", LsbPlane::new(2).expect("valid depth").into()),
        ("Phase coding", PhaseCoding::default().into()),
        ("Echo delay", EchoDelay::new(50, 120, 0.6).expect("valid delays").into()),
    ];

    for (name, embedding) in strategies {
        c.bench_function(&format!("Audio Encoding to memory, {name}"), |b| {
            b.iter(|| {
                pipeline::hide(&carrier, secret_message, &embedding, 0)
                    .expect("Cannot hide message")
            })
        });
    }
}

criterion_group!(benches, audio_encoding);
criterion_main!(benches);
