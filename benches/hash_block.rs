use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sha256bmb::pow::Challenge;
use sha256bmb::{crypto, hash_block};

pub fn criterion_benchmark(c: &mut Criterion) {
    crypto::from_feature_flags().install_process_default();

    c.bench_function("hash_block", |b| {
        let block = [0x61; 64];
        b.iter(|| black_box(hash_block(black_box(&block))));
    });

    c.bench_function("challenge_try_next", |b| {
        let mut rng = fastrand::Rng::with_seed(1);
        let mut challenge = Challenge::new(&[0; 32], 255, &mut rng);
        b.iter(|| black_box(challenge.try_next()));
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
