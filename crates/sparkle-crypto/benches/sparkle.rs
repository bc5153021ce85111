//! Benchmarks for the Sparkle permutations, Esch and Schwaemm.

use std::{hint::black_box, time::Duration};

use criterion::{BenchmarkId, Criterion, Throughput, criterion_main};
use sparkle_crypto::{
    Aead, Esch256, Esch384, Hash, Schwaemm128_128, Schwaemm192_192, Schwaemm256_128,
    Schwaemm256_256, sparkle::State,
};

const SIZES: [usize; 5] = [0, 16, 64, 1024, 16 * 1024];

fn bench_permutation<const W: usize>(c: &mut Criterion) {
    let mut g = c.benchmark_group(State::<W>::WIDTH.name());

    let mut state = State::<W>::default();
    g.bench_function("slim", |b| b.iter(|| black_box(&mut state).permute_slim()));
    g.bench_function("big", |b| b.iter(|| black_box(&mut state).permute_big()));

    g.finish();
}

fn bench_hash<H: Hash>(c: &mut Criterion) {
    let mut g = c.benchmark_group(H::ID.name());
    for size in SIZES {
        g.throughput(Throughput::Bytes(size as u64));

        let msg = vec![0u8; size];
        g.bench_with_input(BenchmarkId::from_parameter(size), &msg, |b, msg| {
            b.iter(|| H::hash(black_box(msg)))
        });
    }
    g.finish();
}

// NB: Written so that the output reads
//
// Schwaemm256-128/seal/16
// Schwaemm256-128/open/16
//
// for each size.
fn bench_aead<A: Aead>(c: &mut Criterion) {
    let key = A::Key::try_from(&[0x42u8; 32][..A::KEY_SIZE]).expect("valid key size");
    let aead = A::new(&key);
    let nonce = vec![0x24u8; A::NONCE_SIZE];
    let ad = [0u8; 16];

    let mut g = c.benchmark_group(A::ID.name());
    for size in SIZES {
        g.throughput(Throughput::Bytes(size as u64));

        let pt = vec![0u8; size];
        let mut ct = vec![0u8; size + A::OVERHEAD];
        g.bench_with_input(BenchmarkId::new("seal", size), &pt, |b, pt| {
            b.iter(|| {
                let _ = black_box(aead.seal(
                    black_box(&mut ct),
                    black_box(&nonce),
                    black_box(pt),
                    black_box(&ad),
                ));
            })
        });

        aead.seal(&mut ct, &nonce, &pt, &ad).expect("seal should succeed");
        let mut out = vec![0u8; size];
        g.bench_with_input(BenchmarkId::new("open", size), &ct, |b, ct| {
            b.iter(|| {
                let _ = black_box(aead.open(
                    black_box(&mut out),
                    black_box(&nonce),
                    black_box(ct),
                    black_box(&ad),
                ));
            })
        });
    }
    g.finish();
}

fn benches() {
    let mut c = Criterion::default().warm_up_time(Duration::from_secs(1));

    bench_permutation::<8>(&mut c);
    bench_permutation::<12>(&mut c);
    bench_permutation::<16>(&mut c);

    bench_hash::<Esch256>(&mut c);
    bench_hash::<Esch384>(&mut c);

    bench_aead::<Schwaemm256_128>(&mut c);
    bench_aead::<Schwaemm192_192>(&mut c);
    bench_aead::<Schwaemm128_128>(&mut c);
    bench_aead::<Schwaemm256_256>(&mut c);

    c.final_summary();
}

criterion_main!(benches);
