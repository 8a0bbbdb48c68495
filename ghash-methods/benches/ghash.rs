//! GHASH benchmarks.

#![allow(missing_docs)]

use criterion::{
    BenchmarkGroup, BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
    measurement::Measurement,
};
use ghash_methods::{
    ClmulMethod, GHash, GcmMethod, GhashMethod, RawMethod, ShoupMethod4Bits, ShoupMethod8Bits,
    SimpleMethod4Bits, SimpleMethod8Bits,
    universal_hash::{KeyInit, UniversalHash},
};
use hex_literal::hex;

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
type Benchmarker = Criterion;
#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
type Benchmarker = Criterion<criterion_cycles_per_byte::CyclesPerByte>;

const H: [u8; 16] = hex!("66e94bd4ef8a2c3b884cfa59ca342b2e");
const Y: [u8; 16] = hex!("0388dace60b6a392f328c2b971b2fe78");

fn bench_method<M: Measurement>(
    group: &mut BenchmarkGroup<'_, M>,
    name: &str,
    method: &impl GhashMethod,
) {
    group.bench_function(name, |b| {
        let mut y = Y;
        b.iter(|| method.mul(&mut y));
    });
}

fn bench_mul(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("mul");
    group.throughput(Throughput::Bytes(16));

    bench_method(&mut group, "raw", &RawMethod::new(&H));
    bench_method(&mut group, "simple_4bits", &SimpleMethod4Bits::new(&H));
    bench_method(&mut group, "simple_8bits", &SimpleMethod8Bits::new(&H));
    bench_method(&mut group, "shoup_4bits", &ShoupMethod4Bits::new(&H));
    bench_method(&mut group, "shoup_8bits", &ShoupMethod8Bits::new(&H));
    bench_method(&mut group, "gcm", &GcmMethod::new(&H));
    bench_method(&mut group, "clmul", &ClmulMethod::new(&H));

    group.finish();
}

fn bench_hash(c: &mut Benchmarker) {
    let mut group = c.benchmark_group("hash");

    for size in &[10, 100, 1000, 10000] {
        let buf = vec![0u8; *size];

        group.throughput(Throughput::Bytes(*size as u64));

        group.bench_function(BenchmarkId::new("clmul", size), |b| {
            let method = ClmulMethod::new(&H);
            let mut tag = [0u8; 16];
            b.iter(|| method.hash(&mut tag, &buf));
        });

        group.bench_function(BenchmarkId::new("shoup_8bits", size), |b| {
            let method = ShoupMethod8Bits::new(&H);
            let mut tag = [0u8; 16];
            b.iter(|| method.hash(&mut tag, &buf));
        });

        group.bench_function(BenchmarkId::new("update_padded", size), |b| {
            let mut ghash = GHash::new(&H.into());
            b.iter(|| ghash.update_padded(&buf));
        });
    }

    group.finish();
}

#[cfg(not(any(target_arch = "x86_64", target_arch = "x86")))]
criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_mul, bench_hash
);

#[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
criterion_group!(
    name = benches;
    config = Criterion::default().with_measurement(criterion_cycles_per_byte::CyclesPerByte);
    targets = bench_mul, bench_hash
);

criterion_main!(benches);
