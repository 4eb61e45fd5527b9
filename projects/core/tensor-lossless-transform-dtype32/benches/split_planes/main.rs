use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tensor_lossless_transform_dtype32::bench::transform::*;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

type SplitFn = unsafe fn(*const u8, Planes, usize);

// fp32 weights in roughly [-1, 1] with noisy mantissas
fn generate_test_data(element_count: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15_u64;
    let mut data = Vec::with_capacity(element_count * 4);
    for _ in 0..element_count {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let value = ((state >> 40) as f32 / (1u64 << 24) as f32) * 2.0 - 1.0;
        data.extend_from_slice(&value.to_le_bytes());
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtype32 Split Planes");

    // 8MB of elements
    let element_count = 2 * 1024 * 1024;
    let input = generate_test_data(element_count);
    let mut output = vec![0u8; input.len()];

    group.throughput(criterion::Throughput::Bytes(input.len() as u64));

    let mut implementations: Vec<(&str, SplitFn)> = vec![("portable", portable as SplitFn)];

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        use tensor_lossless_transform_common::cpu_detect::*;
        if has_sse2() {
            implementations.push(("sse2", sse2 as SplitFn));
        }
        if has_avx2() {
            implementations.push(("avx2", avx2 as SplitFn));
        }
    }

    for (name, implementation) in implementations {
        group.bench_function(name, |b| {
            let base = output.as_mut_ptr();
            let planes: Planes = unsafe {
                [
                    base,
                    base.add(element_count),
                    base.add(element_count * 2),
                    base.add(element_count * 3),
                ]
            };
            b.iter(|| unsafe {
                implementation(
                    black_box(input.as_ptr()),
                    black_box(planes),
                    black_box(element_count),
                )
            })
        });
    }

    group.finish();
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)));
    targets = criterion_benchmark
}

#[cfg(target_os = "windows")]
criterion_group! {
    name = benches;
    config = Criterion::default();
    targets = criterion_benchmark
}

criterion_main!(benches);
