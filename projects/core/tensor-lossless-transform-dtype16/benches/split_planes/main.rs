use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tensor_lossless_transform_dtype16::bench::transform::*;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

type SplitFn = unsafe fn(*const u8, *mut u8, *mut u8, usize);

// bf16 weights clustered around 0 with noisy mantissas
fn generate_test_data(element_count: usize) -> Vec<u8> {
    let mut state = 0x2545_F491_u32;
    let mut data = Vec::with_capacity(element_count * 2);
    for _ in 0..element_count {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let exponent = 0x3C + (state >> 29) as u16; // 2^-7 .. 2^0
        let element = ((state as u16) & 0x807F) | (exponent << 7);
        data.extend_from_slice(&element.to_le_bytes());
    }
    data
}

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtype16 Split Planes");

    // 8MB of elements
    let element_count = 4 * 1024 * 1024;
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
            b.iter(|| unsafe {
                let (plane0, plane1) = output.split_at_mut(element_count);
                implementation(
                    black_box(input.as_ptr()),
                    black_box(plane0.as_mut_ptr()),
                    black_box(plane1.as_mut_ptr()),
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
