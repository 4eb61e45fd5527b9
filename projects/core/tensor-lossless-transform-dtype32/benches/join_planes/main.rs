use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use tensor_lossless_transform_dtype32::bench::untransform::*;

#[cfg(not(target_os = "windows"))]
use pprof::criterion::{Output, PProfProfiler};

type JoinFn = unsafe fn(Planes, *mut u8, usize);

fn criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("dtype32 Join Planes");

    // 8MB of elements; contents do not affect speed
    let element_count = 2 * 1024 * 1024;
    let input: Vec<u8> = (0..element_count * 4).map(|x| (x % 251) as u8).collect();
    let mut output = vec![0u8; input.len()];

    group.throughput(criterion::Throughput::Bytes(input.len() as u64));

    let mut implementations: Vec<(&str, JoinFn)> = vec![("portable", portable as JoinFn)];

    #[cfg(any(target_arch = "x86_64", target_arch = "x86"))]
    {
        use tensor_lossless_transform_common::cpu_detect::*;
        if has_sse2() {
            implementations.push(("sse2", sse2 as JoinFn));
        }
        if has_avx2() {
            implementations.push(("avx2", avx2 as JoinFn));
        }
    }

    let base = input.as_ptr();
    let planes: Planes = unsafe {
        [
            base,
            base.add(element_count),
            base.add(element_count * 2),
            base.add(element_count * 3),
        ]
    };

    for (name, implementation) in implementations {
        group.bench_function(name, |b| {
            b.iter(|| unsafe {
                implementation(
                    black_box(planes),
                    black_box(output.as_mut_ptr()),
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
