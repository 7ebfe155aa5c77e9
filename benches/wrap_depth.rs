//! Focused benchmark: cost of 1, 4, 8, 16 nested wraps on the error path.
//!
//! Run with: cargo bench --bench wrap_depth

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main, measurement::WallTime};
use std::hint::black_box;
use wrapat::{ResultWrapExt, WrapError, wrap};

#[inline(never)]
fn chain_wrap(depth: u32) -> Result<(), WrapError> {
    if depth == 0 {
        Err(wrap("error"))
    } else {
        chain_wrap(depth - 1).wrap()
    }
}

fn bench_wrap_depth(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("wrap_depth");
    group.warm_up_time(std::time::Duration::from_millis(500));
    group.measurement_time(std::time::Duration::from_secs(1));
    group.sample_size(30);

    for depth in [1, 4, 8, 16] {
        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
            b.iter(|| {
                let _ = chain_wrap(black_box(depth));
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_wrap_depth);
criterion_main!(benches);
