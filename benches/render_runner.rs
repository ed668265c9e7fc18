use criterion::{criterion_group, criterion_main, Criterion};

use wordmandala::rendering::plan::RenderPlan;
use wordmandala::{compute_seed, render_word, RenderConfig};

fn bench_plan_compose(c: &mut Criterion) {
    let seed = compute_seed("ocean");
    c.bench_function("plan_compose", |b| {
        b.iter(|| {
            let plan = RenderPlan::compose(seed);
            std::hint::black_box(plan.segments)
        })
    });
}

fn bench_render_256(c: &mut Criterion) {
    let config = RenderConfig::square(256);
    c.bench_function("render_word_256", |b| {
        b.iter(|| {
            let art = render_word("ocean", &config).expect("render failed");
            std::hint::black_box(art.png_data.len())
        })
    });
}

criterion_group!(benches, bench_plan_compose, bench_render_256);
criterion_main!(benches);
