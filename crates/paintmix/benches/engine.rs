use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use paintmix::{Background, MatchingEngine, MediumType, MixingConfig, Palette, PigmentColor, Rgb};
use std::hint::black_box;

fn palette() -> Palette {
    let colors = [
        ("Cadmium Red", Rgb::new(0xcc, 0x22, 0x22)),
        ("Ultramarine", Rgb::new(0x22, 0x22, 0xcc)),
        ("Cadmium Yellow", Rgb::new(0xf0, 0xd0, 0x20)),
        ("Phthalo Green", Rgb::new(0x10, 0x70, 0x50)),
        ("Burnt Sienna", Rgb::new(0x8a, 0x33, 0x24)),
        ("Titanium White", Rgb::new(0xff, 0xff, 0xff)),
    ];

    Palette::new(
        MediumType::Oil,
        colors
            .iter()
            .enumerate()
            .map(|(index, (name, rgb))| {
                PigmentColor::from_rgb(1, index as u32, name, *rgb).expect("reflectance converges")
            })
            .collect(),
    )
}

pub fn run_benchmarks(c: &mut Criterion) {
    let palette = palette();
    let paper = Background::new(Rgb::new(0xf7, 0xf5, 0xef)).expect("reflectance converges");
    let canvas = Background::new(Rgb::new(0xe8, 0xe0, 0xd0)).expect("reflectance converges");

    let mut group = c.benchmark_group("engine");
    group.sample_size(10);

    group.bench_function("from-rgb", |b| {
        b.iter(|| paintmix::from_rgb(black_box(Rgb::new(0x99, 0x55, 0xbb))))
    });

    group.bench_function("set-palette", |b| {
        b.iter_batched(
            || MatchingEngine::new(MixingConfig::default()),
            |mut engine| {
                engine.set_palette(&palette);
                engine
            },
            BatchSize::PerIteration,
        )
    });

    let mut engine = MatchingEngine::new(MixingConfig::default());
    engine.set_palette(&palette);
    engine.set_background(paper.clone());

    group.bench_function("set-background", |b| {
        b.iter_batched(
            || {
                let mut engine = MatchingEngine::new(MixingConfig::default());
                engine.set_palette(&palette);
                engine.set_background(paper.clone());
                engine
            },
            |mut engine| {
                engine.set_background(canvas.clone());
                engine
            },
            BatchSize::PerIteration,
        )
    });

    group.bench_function("find-similar-colors", |b| {
        b.iter(|| engine.find_similar_colors(black_box(Rgb::new(0x99, 0x55, 0xbb)), 0.05, 0.0, 5))
    });

    group.finish();
}

criterion_group!(benches, run_benchmarks);
criterion_main!(benches);
