use criterion::{black_box, criterion_group, criterion_main, Criterion};
use roialign::{roi_align, ExecOptions, FeatureMap, MapDimensions, RoiAlignConfig, RoiBox};

fn bench_roi_align(c: &mut Criterion) {
    // Typical detector backbone output: 256 channels at 1/16 scale
    let dims = MapDimensions::new(64, 64, 256);
    let pixels: Vec<f32> = (0..dims.element_count())
        .map(|i| (i % 251) as f32 / 251.0)
        .collect();
    let features = FeatureMap::new(&pixels, dims);
    let roi = RoiBox::new(48.0, 64.0, 720.0, 560.0);

    let config = RoiAlignConfig::new(7, 7)
        .with_spatial_scale(1.0 / 16.0)
        .with_sampling_ratio(2);

    c.bench_function("roi_align_7x7_256c", |b| {
        b.iter(|| {
            roi_align(
                black_box(&features),
                black_box(roi),
                &config,
                &ExecOptions::default(),
            )
            .unwrap()
        })
    });

    let adaptive = config.with_sampling_ratio(0);
    c.bench_function("roi_align_7x7_256c_adaptive", |b| {
        b.iter(|| {
            roi_align(
                black_box(&features),
                black_box(roi),
                &adaptive,
                &ExecOptions::default(),
            )
            .unwrap()
        })
    });

    let single = ExecOptions::default().with_num_threads(1);
    c.bench_function("roi_align_7x7_256c_single_thread", |b| {
        b.iter(|| roi_align(black_box(&features), black_box(roi), &config, &single).unwrap())
    });
}

criterion_group!(benches, bench_roi_align);
criterion_main!(benches);
