use criterion::{Criterion, criterion_group, criterion_main};
use datechart::api::{ChartCollection, ChartCollectionConfig};
use datechart::core::{
    ChartLayout, ScaleState, TimeScale, TimeSeries, ZoomTransform, build_scales, project_line_path,
};
use datechart::reactive::signal;
use datechart::render::ContainerHandle;
use std::hint::black_box;

const QUARTER_HOUR_MS: f64 = 900_000.0;

/// A year of 15-minute meter readings.
fn meter_readings() -> (Vec<f64>, Vec<f64>) {
    let times: Vec<f64> = (0..35_040)
        .map(|i| 1_704_067_200_000.0 + i as f64 * QUARTER_HOUR_MS)
        .collect();
    let values = (0..times.len())
        .map(|i| 0.4 + ((i % 96) as f64 / 96.0) * 1.6)
        .collect();
    (times, values)
}

fn bench_build_scales_35k(c: &mut Criterion) {
    let (times, values) = meter_readings();
    let layout = ChartLayout::default();

    c.bench_function("build_scales_35k", |b| {
        b.iter(|| {
            let _ = build_scales(black_box(&times), black_box(&values), layout)
                .expect("scales should build");
        })
    });
}

fn bench_line_projection_35k(c: &mut Criterion) {
    let (times, values) = meter_readings();
    let ScaleState::Ready(scales) =
        build_scales(&times, &values, ChartLayout::default()).expect("scales should build")
    else {
        panic!("year of readings is not degenerate");
    };

    c.bench_function("line_projection_35k", |b| {
        b.iter(|| {
            let _ = project_line_path(black_box(&times), black_box(&values), black_box(scales));
        })
    });
}

fn bench_rescaled_time_ticks(c: &mut Criterion) {
    let scale = TimeScale::new(1_704_067_200_000.0, 1_735_689_600_000.0)
        .expect("valid time scale")
        .nice()
        .with_range(0.0, 1130.0);
    let transform = ZoomTransform::new(37.0, -18_000.0, 0.0);

    c.bench_function("rescaled_time_ticks", |b| {
        b.iter(|| {
            let _ = black_box(transform).rescale_x(black_box(scale)).default_ticks();
        })
    });
}

fn bench_collection_zoom_redraw_8(c: &mut Criterion) {
    let (times, values) = meter_readings();
    let series: Vec<TimeSeries> = (0..8)
        .map(|i| {
            TimeSeries::new(format!("meter-{i}"), "kWh", times.clone(), values.clone())
                .expect("aligned series")
        })
        .collect();
    let (_writer, reader) = signal(series);
    let mut collection = ChartCollection::new(
        ChartCollectionConfig::default(),
        ContainerHandle::new("charts"),
        ContainerHandle::new("zoomboxes"),
        reader,
    )
    .expect("collection init");

    let mut zoomed_in = false;
    c.bench_function("collection_zoom_redraw_8", |b| {
        b.iter(|| {
            zoomed_in = !zoomed_in;
            let k = if zoomed_in { 8.0 } else { 1.0 };
            collection
                .zoom_surface_mut()
                .scale_to(black_box(k), Some((565.0, 75.0)))
                .expect("zoom should emit");
        })
    });
}

criterion_group!(
    benches,
    bench_build_scales_35k,
    bench_line_projection_35k,
    bench_rescaled_time_ticks,
    bench_collection_zoom_redraw_8
);
criterion_main!(benches);
