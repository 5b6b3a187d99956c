use approx::assert_abs_diff_eq;
use chrono::{TimeZone, Utc};
use datechart::api::{ChartCollection, ChartCollectionConfig};
use datechart::core::{ChartLayout, Rect, TimeSeries, ZoomTransform};
use datechart::reactive::signal;
use datechart::render::{ContainerHandle, PIXEL_LINE_OFFSET_Y, PIXEL_OFFSET, SurfaceKey};

fn day_ms(day: u32) -> f64 {
    Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0)
        .single()
        .expect("valid date")
        .timestamp_millis() as f64
}

fn month_series(title: &str) -> TimeSeries {
    let times: Vec<f64> = (1..=30).map(day_ms).collect();
    let values: Vec<f64> = (0..30).map(|i| f64::from(i % 7) + 1.0).collect();
    TimeSeries::new(title, "kWh", times, values).expect("aligned series")
}

fn collection(series: Vec<TimeSeries>) -> (ChartCollection, ContainerHandle) {
    let (_writer, reader) = signal(series);
    let main = ContainerHandle::new("charts");
    let collection = ChartCollection::new(
        ChartCollectionConfig::default(),
        main.clone(),
        ContainerHandle::new("zoomboxes"),
        reader,
    )
    .expect("collection init");
    (collection, main)
}

/// Rescaled tick positions must equal the unscaled positions moved by `(k, x)`.
fn assert_ticks_follow_transform(collection: &ChartCollection, slot: usize) {
    let transform = collection.transform();
    let scales = collection.instances()[slot].scales();
    let renderer = collection.renderer(slot).expect("renderer");
    let renderer = renderer.borrow();
    let axis = renderer.vector().x_axis().expect("time axis drawn");
    assert!(!axis.ticks.is_empty());
    for tick in &axis.ticks {
        let expected = transform.k * scales.time.map(tick.value) + transform.x;
        assert_abs_diff_eq!(tick.position - PIXEL_OFFSET, expected, epsilon = 1e-6);
    }
    let graphics = &renderer.pixel().graphics;
    assert_eq!(graphics.scale_x, transform.k);
    assert_eq!(graphics.position.0, transform.x);
}

#[test]
fn identity_transform_keeps_ticks_in_place() {
    let (collection, _) = collection(vec![month_series("a")]);
    assert_eq!(collection.transform(), ZoomTransform::IDENTITY);
    assert_ticks_follow_transform(&collection, 0);
}

#[test]
fn max_zoom_moves_ticks_affinely_for_every_chart() {
    let (mut collection, _) = collection(vec![month_series("a"), month_series("b")]);
    collection
        .zoom_surface_mut()
        .scale_to(100.0, Some((565.0, 75.0)))
        .expect("zoom");

    assert_eq!(collection.transform().k, 100.0);
    for slot in 0..2 {
        assert_ticks_follow_transform(&collection, slot);
        let renderer = collection.renderer(slot).expect("renderer");
        assert_eq!(renderer.borrow().draw_count(), 2);
    }
}

#[test]
fn zoom_beyond_the_extent_is_clamped() {
    let (mut collection, _) = collection(vec![month_series("a")]);
    collection
        .zoom_surface_mut()
        .scale_to(200.0, None)
        .expect("zoom");
    assert_eq!(collection.transform().k, 100.0);
    assert_ticks_follow_transform(&collection, 0);

    collection
        .zoom_surface_mut()
        .scale_to(0.25, None)
        .expect("zoom");
    assert_eq!(collection.transform(), ZoomTransform::IDENTITY);
    assert_ticks_follow_transform(&collection, 0);
}

#[test]
fn pan_keeps_the_content_inside_the_translate_extent() {
    let (mut collection, _) = collection(vec![month_series("a")]);
    let zoom = collection.zoom_surface_mut();
    zoom.scale_to(4.0, Some((0.0, 0.0))).expect("zoom");
    zoom.pan_start((100.0, 10.0));
    zoom.pan_move((-10_000.0, 10.0)).expect("pan");
    zoom.pan_end();

    let width = ChartLayout::default().content_width();
    let transform = collection.transform();
    assert_abs_diff_eq!(transform.x, -(4.0 - 1.0) * width, epsilon = 1e-9);
    assert_ticks_follow_transform(&collection, 0);
}

#[test]
fn repeated_draws_are_idempotent() {
    let (mut collection, _) = collection(vec![month_series("a")]);
    collection
        .zoom_surface_mut()
        .set_transform(ZoomTransform::new(3.0, -200.0, 0.0))
        .expect("transform");
    let renderer = collection.renderer(0).expect("renderer");
    let once = renderer.borrow().compose_frame();
    let axis_once = renderer.borrow().vector().x_axis().cloned();

    let scales = collection.instances()[0].scales();
    let transform = collection.transform();
    for _ in 0..3 {
        renderer
            .borrow_mut()
            .draw(transform, scales.time, scales.value);
    }

    assert_eq!(renderer.borrow().compose_frame(), once);
    assert_eq!(renderer.borrow().vector().x_axis().cloned(), axis_once);
}

#[test]
fn pixel_layer_y_position_ignores_transform_y() {
    let (mut collection, _) = collection(vec![month_series("a")]);
    collection
        .zoom_surface_mut()
        .set_transform(ZoomTransform::new(2.0, -100.0, -40.0))
        .expect("transform");
    let renderer = collection.renderer(0).expect("renderer");
    assert_eq!(
        renderer.borrow().pixel().graphics.position.1,
        PIXEL_LINE_OFFSET_Y
    );
}

#[test]
fn each_overlay_tracks_its_own_anchor() {
    let (collection, main) = collection(vec![month_series("a"), month_series("b")]);
    let layout = ChartLayout::default();

    for slot in 0..2 {
        let renderer = collection.renderer(slot).expect("renderer");
        let anchor = main
            .child_rect(SurfaceKey::vector(slot))
            .expect("vector surface attached");
        let overlay = renderer.borrow().overlay_rect().expect("overlay resolved");
        assert_eq!(
            overlay,
            Rect::new(
                anchor.x + layout.margin.left,
                anchor.y + layout.margin.top,
                layout.content_width(),
                layout.content_height(),
            )
        );
    }

    let second = collection.renderer(1).expect("renderer");
    assert_eq!(
        second.borrow().overlay_rect().map(|rect| rect.y),
        Some(layout.outer_height() + layout.margin.top)
    );
}
