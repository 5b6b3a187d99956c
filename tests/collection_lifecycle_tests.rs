use std::rc::Rc;

use datechart::api::{ChartCollection, ChartCollectionConfig};
use datechart::core::TimeSeries;
use datechart::error::{ChartError, ScaleAxis};
use datechart::reactive::signal;
use datechart::render::{ContainerHandle, SurfaceKey};

const DAY: f64 = 86_400_000.0;

fn series(title: &str, points: usize) -> TimeSeries {
    let times = (0..points).map(|i| i as f64 * DAY).collect();
    let values = (0..points).map(|i| i as f64 + 1.0).collect();
    TimeSeries::new(title, "kWh", times, values).expect("aligned series")
}

fn with_cost(series: TimeSeries) -> TimeSeries {
    let cost = vec![0.5; series.len()];
    series.with_cost(cost).expect("aligned cost")
}

fn containers() -> (ContainerHandle, ContainerHandle) {
    (
        ContainerHandle::new("charts"),
        ContainerHandle::new("zoomboxes"),
    )
}

#[test]
fn renderers_are_reused_across_passes() {
    let (mut writer, reader) = signal(vec![series("a", 3)]);
    let (main, overlay) = containers();
    let collection =
        ChartCollection::new(ChartCollectionConfig::default(), main.clone(), overlay, reader)
            .expect("collection init");
    let first = collection.renderer(0).expect("slot 0");

    writer.set(vec![series("b", 5)]).expect("rebuild");
    let second = collection.renderer(0).expect("slot 0");

    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(collection.pool_len(), 1);
    assert_eq!(main.len(), 1);
    assert_eq!(collection.instances()[0].title(), "b");
    assert_eq!(second.borrow().pixel().graphics.commands.len(), 6);
}

#[test]
fn pool_grows_to_the_largest_pass_and_never_shrinks() {
    let (mut writer, reader) = signal(vec![series("a", 3)]);
    let (main, overlay) = containers();
    let collection =
        ChartCollection::new(ChartCollectionConfig::default(), main.clone(), overlay.clone(), reader)
            .expect("collection init");
    assert_eq!(collection.pool_len(), 1);

    writer
        .set(vec![with_cost(series("a", 3)), series("b", 3), series("c", 3)])
        .expect("rebuild");
    assert_eq!(collection.pool_len(), 4);
    assert_eq!(collection.active_slots(), 4);

    writer.set(vec![series("a", 3)]).expect("rebuild");
    assert_eq!(collection.pool_len(), 4);
    assert_eq!(collection.active_slots(), 1);
    assert_eq!(collection.instance_count(), 1);

    // Stale slots stay attached but hold no geometry.
    assert_eq!(main.len(), 4);
    assert_eq!(overlay.len(), 4);
    for slot in 1..4 {
        let renderer = collection.renderer(slot).expect("stale renderer");
        assert!(renderer.borrow().pixel().graphics.is_empty());
        assert!(main.contains(SurfaceKey::vector(slot)));
    }
    assert_eq!(collection.compose_frames().len(), 1);
}

#[test]
fn rebuild_disposes_previous_subscriptions() {
    let (mut writer, reader) = signal(vec![series("a", 3), series("b", 3)]);
    let (main, overlay) = containers();
    let mut collection =
        ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader)
            .expect("collection init");
    let transform = collection.transform_reader();
    assert_eq!(transform.subscriber_count(), 2);

    writer.set(vec![series("a", 3)]).expect("rebuild");
    assert_eq!(transform.subscriber_count(), 1);

    let dropped_slot = collection.renderer(1).expect("renderer");
    let draws_before = dropped_slot.borrow().draw_count();
    collection
        .zoom_surface_mut()
        .scale_by(2.0, None)
        .expect("zoom");
    assert_eq!(dropped_slot.borrow().draw_count(), draws_before);

    let live = collection.renderer(0).expect("renderer");
    assert_eq!(live.borrow().draw_count(), 3);
    assert!(collection.instances()[0].is_subscribed());
}

#[test]
fn same_slot_rebuild_fires_exactly_one_redraw_per_transform() {
    let (mut writer, reader) = signal(vec![series("a", 3)]);
    let (main, overlay) = containers();
    let mut collection =
        ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader)
            .expect("collection init");
    for _ in 0..5 {
        writer.set(vec![series("a", 3)]).expect("rebuild");
    }
    let renderer = collection.renderer(0).expect("renderer");
    let before = renderer.borrow().draw_count();

    collection
        .zoom_surface_mut()
        .scale_by(2.0, None)
        .expect("zoom");
    assert_eq!(renderer.borrow().draw_count(), before + 1);
    assert_eq!(collection.passes(), 6);
}

#[test]
fn invalid_domain_fails_construction() {
    let broken = TimeSeries::new("broken", "kWh", vec![0.0, DAY], vec![f64::NAN, f64::NAN])
        .expect("aligned series");
    let (_writer, reader) = signal(vec![broken]);
    let (main, overlay) = containers();

    let err = ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader)
        .expect_err("no finite value");
    assert!(matches!(
        err,
        ChartError::InvalidDomain {
            axis: ScaleAxis::Value,
            ..
        }
    ));
}

#[test]
fn invalid_domain_propagates_out_of_the_series_write() {
    let (mut writer, reader) = signal(vec![series("a", 3)]);
    let (main, overlay) = containers();
    let collection =
        ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader)
            .expect("collection init");

    let broken = TimeSeries::new("broken", "kWh", vec![f64::NAN, f64::NAN], vec![1.0, 2.0])
        .expect("aligned series");
    let err = writer
        .set(vec![series("ok", 3), broken])
        .expect_err("pass must fail");
    assert!(matches!(
        err,
        ChartError::InvalidDomain {
            axis: ScaleAxis::Time,
            ..
        }
    ));

    // A later good write recovers with a fresh pass.
    writer.set(vec![series("again", 4)]).expect("rebuild");
    assert_eq!(collection.instance_count(), 1);
    assert_eq!(collection.instances()[0].title(), "again");
}

#[test]
fn failed_pass_drops_the_stale_chart_behind_the_error() {
    let (mut writer, reader) = signal(vec![series("a", 3), series("b", 3)]);
    let (main, overlay) = containers();
    let collection =
        ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader)
            .expect("collection init");
    assert_eq!(collection.active_slots(), 2);
    let passes = collection.passes();
    let slot_one = collection.renderer(1).expect("slot 1");
    assert!(!slot_one.borrow().pixel().graphics.is_empty());

    let no_values = TimeSeries::new("b", "kWh", vec![0.0, DAY], vec![f64::NAN, f64::NAN])
        .expect("aligned series");
    let err = writer
        .set(vec![series("a", 3), no_values])
        .expect_err("pass must fail");
    assert!(matches!(
        err,
        ChartError::InvalidDomain {
            axis: ScaleAxis::Value,
            ..
        }
    ));

    assert!(slot_one.borrow().pixel().graphics.is_empty());
    assert!(slot_one.borrow().series_lines().is_empty());
    assert_eq!(collection.instance_count(), 1);
    assert_eq!(collection.active_slots(), 1);
    assert_eq!(collection.compose_frames().len(), 1);
    assert_eq!(collection.passes(), passes);
}

#[test]
fn misaligned_provider_data_is_rejected_up_front() {
    let err = TimeSeries::new("a", "kWh", vec![0.0, DAY], vec![1.0]).expect_err("misaligned");
    assert!(matches!(
        err,
        ChartError::MisalignedSeries {
            field: "values",
            expected: 2,
            actual: 1
        }
    ));
}

#[test]
fn dropping_the_collection_stops_listening_to_series_writes() {
    let (mut writer, reader) = signal(vec![series("a", 3)]);
    let (main, overlay) = containers();
    let collection =
        ChartCollection::new(ChartCollectionConfig::default(), main, overlay, reader.clone())
            .expect("collection init");
    assert_eq!(reader.subscriber_count(), 1);
    drop(collection);
    assert_eq!(reader.subscriber_count(), 0);
    writer.set(vec![series("b", 3)]).expect("no listeners");
}
