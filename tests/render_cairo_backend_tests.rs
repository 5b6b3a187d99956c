#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use datechart::ChartError;
use datechart::api::{ChartCollection, ChartCollectionConfig};
use datechart::core::TimeSeries;
use datechart::reactive::signal;
use datechart::render::{CairoContextRenderer, CairoRenderer, ContainerHandle};

const DAY: f64 = 86_400_000.0;

fn collection() -> ChartCollection {
    let series = TimeSeries::new(
        "Electricity",
        "kWh",
        vec![0.0, DAY, 2.0 * DAY],
        vec![10.0, 20.0, 15.0],
    )
    .expect("aligned series");
    let (_writer, reader) = signal(vec![series]);
    ChartCollection::new(
        ChartCollectionConfig::default(),
        ContainerHandle::new("charts"),
        ContainerHandle::new("zoomboxes"),
        reader,
    )
    .expect("collection init")
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 300).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_every_layer() {
    let collection = collection();
    let viewport = collection.config().layout.outer_viewport();
    let mut renderer =
        CairoRenderer::new(viewport.width as i32, viewport.height as i32).expect("renderer");

    collection.render_all(&mut renderer).expect("render");
    let stats = renderer.last_stats();
    let frame = &collection.compose_frames()[0];

    assert_eq!(stats.rects_drawn, 1);
    assert_eq!(stats.lines_drawn, frame.lines.len());
    assert_eq!(stats.texts_drawn, frame.texts.len());
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let collection = collection();
    let frame = collection.compose_frames().remove(0);
    let mut renderer = CairoRenderer::new(1280, 300).expect("renderer");

    let surface = ImageSurface::create(Format::ARgb32, 1280, 300).expect("surface");
    let context = Context::new(&surface).expect("context");
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("external context render");
    assert_eq!(renderer.last_stats().texts_drawn, frame.texts.len());
}
