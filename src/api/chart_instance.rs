use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::trace;

use crate::core::{
    ChartLayout, ChartScales, ScaleState, SeriesChannel, TimeSeries, ZoomTransform, build_scales,
};
use crate::error::{ChartError, ChartResult};
use crate::reactive::{SignalReader, Subscription};
use crate::render::{ChartRenderer, ContainerHandle, RendererInit};

use super::SharedRenderer;

/// Inputs binding one series channel to one pooled renderer.
#[derive(Debug, Clone, Copy)]
pub struct ChartInstanceArgs<'a> {
    pub renderer: &'a SharedRenderer,
    pub main_container: &'a ContainerHandle,
    pub overlay_container: &'a ContainerHandle,
    pub slot: usize,
    pub layout: ChartLayout,
    pub series: &'a TimeSeries,
    pub channel: SeriesChannel,
    pub title: &'a str,
    /// Replaces the series unit when present and non-empty.
    pub unit_override: Option<&'a str>,
    pub transform: &'a SignalReader<ZoomTransform>,
}

/// One live chart: a series channel, its scales, and the redraw subscription
/// that keeps its renderer in step with the shared transform.
///
/// The renderer is borrowed from the pool, never owned. Dropping the instance
/// disposes its subscription.
#[derive(Debug)]
pub struct ChartInstance {
    slot: usize,
    channel: SeriesChannel,
    title: String,
    unit: String,
    scale_state: ScaleState,
    renderer: Weak<RefCell<ChartRenderer>>,
    subscription: Option<Subscription>,
}

impl ChartInstance {
    pub fn new(args: ChartInstanceArgs<'_>) -> ChartResult<Self> {
        let ChartInstanceArgs {
            renderer,
            main_container,
            overlay_container,
            slot,
            layout,
            series,
            channel,
            title,
            unit_override,
            transform,
        } = args;

        let unit = unit_override
            .filter(|unit| !unit.is_empty())
            .unwrap_or(series.unit());
        let values = series.channel(channel);
        // Last pass's line goes even when this series fails to scale.
        renderer.borrow_mut().clear();
        let scale_state = build_scales(series.time_period_start(), values, layout)?;
        let scales = scale_state.scales();

        renderer.borrow_mut().init(RendererInit {
            main_container,
            overlay_container,
            slot,
            time_period_start: series.time_period_start(),
            values,
            title,
            unit,
            scales,
        });

        let mut instance = Self {
            slot,
            channel,
            title: title.to_owned(),
            unit: unit.to_owned(),
            scale_state,
            renderer: Rc::downgrade(renderer),
            subscription: None,
        };
        if scale_state.is_degenerate() {
            trace!(slot, "degenerate chart instance: no redraw subscription");
            return Ok(instance);
        }

        redraw(&instance.renderer, *transform.get(), scales)?;
        let weak = instance.renderer.clone();
        instance.subscription = Some(
            transform.subscribe(move |transform: &ZoomTransform| redraw(&weak, *transform, scales)),
        );
        Ok(instance)
    }

    #[must_use]
    pub fn slot(&self) -> usize {
        self.slot
    }

    #[must_use]
    pub fn channel(&self) -> SeriesChannel {
        self.channel
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn unit(&self) -> &str {
        &self.unit
    }

    #[must_use]
    pub fn scale_state(&self) -> ScaleState {
        self.scale_state
    }

    #[must_use]
    pub fn scales(&self) -> ChartScales {
        self.scale_state.scales()
    }

    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.scale_state.is_degenerate()
    }

    #[must_use]
    pub fn is_subscribed(&self) -> bool {
        self.subscription
            .as_ref()
            .is_some_and(Subscription::is_active)
    }

    #[must_use]
    pub fn renderer(&self) -> Option<SharedRenderer> {
        self.renderer.upgrade()
    }

    /// Stops redrawing on transform changes. The work happens in the
    /// subscription's `Drop`; this only consumes the instance.
    pub fn dispose(self) {}
}

fn redraw(
    renderer: &Weak<RefCell<ChartRenderer>>,
    transform: ZoomTransform,
    scales: ChartScales,
) -> ChartResult<()> {
    // The pool outlives its instances; a dead renderer means the collection is gone.
    let Some(renderer) = renderer.upgrade() else {
        return Ok(());
    };
    let mut renderer = renderer.try_borrow_mut().map_err(|_| {
        ChartError::InvalidData("renderer redrawn while already borrowed".to_owned())
    })?;
    renderer.draw(transform, scales.time, scales.value);
    Ok(())
}
