use std::cell::{Ref, RefCell};
use std::rc::{Rc, Weak};

use indexmap::IndexMap;
use tracing::{debug, trace, warn};

use crate::core::{SeriesChannel, TimeSeries, ZoomTransform};
use crate::error::{ChartError, ChartResult};
use crate::interaction::ZoomSurface;
use crate::reactive::{SignalReader, Subscription};
use crate::render::{ContainerHandle, RenderFrame, Renderer};

use super::{
    ChartCollectionConfig, ChartInstance, ChartInstanceArgs, ChartSnapshot, CollectionSnapshot,
    RendererPool, SharedRenderer,
};

/// State rebuilt on every series write; shared with the series subscription.
#[derive(Debug)]
struct CollectionState {
    config: ChartCollectionConfig,
    main_container: ContainerHandle,
    overlay_container: ContainerHandle,
    transform: SignalReader<ZoomTransform>,
    pool: RendererPool,
    instances: Vec<ChartInstance>,
    active_slots: usize,
    passes: u64,
}

impl CollectionState {
    /// One render pass: dispose every live instance, then bind each series
    /// (and its cost channel, if any) to consecutive slots.
    ///
    /// A failed bind ends the pass early. Charts bound before it stay live and
    /// every slot from the failing one onward is cleared.
    fn rebuild(&mut self, series: &[TimeSeries]) -> ChartResult<()> {
        // Old subscriptions must be gone before any new one is installed.
        self.instances.clear();

        let outcome = self.bind_all(series);
        let bound = self.instances.len();

        for stale in bound..self.pool.len() {
            if let Some(renderer) = self.pool.get(stale) {
                renderer.borrow_mut().clear();
                trace!(slot = stale, "cleared stale renderer");
            }
        }

        if bound < self.active_slots {
            debug!(
                previous = self.active_slots,
                current = bound,
                "fewer slots than previous pass"
            );
        }
        self.active_slots = bound;
        outcome?;

        self.passes += 1;
        debug!(
            pass = self.passes,
            series = series.len(),
            slots = bound,
            pool = self.pool.len(),
            "chart collection rebuilt"
        );
        Ok(())
    }

    fn bind_all(&mut self, series: &[TimeSeries]) -> ChartResult<()> {
        let mut slot = 0;
        for timeseries in series {
            self.bind(slot, timeseries, SeriesChannel::Value)?;
            slot += 1;
            if timeseries.has_cost() {
                self.bind(slot, timeseries, SeriesChannel::Cost)?;
                slot += 1;
            }
        }
        Ok(())
    }

    fn bind(&mut self, slot: usize, series: &TimeSeries, channel: SeriesChannel) -> ChartResult<()> {
        let renderer = self.pool.acquire(slot);
        let unit_override = match channel {
            SeriesChannel::Value => None,
            SeriesChannel::Cost => Some(self.config.cost_unit_label.as_str()),
        };
        let instance = ChartInstance::new(ChartInstanceArgs {
            renderer: &renderer,
            main_container: &self.main_container,
            overlay_container: &self.overlay_container,
            slot,
            layout: self.config.layout,
            series,
            channel,
            title: series.title(),
            unit_override,
            transform: &self.transform,
        })
        .inspect_err(|err| warn!(slot, error = %err, "chart construction failed"))?;
        self.instances.push(instance);
        Ok(())
    }
}

/// Every chart for the currently loaded series, kept in lockstep under one
/// shared pan/zoom transform.
///
/// Owns the renderer pool, the zoom surface (the transform's only writer) and
/// the live chart instances. Each write to the series signal runs a full
/// rebuild before the write returns.
#[derive(Debug)]
pub struct ChartCollection {
    state: Rc<RefCell<CollectionState>>,
    zoom: ZoomSurface,
    series: SignalReader<Vec<TimeSeries>>,
    _series_subscription: Subscription,
}

impl ChartCollection {
    pub fn new(
        config: ChartCollectionConfig,
        main_container: ContainerHandle,
        overlay_container: ContainerHandle,
        series: SignalReader<Vec<TimeSeries>>,
    ) -> ChartResult<Self> {
        config.validate()?;
        let zoom = ZoomSurface::new(config.zoom, config.layout.content_rect())?;
        let state = Rc::new(RefCell::new(CollectionState {
            pool: RendererPool::new(config.layout, config.style),
            config,
            main_container,
            overlay_container,
            transform: zoom.reader(),
            instances: Vec::new(),
            active_slots: 0,
            passes: 0,
        }));

        state.borrow_mut().rebuild(&series.get())?;

        let weak = Rc::downgrade(&state);
        let subscription = series.subscribe(move |series: &Vec<TimeSeries>| {
            rebuild_shared(&weak, series)
        });

        Ok(Self {
            state,
            zoom,
            series,
            _series_subscription: subscription,
        })
    }

    /// Runs a pass over the current series value without a new write.
    pub fn refresh(&self) -> ChartResult<()> {
        let series = self.series.get();
        self.state.borrow_mut().rebuild(&series)
    }

    #[must_use]
    pub fn zoom_surface(&self) -> &ZoomSurface {
        &self.zoom
    }

    pub fn zoom_surface_mut(&mut self) -> &mut ZoomSurface {
        &mut self.zoom
    }

    #[must_use]
    pub fn transform(&self) -> ZoomTransform {
        self.zoom.transform()
    }

    #[must_use]
    pub fn transform_reader(&self) -> SignalReader<ZoomTransform> {
        self.zoom.reader()
    }

    /// Live instances in slot order.
    #[must_use]
    pub fn instances(&self) -> Ref<'_, [ChartInstance]> {
        Ref::map(self.state.borrow(), |state| state.instances.as_slice())
    }

    #[must_use]
    pub fn instance_count(&self) -> usize {
        self.state.borrow().instances.len()
    }

    #[must_use]
    pub fn active_slots(&self) -> usize {
        self.state.borrow().active_slots
    }

    #[must_use]
    pub fn pool_len(&self) -> usize {
        self.state.borrow().pool.len()
    }

    #[must_use]
    pub fn passes(&self) -> u64 {
        self.state.borrow().passes
    }

    #[must_use]
    pub fn renderer(&self, slot: usize) -> Option<SharedRenderer> {
        self.state.borrow().pool.get(slot)
    }

    #[must_use]
    pub fn config(&self) -> ChartCollectionConfig {
        self.state.borrow().config.clone()
    }

    /// Composed frames of the active slots, in slot order.
    #[must_use]
    pub fn compose_frames(&self) -> Vec<RenderFrame> {
        let state = self.state.borrow();
        (0..state.active_slots)
            .filter_map(|slot| state.pool.get(slot))
            .map(|renderer| renderer.borrow().compose_frame())
            .collect()
    }

    pub fn render_all<R: Renderer>(&self, backend: &mut R) -> ChartResult<()> {
        for frame in self.compose_frames() {
            backend.render(&frame)?;
        }
        Ok(())
    }

    #[must_use]
    pub fn snapshot(&self) -> CollectionSnapshot {
        let state = self.state.borrow();
        let charts: IndexMap<usize, ChartSnapshot> = state
            .instances
            .iter()
            .map(|instance| {
                let scales = instance.scales();
                let renderer = instance.renderer();
                let renderer = renderer.as_ref().map(|renderer| renderer.borrow());
                let snapshot = ChartSnapshot {
                    slot: instance.slot(),
                    channel: instance.channel(),
                    title: instance.title().to_owned(),
                    unit: instance.unit().to_owned(),
                    degenerate: instance.is_degenerate(),
                    subscribed: instance.is_subscribed(),
                    time_domain: scales.time.domain(),
                    value_domain: scales.value.domain(),
                    path_commands: renderer
                        .as_ref()
                        .map_or(0, |renderer| renderer.pixel().graphics.commands.len()),
                    draw_count: renderer.as_ref().map_or(0, |renderer| renderer.draw_count()),
                    overlay_rect: renderer.as_ref().and_then(|renderer| renderer.overlay_rect()),
                };
                (instance.slot(), snapshot)
            })
            .collect();

        CollectionSnapshot {
            layout: state.config.layout,
            transform: self.zoom.transform(),
            pool_len: state.pool.len(),
            passes: state.passes,
            charts,
        }
    }
}

fn rebuild_shared(state: &Weak<RefCell<CollectionState>>, series: &[TimeSeries]) -> ChartResult<()> {
    let Some(state) = state.upgrade() else {
        return Ok(());
    };
    let mut state = state.try_borrow_mut().map_err(|_| {
        ChartError::InvalidData("chart collection rebuilt while already borrowed".to_owned())
    })?;
    state.rebuild(series)
}
