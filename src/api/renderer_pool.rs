use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::core::ChartLayout;
use crate::render::{ChartRenderer, ChartStyle};

pub type SharedRenderer = Rc<RefCell<ChartRenderer>>;

/// Slot-addressed arena of renderers.
///
/// Grows on demand and never shrinks: renderer `i` belongs to slot `i` for the
/// lifetime of the pool.
#[derive(Debug)]
pub struct RendererPool {
    layout: ChartLayout,
    style: ChartStyle,
    renderers: Vec<SharedRenderer>,
}

impl RendererPool {
    #[must_use]
    pub fn new(layout: ChartLayout, style: ChartStyle) -> Self {
        Self {
            layout,
            style,
            renderers: Vec::new(),
        }
    }

    /// Returns the renderer for `slot`, growing the pool up to it if needed.
    pub fn acquire(&mut self, slot: usize) -> SharedRenderer {
        if slot >= self.renderers.len() {
            let before = self.renderers.len();
            let (layout, style) = (self.layout, self.style);
            self.renderers.resize_with(slot + 1, || {
                Rc::new(RefCell::new(ChartRenderer::new(layout, style)))
            });
            debug!(from = before, to = self.renderers.len(), "renderer pool grew");
        }
        Rc::clone(&self.renderers[slot])
    }

    #[must_use]
    pub fn get(&self, slot: usize) -> Option<SharedRenderer> {
        self.renderers.get(slot).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.renderers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renderers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SharedRenderer> {
        self.renderers.iter()
    }
}
