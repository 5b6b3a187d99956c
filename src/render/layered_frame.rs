use crate::core::Viewport;

use super::{LayerKind, LinePrimitive, RectPrimitive, RenderFrame, TextPrimitive};

#[derive(Debug, Clone, PartialEq)]
pub struct LayerPrimitives {
    pub kind: LayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl LayerPrimitives {
    #[must_use]
    fn empty(kind: LayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    fn extend_into(&self, frame: &mut RenderFrame) {
        frame.lines.extend(self.lines.iter().copied());
        frame.rects.extend(self.rects.iter().copied());
        frame.texts.extend(self.texts.iter().cloned());
    }
}

/// One chart's primitives, grouped by paint layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LayeredRenderFrame {
    pub viewport: Viewport,
    pub layers: Vec<LayerPrimitives>,
}

impl LayeredRenderFrame {
    #[must_use]
    pub fn canonical(viewport: Viewport) -> Self {
        Self {
            viewport,
            layers: LayerKind::CANONICAL
                .into_iter()
                .map(LayerPrimitives::empty)
                .collect(),
        }
    }

    pub fn push_line(&mut self, kind: LayerKind, line: LinePrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.lines.push(line);
        }
    }

    pub fn push_rect(&mut self, kind: LayerKind, rect: RectPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.rects.push(rect);
        }
    }

    pub fn push_text(&mut self, kind: LayerKind, text: TextPrimitive) {
        if let Some(layer) = self.layer_mut(kind) {
            layer.texts.push(text);
        }
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&LayerPrimitives> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    #[must_use]
    pub fn flatten(&self) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            layer.extend_into(&mut frame);
        }
        frame
    }

    /// Flattens only `include_layers`, keeping the canonical paint order.
    #[must_use]
    pub fn flatten_layers(&self, include_layers: &[LayerKind]) -> RenderFrame {
        let mut frame = RenderFrame::new(self.viewport);
        for layer in &self.layers {
            if include_layers.contains(&layer.kind) {
                layer.extend_into(&mut frame);
            }
        }
        frame
    }

    fn layer_mut(&mut self, kind: LayerKind) -> Option<&mut LayerPrimitives> {
        self.layers.iter_mut().find(|layer| layer.kind == kind)
    }
}
