use serde::{Deserialize, Serialize};

use crate::core::Viewport;
use crate::error::{ChartError, ChartResult};
use crate::render::{LinePrimitive, RectPrimitive, TextPrimitive};

/// Draw layers in back-to-front order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerKind {
    Grid,
    Volume,
    Candles,
    Trends,
    Axis,
    Selection,
    Overlay,
}

impl LayerKind {
    pub const ORDER: [LayerKind; 7] = [
        LayerKind::Grid,
        LayerKind::Volume,
        LayerKind::Candles,
        LayerKind::Trends,
        LayerKind::Axis,
        LayerKind::Selection,
        LayerKind::Overlay,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderLayer {
    pub kind: LayerKind,
    pub lines: Vec<LinePrimitive>,
    pub rects: Vec<RectPrimitive>,
    pub texts: Vec<TextPrimitive>,
}

impl RenderLayer {
    fn empty(kind: LayerKind) -> Self {
        Self {
            kind,
            lines: Vec::new(),
            rects: Vec::new(),
            texts: Vec::new(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.rects.is_empty() && self.texts.is_empty()
    }
}

/// Backend-agnostic scene for one chart draw pass.
///
/// Primitives in the `Volume`, `Candles`, `Trends` and `Selection` layers must
/// be clipped by the backend to `plot_clip`.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub viewport: Viewport,
    pub plot_clip: RectPrimitive,
    pub layers: Vec<RenderLayer>,
}

impl RenderFrame {
    #[must_use]
    pub fn new(viewport: Viewport, plot_clip: RectPrimitive) -> Self {
        Self {
            viewport,
            plot_clip,
            layers: LayerKind::ORDER.into_iter().map(RenderLayer::empty).collect(),
        }
    }

    #[must_use]
    pub fn layer(&self, kind: LayerKind) -> Option<&RenderLayer> {
        self.layers.iter().find(|layer| layer.kind == kind)
    }

    fn layer_mut(&mut self, kind: LayerKind) -> &mut RenderLayer {
        if let Some(index) = self.layers.iter().position(|layer| layer.kind == kind) {
            return &mut self.layers[index];
        }
        self.layers.push(RenderLayer::empty(kind));
        let last = self.layers.len() - 1;
        &mut self.layers[last]
    }

    pub fn push_line(&mut self, kind: LayerKind, line: LinePrimitive) {
        self.layer_mut(kind).lines.push(line);
    }

    pub fn push_rect(&mut self, kind: LayerKind, rect: RectPrimitive) {
        self.layer_mut(kind).rects.push(rect);
    }

    pub fn push_text(&mut self, kind: LayerKind, text: TextPrimitive) {
        self.layer_mut(kind).texts.push(text);
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.lines.len()).sum()
    }

    #[must_use]
    pub fn rect_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.rects.len()).sum()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.layers.iter().map(|layer| layer.texts.len()).sum()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.viewport.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.viewport.width,
                height: self.viewport.height,
            });
        }
        self.plot_clip.validate()?;

        for layer in &self.layers {
            for line in &layer.lines {
                line.validate()?;
            }
            for rect in &layer.rects {
                rect.validate()?;
            }
            for text in &layer.texts {
                text.validate()?;
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.iter().all(RenderLayer::is_empty)
    }
}
