mod frame;
mod null_renderer;
mod primitives;

pub use frame::{LayerKind, RenderFrame, RenderLayer};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LineCap, LinePrimitive, RectPrimitive, TextHAlign, TextPrimitive};

use crate::error::ChartResult;

/// Contract implemented by any drawing backend.
///
/// Backends receive fully resolved pixel primitives; every layout and
/// coordinate-mapping decision has already been made.
pub trait Renderer {
    fn render(&mut self, frame: &RenderFrame) -> ChartResult<()>;
}
