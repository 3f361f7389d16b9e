//! candle-view: candlestick chart viewport and geometry engine.
//!
//! The crate owns the pan/zoom viewport model, per-frame slicing and
//! coordinate mapping, and turns each frame into backend-agnostic draw
//! primitives handed to a [`render::Renderer`].

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartEngine, ChartEngineConfig};
pub use error::{ChartError, ChartResult};
