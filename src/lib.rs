#![warn(missing_docs, clippy::unwrap_used)]
#![doc = include_str!("../README.md")]

/// Custom error type.
pub mod error;

/// Random text, colors and fonts.
pub mod random;

/// Color conversion.
pub mod color;

/// Web font helpers.
pub mod fonts;

/// Drawing backends.
pub mod backend;

/// Color pickers.
pub mod picker;

/// Page state and its binding to the pickers.
pub mod controller;

/// Browser console logging.
pub mod logging;

/// Web utility functions.
pub mod utils;

/// Rendering.
mod render;

// Re-export web_sys crate.
pub use web_sys;

pub use backend::{
    canvas::{CanvasBackend, CanvasBackendOptions},
    Backend, DrawingSurface,
};
#[cfg(feature = "raster")]
pub use backend::raster::RasterBackend;
pub use controller::{ControllerOptions, LettersController, UiState};
pub use error::Error;
pub use picker::{ColorPicker, InputColorPicker, MemoryColorPicker};
pub use render::{RenderParams, Renderer};
