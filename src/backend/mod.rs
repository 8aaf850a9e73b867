//! ## Backends
//!
//! A backend hands out fresh drawing surfaces and forwards web font
//! requests. **Letters** provides two of them:
//!
//! - [`CanvasBackend`]: draws on an offscreen HTML `<canvas>` through the
//!   Canvas 2D API. Fonts are loaded by the browser from the web font
//!   service. Only works in the browser.
//!
//! - [`RasterBackend`]: draws into a [tiny-skia] pixmap with glyph outlines
//!   from locally installed fonts. Works anywhere, which makes it the
//!   backend for native hosts and tests.
//!
//! [tiny-skia]: https://github.com/linebender/tiny-skia
//!
//! ## Backend Comparison
//!
//! | Feature                     | CanvasBackend | RasterBackend   |
//! |-----------------------------|---------------|-----------------|
//! | **Runs natively**           | ✗             | ✓               |
//! | **Web fonts**               | ✓¹            | ✗               |
//! | **System fonts**            | ✓             | ✓               |
//! | **Font shaping/kerning**    | ✓             | ✗               |
//! | **Deterministic output**    | Per browser   | Per font set    |
//!
//! ¹: Best effort. Nothing waits for the font to finish loading.
//!
//! [`CanvasBackend`]: canvas::CanvasBackend
//! [`RasterBackend`]: raster::RasterBackend

use crate::error::Error;

/// Canvas backend.
pub mod canvas;

/// Software raster backend.
#[cfg(feature = "raster")]
pub mod raster;

/// CSS value parsing for the raster backend.
#[cfg(feature = "raster")]
mod style;

/// Event listener management.
pub(crate) mod event_callback;

/// A source of drawing surfaces.
pub trait Backend {
    /// The surface type handed out by [`Backend::create_surface`].
    type Surface: DrawingSurface;

    /// Points the font loader at the given stylesheet URL.
    ///
    /// This does not wait for the font to be available.
    fn load_font(&mut self, href: &str) -> Result<(), Error>;

    /// Creates a new, blank surface of the given size in pixels.
    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, Error>;
}

/// A 2D drawing surface with canvas-like semantics.
///
/// Styles are CSS strings. Like the Canvas 2D API, a surface ignores a
/// fill style or font it cannot parse and keeps the previous one.
pub trait DrawingSurface {
    /// Sets the fill style used by subsequent fills.
    fn set_fill_style(&mut self, style: &str);

    /// Fills a rectangle with the current fill style.
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);

    /// Sets the vertical text anchor (e.g. `middle`).
    fn set_text_baseline(&mut self, baseline: &str);

    /// Sets the horizontal text anchor (e.g. `center`).
    fn set_text_align(&mut self, align: &str);

    /// Sets the CSS font shorthand (e.g. `100pt Georgia`).
    fn set_font(&mut self, font: &str);

    /// Draws `text` anchored at `(x, y)`.
    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Error>;

    /// Serializes the surface as a PNG data URL.
    fn to_data_url(&self) -> Result<String, Error>;
}
