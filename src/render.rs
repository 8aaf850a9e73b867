use crate::{
    backend::{Backend, DrawingSurface},
    color::{hex_color_to_rgb, rgb_and_alpha_to_rgba},
    error::Error,
    fonts::{font_href, FONT_SERVICE_URL},
};

/// Fill style used when a color is absent.
///
/// Surfaces reject it and keep their current fill style.
const MISSING_COLOR_STYLE: &str = "#";

/// Parameters of a single render.
///
/// Every field is optional; see [`Renderer::render_text_helper`] for what
/// an absent field means.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderParams {
    /// The text to draw.
    pub text: Option<String>,
    /// The font family name.
    pub font: Option<String>,
    /// The font size, in `font_size_units`.
    pub font_size: Option<f64>,
    /// The font size units (e.g. `pt`).
    pub font_size_units: Option<String>,
    /// The text color as 6 hex digits.
    pub text_color: Option<String>,
    /// The background color as 6 hex digits.
    pub bg_color: Option<String>,
    /// The background opacity, in `[0, 1]`.
    pub alpha: Option<f64>,
    /// The surface width in pixels.
    pub width: Option<u32>,
    /// The surface height in pixels.
    pub height: Option<u32>,
    /// The horizontal text anchor in pixels.
    pub x_offset: Option<f64>,
    /// The vertical text anchor in pixels.
    pub y_offset: Option<f64>,
}

impl RenderParams {
    /// Constructs an empty [`RenderParams`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the text.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the font family.
    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    /// Sets the font size and its units.
    pub fn font_size(mut self, size: f64, units: impl Into<String>) -> Self {
        self.font_size = Some(size);
        self.font_size_units = Some(units.into());
        self
    }

    /// Sets the text color.
    pub fn text_color(mut self, color: impl Into<String>) -> Self {
        self.text_color = Some(color.into());
        self
    }

    /// Sets the background color.
    pub fn bg_color(mut self, color: impl Into<String>) -> Self {
        self.bg_color = Some(color.into());
        self
    }

    /// Sets the background opacity.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = Some(alpha);
        self
    }

    /// Sets the surface size.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Sets the text anchor position.
    pub fn offset(mut self, x: f64, y: f64) -> Self {
        self.x_offset = Some(x);
        self.y_offset = Some(y);
        self
    }

    /// Returns the fill style for the background.
    fn background_style(&self) -> String {
        match &self.bg_color {
            Some(bg_color) => {
                rgb_and_alpha_to_rgba(hex_color_to_rgb(bg_color), self.alpha.unwrap_or(1.0))
            }
            None => MISSING_COLOR_STYLE.to_string(),
        }
    }

    /// Returns the fill style for the text.
    fn text_style(&self) -> String {
        match &self.text_color {
            Some(text_color) => format!("#{text_color}"),
            None => MISSING_COLOR_STYLE.to_string(),
        }
    }

    /// Returns the CSS font shorthand, if there is enough to build one.
    fn css_font(&self) -> Option<String> {
        let size = self.font_size?;
        let font = self.font.as_deref()?;
        let units = self.font_size_units.as_deref().unwrap_or_default();
        Some(format!("{size}{units} {font}"))
    }
}

/// Renders text into PNG data URLs.
#[derive(Debug)]
pub struct Renderer<B: Backend> {
    /// Backend.
    backend: B,
    /// Base URL of the web font service.
    font_service_url: String,
}

impl<B: Backend> Renderer<B> {
    /// Constructs a new [`Renderer`].
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            font_service_url: FONT_SERVICE_URL.to_string(),
        }
    }

    /// Sets the base URL of the web font service.
    pub fn with_font_service_url(mut self, url: &str) -> Self {
        self.font_service_url = url.to_string();
        self
    }

    /// Returns the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Performs a single paint pass and returns the PNG data URL.
    ///
    /// - The font stylesheet for `font` is requested, without waiting.
    /// - A missing `width` or `height` yields an empty surface.
    /// - Without `bg_color` the background is filled with the surface's
    ///   default style. A missing `alpha` is opaque.
    /// - The font is only set when both `font` and `font_size` are present.
    /// - Missing `text` draws nothing; missing offsets are `0`.
    pub fn render_text_helper(&mut self, params: &RenderParams) -> Result<String, Error> {
        log::trace!("rendering {params:?}");
        self.backend
            .load_font(&font_href(&self.font_service_url, params.font.as_deref()))?;

        let width = params.width.unwrap_or(0);
        let height = params.height.unwrap_or(0);
        let mut surface = self.backend.create_surface(width, height)?;

        // Draw the background first.
        surface.set_fill_style(&params.background_style());
        surface.fill_rect(0.0, 0.0, width as f64, height as f64);

        // Draw the text on top.
        surface.set_fill_style(&params.text_style());
        surface.set_text_baseline("middle");
        surface.set_text_align("center");
        if let Some(font) = params.css_font() {
            surface.set_font(&font);
        }
        surface.fill_text(
            params.text.as_deref().unwrap_or_default(),
            params.x_offset.unwrap_or(0.0),
            params.y_offset.unwrap_or(0.0),
        )?;

        surface.to_data_url()
    }

    /// Renders `params` after a fixed sequence of clearing renders.
    ///
    /// The clearing renders (empty, font only, empty, text only, empty)
    /// nudge the browser into dropping stale surface and font state when
    /// renders follow each other quickly. This is best effort: it does not
    /// wait for the web font to load.
    pub fn render_text(&mut self, params: &RenderParams) -> Result<String, Error> {
        let font_only = RenderParams {
            font: params.font.clone(),
            ..Default::default()
        };
        let text_only = RenderParams {
            text: params.text.clone(),
            ..Default::default()
        };
        for clear in [
            RenderParams::default(),
            font_only,
            RenderParams::default(),
            text_only,
            RenderParams::default(),
        ] {
            self.render_text_helper(&clear)?;
        }

        self.render_text_helper(params)
    }
}
