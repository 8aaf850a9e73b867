use web_sys::{
    wasm_bindgen::JsCast, CanvasRenderingContext2d, Document, HtmlCanvasElement,
    HtmlLinkElement,
};

use crate::{
    backend::{Backend, DrawingSurface},
    error::Error,
    utils::{get_document, get_element_by_id_as},
};

/// Default ID of the `<link>` element that loads web fonts.
const FONT_LINK_ID: &str = "fontLink";

/// Options for the [`CanvasBackend`].
#[derive(Debug)]
pub struct CanvasBackendOptions {
    /// The ID of the font `<link>` element.
    font_link_id: String,
}

impl Default for CanvasBackendOptions {
    fn default() -> Self {
        Self {
            font_link_id: FONT_LINK_ID.to_string(),
        }
    }
}

impl CanvasBackendOptions {
    /// Constructs a new [`CanvasBackendOptions`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the ID of the `<link>` element used to load web fonts.
    ///
    /// If no such element exists, one is appended to `<head>`.
    pub fn font_link_id(mut self, id: &str) -> Self {
        self.font_link_id = id.to_string();
        self
    }
}

/// Canvas backend.
///
/// Every surface is a new, detached `<canvas>` element.
#[derive(Debug)]
pub struct CanvasBackend {
    /// Document.
    document: Document,
    /// Font stylesheet link.
    font_link: HtmlLinkElement,
}

impl CanvasBackend {
    /// Constructs a new [`CanvasBackend`].
    pub fn new() -> Result<Self, Error> {
        Self::new_with_options(CanvasBackendOptions::default())
    }

    /// Constructs a new [`CanvasBackend`] with the given options.
    pub fn new_with_options(options: CanvasBackendOptions) -> Result<Self, Error> {
        let document = get_document()?;
        let font_link = match document.get_element_by_id(&options.font_link_id) {
            Some(_) => get_element_by_id_as::<HtmlLinkElement>(
                &document,
                &options.font_link_id,
                "link",
            )?,
            None => create_font_link(&document, &options.font_link_id)?,
        };
        Ok(Self {
            document,
            font_link,
        })
    }
}

/// Appends a stylesheet `<link>` with the given ID to `<head>`.
fn create_font_link(document: &Document, id: &str) -> Result<HtmlLinkElement, Error> {
    log::debug!("creating font link `{id}`");
    let link = document
        .create_element("link")?
        .dyn_into::<HtmlLinkElement>()
        .map_err(|_| Error::UnexpectedElementType {
            id: id.to_string(),
            expected: "link",
        })?;
    link.set_id(id);
    link.set_rel("stylesheet");
    document
        .head()
        .ok_or(Error::UnableToRetrieveElement("head".to_string()))?
        .append_child(&link)?;
    Ok(link)
}

impl Backend for CanvasBackend {
    type Surface = CanvasSurface;

    fn load_font(&mut self, href: &str) -> Result<(), Error> {
        log::debug!("loading font stylesheet {href}");
        self.font_link.set_href(href);
        Ok(())
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, Error> {
        let canvas = self
            .document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::UnableToRetrieveCanvasContext)?;
        canvas.set_width(width);
        canvas.set_height(height);
        let context = canvas
            .get_context("2d")?
            .ok_or(Error::UnableToRetrieveCanvasContext)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::UnableToRetrieveCanvasContext)?;
        Ok(CanvasSurface { canvas, context })
    }
}

/// A detached canvas and its 2D context.
#[derive(Debug)]
pub struct CanvasSurface {
    /// Canvas element.
    canvas: HtmlCanvasElement,
    /// Rendering context.
    context: CanvasRenderingContext2d,
}

impl DrawingSurface for CanvasSurface {
    fn set_fill_style(&mut self, style: &str) {
        self.context.set_fill_style_str(style);
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.context.fill_rect(x, y, width, height);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        self.context.set_text_baseline(baseline);
    }

    fn set_text_align(&mut self, align: &str) {
        self.context.set_text_align(align);
    }

    fn set_font(&mut self, font: &str) {
        self.context.set_font(font);
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Error> {
        self.context.fill_text(text, x, y)?;
        Ok(())
    }

    fn to_data_url(&self) -> Result<String, Error> {
        Ok(self.canvas.to_data_url_with_type("image/png")?)
    }
}
