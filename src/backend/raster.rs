use std::rc::Rc;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use fontdb::{Database, Family, Query};
use tiny_skia::{ColorU8, FillRule, Paint, Path, PathBuilder, Pixmap, Rect, Transform};
use ttf_parser::{Face, GlyphId, OutlineBuilder};

use crate::{
    backend::{
        style::{parse_color, parse_font, Font, TextAlign, TextBaseline},
        Backend, DrawingSurface,
    },
    error::Error,
};

/// Prefix of a PNG data URL.
pub const PNG_DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// The data URL of a surface with no pixels, as browsers produce it.
pub const EMPTY_DATA_URL: &str = "data:,";

/// Software raster backend.
///
/// Draws with [`tiny_skia`] and takes glyph outlines from the fonts in its
/// [`fontdb::Database`]. Web font requests cannot be honored natively; like
/// the single font `<link>` in a page, only the latest one is kept.
#[derive(Debug, Clone)]
pub struct RasterBackend {
    /// Fonts available to the surfaces.
    fonts: Rc<Database>,
    /// The last stylesheet URL passed to [`Backend::load_font`].
    last_font_request: Option<String>,
}

impl Default for RasterBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl RasterBackend {
    /// Constructs a new [`RasterBackend`] with the system fonts.
    pub fn new() -> Self {
        let mut fonts = Database::new();
        fonts.load_system_fonts();
        log::info!("Loaded {} system fonts", fonts.len());
        Self::with_database(fonts)
    }

    /// Constructs a new [`RasterBackend`] with the given fonts only.
    pub fn with_database(fonts: Database) -> Self {
        Self {
            fonts: Rc::new(fonts),
            last_font_request: None,
        }
    }

    /// Adds a font from TrueType/OpenType data.
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        Rc::make_mut(&mut self.fonts).load_font_data(data);
    }

    /// Returns the number of font faces available.
    pub fn font_count(&self) -> usize {
        self.fonts.len()
    }

    /// Returns the most recently requested stylesheet URL.
    pub fn last_font_request(&self) -> Option<&str> {
        self.last_font_request.as_deref()
    }
}

impl Backend for RasterBackend {
    type Surface = RasterSurface;

    fn load_font(&mut self, href: &str) -> Result<(), Error> {
        log::debug!("font stylesheet requested: {href}");
        self.last_font_request = Some(href.to_string());
        Ok(())
    }

    fn create_surface(&mut self, width: u32, height: u32) -> Result<Self::Surface, Error> {
        let pixmap = if width == 0 || height == 0 {
            None
        } else {
            Some(Pixmap::new(width, height).ok_or(Error::UnableToCreateSurface(width, height))?)
        };
        Ok(RasterSurface {
            pixmap,
            fill: ColorU8::from_rgba(0, 0, 0, 255),
            font: Font {
                size_px: 10.0,
                families: vec!["sans-serif".to_string()],
            },
            baseline: TextBaseline::default(),
            align: TextAlign::default(),
            fonts: self.fonts.clone(),
        })
    }
}

/// A pixmap with canvas-like drawing state.
///
/// It starts out transparent, with a black fill and a `10px sans-serif`
/// font.
#[derive(Debug)]
pub struct RasterSurface {
    /// Pixels, or `None` for an empty surface.
    pixmap: Option<Pixmap>,
    /// Current fill color.
    fill: ColorU8,
    /// Current font.
    font: Font,
    /// Current vertical text anchor.
    baseline: TextBaseline,
    /// Current horizontal text anchor.
    align: TextAlign,
    /// Fonts to draw text with.
    fonts: Rc<Database>,
}

impl RasterSurface {
    /// Returns the pixels, or `None` if the surface is empty.
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.pixmap.as_ref()
    }

    fn paint(&self) -> Paint<'static> {
        let mut paint = Paint::default();
        paint.set_color_rgba8(
            self.fill.red(),
            self.fill.green(),
            self.fill.blue(),
            self.fill.alpha(),
        );
        paint.anti_alias = true;
        paint
    }

    /// Picks the face for the current font, falling back to sans-serif and
    /// then to any face at all.
    fn query_face(&self) -> Option<fontdb::ID> {
        let mut families: Vec<Family> = self
            .font
            .families
            .iter()
            .map(|family| match family.to_ascii_lowercase().as_str() {
                "serif" => Family::Serif,
                "sans-serif" => Family::SansSerif,
                "cursive" => Family::Cursive,
                "fantasy" => Family::Fantasy,
                "monospace" => Family::Monospace,
                _ => Family::Name(family.as_str()),
            })
            .collect();
        families.push(Family::SansSerif);
        self.fonts
            .query(&Query {
                families: &families,
                ..Query::default()
            })
            .or_else(|| self.fonts.faces().next().map(|face| face.id))
    }

    fn text_path(&self, text: &str, x: f32, y: f32) -> Option<Path> {
        let Some(id) = self.query_face() else {
            log::warn!("no font face available for {:?}", self.font.families);
            return None;
        };
        self.fonts
            .with_face_data(id, |data, index| {
                let face = Face::parse(data, index)
                    .map_err(|e| log::warn!("unable to parse font face: {e}"))
                    .ok()?;
                outline_text(&face, text, self.font.size_px, (x, y), self.align, self.baseline)
            })
            .flatten()
    }
}

/// Lays `text` out on a single line and returns its outline.
fn outline_text(
    face: &Face,
    text: &str,
    size_px: f32,
    (x, y): (f32, f32),
    align: TextAlign,
    baseline: TextBaseline,
) -> Option<Path> {
    let scale = size_px / face.units_per_em() as f32;
    let glyphs: Vec<GlyphId> = text
        .chars()
        .map(|c| face.glyph_index(c).unwrap_or(GlyphId(0)))
        .collect();
    let advance = |glyph: GlyphId| face.glyph_hor_advance(glyph).unwrap_or(0) as f32 * scale;
    let width: f32 = glyphs.iter().copied().map(advance).sum();

    let ascent = face.ascender() as f32 * scale;
    let descent = face.descender() as f32 * scale;
    let baseline_y = y + match baseline {
        TextBaseline::Top | TextBaseline::Hanging => ascent,
        TextBaseline::Middle => (ascent + descent) / 2.0,
        TextBaseline::Alphabetic => 0.0,
        TextBaseline::Ideographic | TextBaseline::Bottom => descent,
    };

    let mut outline = GlyphOutline {
        path: PathBuilder::new(),
        scale,
        origin: (x - align.offset(width), baseline_y),
    };
    for glyph in glyphs {
        face.outline_glyph(glyph, &mut outline);
        outline.origin.0 += advance(glyph);
    }
    outline.path.finish()
}

/// Converts font-unit glyph outlines into pixel space.
struct GlyphOutline {
    path: PathBuilder,
    scale: f32,
    /// Pen position on the baseline.
    origin: (f32, f32),
}

impl GlyphOutline {
    fn point(&self, x: f32, y: f32) -> (f32, f32) {
        (self.origin.0 + x * self.scale, self.origin.1 - y * self.scale)
    }
}

impl OutlineBuilder for GlyphOutline {
    fn move_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.path.move_to(x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let (x, y) = self.point(x, y);
        self.path.line_to(x, y);
    }

    fn quad_to(&mut self, x1: f32, y1: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x, y) = self.point(x, y);
        self.path.quad_to(x1, y1, x, y);
    }

    fn curve_to(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, x: f32, y: f32) {
        let (x1, y1) = self.point(x1, y1);
        let (x2, y2) = self.point(x2, y2);
        let (x, y) = self.point(x, y);
        self.path.cubic_to(x1, y1, x2, y2, x, y);
    }

    fn close(&mut self) {
        self.path.close();
    }
}

impl DrawingSurface for RasterSurface {
    fn set_fill_style(&mut self, style: &str) {
        match parse_color(style) {
            Some(color) => self.fill = color,
            None => log::trace!("ignoring fill style `{style}`"),
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let paint = self.paint();
        let (Some(pixmap), Some(rect)) = (
            self.pixmap.as_mut(),
            Rect::from_xywh(x as f32, y as f32, width as f32, height as f32),
        ) else {
            return;
        };
        pixmap.fill_rect(rect, &paint, Transform::identity(), None);
    }

    fn set_text_baseline(&mut self, baseline: &str) {
        if let Some(baseline) = TextBaseline::parse(baseline) {
            self.baseline = baseline;
        }
    }

    fn set_text_align(&mut self, align: &str) {
        if let Some(align) = TextAlign::parse(align) {
            self.align = align;
        }
    }

    fn set_font(&mut self, font: &str) {
        match parse_font(font) {
            Some(font) => self.font = font,
            None => log::trace!("ignoring font `{font}`"),
        }
    }

    fn fill_text(&mut self, text: &str, x: f64, y: f64) -> Result<(), Error> {
        if text.is_empty() || self.pixmap.is_none() {
            return Ok(());
        }
        let Some(path) = self.text_path(text, x as f32, y as f32) else {
            return Ok(());
        };
        let paint = self.paint();
        if let Some(pixmap) = self.pixmap.as_mut() {
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
        Ok(())
    }

    fn to_data_url(&self) -> Result<String, Error> {
        let Some(pixmap) = &self.pixmap else {
            return Ok(EMPTY_DATA_URL.to_string());
        };
        let png = pixmap.encode_png().map_err(|e| Error::Png(e.to_string()))?;
        Ok(format!("{PNG_DATA_URL_PREFIX}{}", STANDARD.encode(png)))
    }
}
