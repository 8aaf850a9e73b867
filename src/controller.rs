use std::{cell::RefCell, rc::Rc};

use rand::Rng;

use crate::{
    backend::Backend,
    error::Error,
    picker::ColorPicker,
    random::{random_hex_color_with, random_string_with},
    render::{RenderParams, Renderer},
};

/// Refresh callback shared with the picker listeners.
type RefreshCallback = Rc<RefCell<Option<Box<dyn FnMut()>>>>;

/// Options for the [`LettersController`].
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    /// The ID of the text color picker element.
    text_color_id: String,
    /// The ID of the background color picker element.
    bg_color_id: String,
    /// The font family.
    font: String,
    /// The font size.
    font_size: f64,
    /// The font size units.
    font_size_units: String,
    /// The background opacity.
    alpha: f64,
    /// The image size in pixels.
    size: (u32, u32),
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            text_color_id: "textColorId".to_string(),
            bg_color_id: "bgColorId".to_string(),
            font: "Georgia".to_string(),
            font_size: 100.0,
            font_size_units: "pt".to_string(),
            alpha: 1.0,
            size: (250, 250),
        }
    }
}

impl ControllerOptions {
    /// Constructs a new [`ControllerOptions`].
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the element IDs of the text and background color pickers.
    pub fn picker_ids(mut self, text_color_id: &str, bg_color_id: &str) -> Self {
        self.text_color_id = text_color_id.to_string();
        self.bg_color_id = bg_color_id.to_string();
        self
    }

    /// Sets the initial font family.
    pub fn font(mut self, font: &str) -> Self {
        self.font = font.to_string();
        self
    }

    /// Sets the initial font size and its units.
    pub fn font_size(mut self, size: f64, units: &str) -> Self {
        self.font_size = size;
        self.font_size_units = units.to_string();
        self
    }

    /// Sets the initial background opacity.
    pub fn alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the image size, in pixels.
    pub fn size(mut self, size: (u32, u32)) -> Self {
        self.size = size;
        self
    }
}

/// State edited through the page.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    /// The text to draw.
    pub text: String,
    /// The text color as 6 hex digits.
    pub text_color: String,
    /// The background color as 6 hex digits.
    pub bg_color: String,
    /// The background opacity.
    pub alpha: f64,
    /// The font family.
    pub font: String,
    /// The font size.
    pub font_size: f64,
    /// The font size units.
    pub font_size_units: String,
    /// The image width in pixels.
    pub width: u32,
    /// The image height in pixels.
    pub height: u32,
    /// The horizontal text anchor.
    pub x_offset: f64,
    /// The vertical text anchor.
    pub y_offset: f64,
}

impl UiState {
    /// Seeds the text and colors from `rng`; everything else comes from
    /// `options`. The text is centered.
    pub fn new<R: Rng>(options: &ControllerOptions, rng: &mut R) -> Self {
        let (width, height) = options.size;
        Self {
            text: random_string_with(rng),
            text_color: random_hex_color_with(rng),
            bg_color: random_hex_color_with(rng),
            alpha: options.alpha,
            font: options.font.clone(),
            font_size: options.font_size,
            font_size_units: options.font_size_units.clone(),
            width,
            height,
            x_offset: width as f64 / 2.0,
            y_offset: height as f64 / 2.0,
        }
    }

    /// Returns the render parameters for this state.
    pub fn render_params(&self) -> RenderParams {
        RenderParams::new()
            .font(&self.font)
            .font_size(self.font_size, &self.font_size_units)
            .text(&self.text)
            .text_color(&self.text_color)
            .bg_color(&self.bg_color)
            .alpha(self.alpha)
            .size(self.width, self.height)
            .offset(self.x_offset, self.y_offset)
    }
}

/// Owns the page state and turns it into images.
///
/// The two color pickers write their changes into the state and then call
/// the refresh callback registered with [`LettersController::on_refresh`].
pub struct LettersController<B: Backend, P: ColorPicker> {
    /// Page state.
    state: Rc<RefCell<UiState>>,
    /// Renderer.
    renderer: Renderer<B>,
    /// Text color picker.
    text_color_picker: P,
    /// Background color picker.
    bg_color_picker: P,
    /// Called after a picker changed the state.
    refresh: RefreshCallback,
}

impl<B: Backend, P: ColorPicker> LettersController<B, P> {
    /// Constructs a new [`LettersController`] with random text and colors.
    pub fn new(renderer: Renderer<B>, options: ControllerOptions) -> Result<Self, Error> {
        Self::with_rng(renderer, options, &mut rand::rng())
    }

    /// Constructs a new [`LettersController`], seeding the random text and
    /// colors from `rng`.
    pub fn with_rng<R: Rng>(
        renderer: Renderer<B>,
        options: ControllerOptions,
        rng: &mut R,
    ) -> Result<Self, Error> {
        let state = UiState::new(&options, rng);
        let mut text_color_picker = P::bind(&options.text_color_id, &state.text_color)?;
        let mut bg_color_picker = P::bind(&options.bg_color_id, &state.bg_color)?;

        let state = Rc::new(RefCell::new(state));
        let refresh: RefreshCallback = Rc::new(RefCell::new(None));
        text_color_picker.on_change(picker_listener(&state, &refresh, |state, color| {
            state.text_color = color;
        }))?;
        bg_color_picker.on_change(picker_listener(&state, &refresh, |state, color| {
            state.bg_color = color;
        }))?;

        Ok(Self {
            state,
            renderer,
            text_color_picker,
            bg_color_picker,
            refresh,
        })
    }

    /// Registers the callback to run after a picker changed the state.
    ///
    /// It replaces any previous callback.
    pub fn on_refresh<F>(&mut self, callback: F)
    where
        F: FnMut() + 'static,
    {
        *self.refresh.borrow_mut() = Some(Box::new(callback));
    }

    /// Returns a snapshot of the state.
    pub fn state(&self) -> UiState {
        self.state.borrow().clone()
    }

    /// Sets the text.
    pub fn set_text(&mut self, text: &str) {
        self.state.borrow_mut().text = text.to_string();
    }

    /// Sets the font family.
    pub fn set_font(&mut self, font: &str) {
        self.state.borrow_mut().font = font.to_string();
    }

    /// Sets the font size and its units.
    pub fn set_font_size(&mut self, size: f64, units: &str) {
        let mut state = self.state.borrow_mut();
        state.font_size = size;
        state.font_size_units = units.to_string();
    }

    /// Sets the background opacity.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.state.borrow_mut().alpha = alpha;
    }

    /// Sets the image size. The text anchor is left where it is.
    pub fn set_size(&mut self, width: u32, height: u32) {
        let mut state = self.state.borrow_mut();
        state.width = width;
        state.height = height;
    }

    /// Sets the text anchor.
    pub fn set_offsets(&mut self, x: f64, y: f64) {
        let mut state = self.state.borrow_mut();
        state.x_offset = x;
        state.y_offset = y;
    }

    /// Returns the text color picker.
    pub fn text_color_picker(&mut self) -> &mut P {
        &mut self.text_color_picker
    }

    /// Returns the background color picker.
    pub fn bg_color_picker(&mut self) -> &mut P {
        &mut self.bg_color_picker
    }

    /// Returns the renderer.
    pub fn renderer(&self) -> &Renderer<B> {
        &self.renderer
    }

    /// Renders the current state and returns the PNG data URL.
    ///
    /// Colors are read from the pickers rather than from the state.
    pub fn get_data_url(&mut self) -> Result<String, Error> {
        let mut params = self.state.borrow().render_params();
        params.text_color = Some(self.text_color_picker.value()?);
        params.bg_color = Some(self.bg_color_picker.value()?);
        self.renderer.render_text(&params)
    }
}

impl<B, P> std::fmt::Debug for LettersController<B, P>
where
    B: Backend + std::fmt::Debug,
    P: ColorPicker + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LettersController")
            .field("state", &self.state)
            .field("renderer", &self.renderer)
            .field("text_color_picker", &self.text_color_picker)
            .field("bg_color_picker", &self.bg_color_picker)
            .finish()
    }
}

/// Builds a picker listener that updates the state, then refreshes.
fn picker_listener(
    state: &Rc<RefCell<UiState>>,
    refresh: &RefreshCallback,
    update: impl Fn(&mut UiState, String) + 'static,
) -> impl FnMut(String) + 'static {
    let state = Rc::downgrade(state);
    let refresh = refresh.clone();
    move |color| {
        let Some(state) = state.upgrade() else {
            return;
        };
        update(&mut state.borrow_mut(), color);
        if let Some(refresh) = refresh.borrow_mut().as_mut() {
            refresh();
        }
    }
}

#[cfg(feature = "raster")]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        backend::raster::{RasterBackend, PNG_DATA_URL_PREFIX},
        picker::MemoryColorPicker,
    };
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use rand::{rngs::StdRng, SeedableRng};

    type Controller = LettersController<RasterBackend, MemoryColorPicker>;

    fn controller(seed: u64) -> Controller {
        LettersController::with_rng(
            Renderer::new(RasterBackend::with_database(fontdb::Database::new())),
            ControllerOptions::default(),
            &mut StdRng::seed_from_u64(seed),
        )
        .unwrap()
    }

    #[test]
    fn test_initial_state() {
        let mut controller = controller(1);
        let state = controller.state();
        assert_eq!(state.text.len(), 2);
        assert!(state.text.starts_with(|c: char| c.is_ascii_uppercase()));
        assert!(state.text.ends_with(|c: char| c.is_ascii_lowercase()));
        assert_eq!(state.text_color.len(), 6);
        assert_eq!(state.bg_color.len(), 6);
        assert_eq!(state.alpha, 1.0);
        assert_eq!(state.font, "Georgia");
        assert_eq!((state.font_size, state.font_size_units.as_str()), (100.0, "pt"));
        assert_eq!((state.width, state.height), (250, 250));
        assert_eq!((state.x_offset, state.y_offset), (125.0, 125.0));

        assert_eq!(controller.text_color_picker().id(), "textColorId");
        assert_eq!(controller.text_color_picker().value().unwrap(), state.text_color);
        assert_eq!(controller.bg_color_picker().id(), "bgColorId");
        assert_eq!(controller.bg_color_picker().value().unwrap(), state.bg_color);
    }

    #[test]
    fn test_same_seed_same_state() {
        assert_eq!(controller(9).state(), controller(9).state());
    }

    #[test]
    fn test_options() {
        let options = ControllerOptions::new()
            .picker_ids("fg", "bg")
            .font("Lobster")
            .font_size(12.0, "px")
            .alpha(0.25)
            .size((100, 40));
        let mut controller: Controller = LettersController::with_rng(
            Renderer::new(RasterBackend::with_database(fontdb::Database::new())),
            options,
            &mut StdRng::seed_from_u64(0),
        )
        .unwrap();
        let state = controller.state();
        assert_eq!(state.font, "Lobster");
        assert_eq!((state.font_size, state.font_size_units.as_str()), (12.0, "px"));
        assert_eq!(state.alpha, 0.25);
        assert_eq!((state.x_offset, state.y_offset), (50.0, 20.0));
        assert_eq!(controller.text_color_picker().id(), "fg");
        assert_eq!(controller.bg_color_picker().id(), "bg");
    }

    #[test]
    fn test_picker_change_updates_state_and_refreshes() {
        let mut controller = controller(2);
        let refreshes = Rc::new(RefCell::new(0));
        controller.on_refresh({
            let refreshes = refreshes.clone();
            move || *refreshes.borrow_mut() += 1
        });

        controller.text_color_picker().pick("ABCDEF");
        assert_eq!(controller.state().text_color, "ABCDEF");
        controller.bg_color_picker().pick("#012345");
        assert_eq!(controller.state().bg_color, "012345");
        assert_eq!(*refreshes.borrow(), 2);

        // Setters do not refresh.
        controller.set_text("Yo");
        assert_eq!(*refreshes.borrow(), 2);
    }

    #[test]
    fn test_get_data_url_reads_pickers() {
        let mut controller = controller(3);
        controller.set_size(4, 4);
        controller.set_offsets(2.0, 2.0);
        controller.set_alpha(1.0);
        // Programmatic picker changes bypass the state.
        controller.bg_color_picker().set_color("FF00AB").unwrap();
        assert_ne!(controller.state().bg_color, "FF00AB");

        let url = controller.get_data_url().unwrap();
        let png = STANDARD
            .decode(url.strip_prefix(PNG_DATA_URL_PREFIX).unwrap())
            .unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        let pixel = pixmap.pixel(0, 0).unwrap();
        assert_eq!(
            (pixel.red(), pixel.green(), pixel.blue(), pixel.alpha()),
            (255, 0, 171, 255)
        );
    }

    #[test]
    fn test_get_data_url_is_deterministic() {
        let mut controller: Controller = LettersController::with_rng(
            Renderer::new(RasterBackend::new()),
            ControllerOptions::default(),
            &mut StdRng::seed_from_u64(4),
        )
        .unwrap();
        controller.set_text("Hi");
        controller.set_font("Georgia");
        controller.set_font_size(100.0, "pt");
        controller.text_color_picker().pick("FFFFFF");
        controller.bg_color_picker().pick("112233");

        let first = controller.get_data_url().unwrap();
        let second = controller.get_data_url().unwrap();
        assert!(first.starts_with(PNG_DATA_URL_PREFIX));
        assert_eq!(first, second);

        // The real render comes last and requests the chosen font.
        assert_eq!(
            controller.renderer().backend().last_font_request(),
            Some("https://fonts.googleapis.com/css?family=Georgia")
        );
    }
}
