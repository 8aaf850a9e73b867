use web_sys::wasm_bindgen::JsValue;

/// Error type.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to retrieve the window.
    #[error("Unable to retrieve the window")]
    UnableToRetrieveWindow,

    /// Unable to retrieve the document.
    #[error("Unable to retrieve the document")]
    UnableToRetrieveDocument,

    /// Unable to retrieve an element by its ID.
    #[error("Unable to retrieve element with id `{0}`")]
    UnableToRetrieveElement(String),

    /// An element was found but is not of the expected kind.
    #[error("Element `{id}` is not a {expected}")]
    UnexpectedElementType {
        /// The element ID.
        id: String,
        /// The expected element kind.
        expected: &'static str,
    },

    /// Unable to retrieve the 2D canvas context.
    #[error("Unable to retrieve the canvas context")]
    UnableToRetrieveCanvasContext,

    /// The drawing surface could not be allocated.
    #[error("Unable to create a {0}x{1} drawing surface")]
    UnableToCreateSurface(u32, u32),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Png(String),

    /// JavaScript error.
    #[error("JavaScript error: {0}")]
    Js(String),
}

impl From<JsValue> for Error {
    fn from(value: JsValue) -> Self {
        Self::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}
