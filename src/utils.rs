use web_sys::{wasm_bindgen::JsCast, window, Document, Element};

use crate::error::Error;

/// Installs a panic hook that forwards panic messages to the browser
/// console.
pub fn set_panic_hook() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
}

/// Returns the current document.
pub fn get_document() -> Result<Document, Error> {
    window()
        .ok_or(Error::UnableToRetrieveWindow)?
        .document()
        .ok_or(Error::UnableToRetrieveDocument)
}

/// Returns the element with the given ID, cast to `T`.
///
/// `kind` names `T` in the error when the cast fails.
pub fn get_element_by_id_as<T: JsCast>(
    document: &Document,
    id: &str,
    kind: &'static str,
) -> Result<T, Error> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| Error::UnableToRetrieveElement(id.to_string()))?
        .dyn_into::<T>()
        .map_err(|_: Element| Error::UnexpectedElementType {
            id: id.to_string(),
            expected: kind,
        })
}
