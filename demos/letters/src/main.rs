use std::{cell::RefCell, rc::Rc};

use letters::{
    utils::{get_document, get_element_by_id_as, set_panic_hook},
    CanvasBackend, ControllerOptions, Error, InputColorPicker, LettersController, Renderer,
};
use web_sys::{
    wasm_bindgen::{prelude::Closure, JsCast},
    HtmlImageElement, HtmlInputElement,
};

type Controller = LettersController<CanvasBackend, InputColorPicker>;

fn main() -> Result<(), Error> {
    set_panic_hook();
    if let Err(e) = letters::logging::init(log::Level::Info) {
        web_sys::console::warn_1(&e.to_string().into());
    }

    let document = get_document()?;
    let output = get_element_by_id_as::<HtmlImageElement>(&document, "output", "img")?;
    let text_input = get_element_by_id_as::<HtmlInputElement>(&document, "textId", "input")?;

    let controller: Rc<RefCell<Controller>> = Rc::new(RefCell::new(LettersController::new(
        Renderer::new(CanvasBackend::new()?),
        ControllerOptions::new(),
    )?));
    text_input.set_value(&controller.borrow().state().text);

    let render = {
        let controller = Rc::downgrade(&controller);
        move || {
            let Some(controller) = controller.upgrade() else {
                return;
            };
            match controller.borrow_mut().get_data_url() {
                Ok(url) => output.set_src(&url),
                Err(e) => log::error!("render failed: {e}"),
            };
        }
    };

    controller.borrow_mut().on_refresh(render.clone());

    let on_text = Closure::<dyn FnMut(_)>::new({
        let controller = controller.clone();
        let text_input = text_input.clone();
        let render = render.clone();
        move |_: web_sys::Event| {
            controller.borrow_mut().set_text(&text_input.value());
            render();
        }
    });
    text_input.add_event_listener_with_callback("input", on_text.as_ref().unchecked_ref())?;
    on_text.forget();

    render();
    Ok(())
}
