//! Browser tests. Run with `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use std::{cell::RefCell, rc::Rc};

use letters::{
    web_sys::{wasm_bindgen::JsCast, window, Event, HtmlInputElement, HtmlLinkElement},
    CanvasBackend, CanvasBackendOptions, ColorPicker, ControllerOptions, InputColorPicker,
    LettersController, RenderParams, Renderer,
};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn add_input(id: &str, type_: &str) -> HtmlInputElement {
    let document = window().unwrap().document().unwrap();
    if let Some(existing) = document.get_element_by_id(id) {
        existing.remove();
    }
    let input = document
        .create_element("input")
        .unwrap()
        .unchecked_into::<HtmlInputElement>();
    input.set_id(id);
    input.set_type(type_);
    document.body().unwrap().append_child(&input).unwrap();
    input
}

#[wasm_bindgen_test]
fn render_small_canvas() {
    let mut renderer = Renderer::new(CanvasBackend::new().unwrap());
    let url = renderer
        .render_text_helper(
            &RenderParams::new()
                .size(10, 10)
                .bg_color("112233")
                .alpha(1.0)
                .text_color("FFFFFF")
                .text("")
                .font("Arial")
                .font_size(10.0, "pt")
                .offset(5.0, 5.0),
        )
        .unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert!(url.len() > "data:image/png;base64,".len());
}

#[wasm_bindgen_test]
fn font_link_is_created_and_updated() {
    let mut renderer = Renderer::new(CanvasBackend::new().unwrap());
    renderer
        .render_text_helper(&RenderParams::new().font("Lily Script One"))
        .unwrap();
    let link = window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id("fontLink")
        .unwrap()
        .unchecked_into::<HtmlLinkElement>();
    assert_eq!(
        link.href(),
        "https://fonts.googleapis.com/css?family=Lily+Script+One"
    );
}

#[wasm_bindgen_test]
fn custom_font_link_id_is_used() {
    let options = CanvasBackendOptions::new().font_link_id("customFontLink");
    let mut renderer = Renderer::new(CanvasBackend::new_with_options(options).unwrap());
    renderer
        .render_text_helper(&RenderParams::new().font("Lobster"))
        .unwrap();
    let link = window()
        .unwrap()
        .document()
        .unwrap()
        .get_element_by_id("customFontLink")
        .unwrap()
        .unchecked_into::<HtmlLinkElement>();
    assert_eq!(link.href(), "https://fonts.googleapis.com/css?family=Lobster");
}

#[wasm_bindgen_test]
fn logger_installs_once() {
    // Another test in this binary may have installed it already.
    let _ = letters::logging::init(log::Level::Debug);
    assert!(letters::logging::init(log::Level::Debug).is_err());
    log::debug!("logger installed");
}

#[wasm_bindgen_test]
fn input_picker_reads_element_value() {
    let input = add_input("pickerTest", "color");
    let mut picker = InputColorPicker::bind("pickerTest", "FF00AB").unwrap();
    assert_eq!(input.value(), "#ff00ab");
    assert_eq!(picker.value().unwrap(), "ff00ab");

    input.set_value("#123456");
    assert_eq!(picker.value().unwrap(), "123456");

    picker.set_color("ABCDEF").unwrap();
    assert_eq!(input.value(), "#abcdef");
}

#[wasm_bindgen_test]
fn controller_renders_identically_twice() {
    add_input("textColorId", "text");
    add_input("bgColorId", "text");
    let mut controller: LettersController<CanvasBackend, InputColorPicker> =
        LettersController::new(
            Renderer::new(CanvasBackend::new().unwrap()),
            ControllerOptions::new(),
        )
        .unwrap();
    controller.set_text("Hi");
    controller.text_color_picker().set_color("FFFFFF").unwrap();
    controller.bg_color_picker().set_color("112233").unwrap();

    let first = controller.get_data_url().unwrap();
    let second = controller.get_data_url().unwrap();
    assert!(first.starts_with("data:image/png;base64,"));
    assert_eq!(first, second);
}

#[wasm_bindgen_test]
fn input_picker_stops_listening_after_drop() {
    let input = add_input("dropTest", "text");
    let mut picker = InputColorPicker::bind("dropTest", "000000").unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    picker
        .on_change({
            let seen = seen.clone();
            move |color| seen.borrow_mut().push(color)
        })
        .unwrap();

    input.set_value("#00FF00");
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(*seen.borrow(), vec!["00FF00".to_string()]);

    drop(picker);
    input.set_value("#0000FF");
    input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(seen.borrow().len(), 1);
}

#[wasm_bindgen_test]
fn picker_input_updates_state_and_refreshes() {
    add_input("textColorId", "text");
    add_input("bgColorId", "text");
    let mut controller: LettersController<CanvasBackend, InputColorPicker> =
        LettersController::new(
            Renderer::new(CanvasBackend::new().unwrap()),
            ControllerOptions::new(),
        )
        .unwrap();
    let refreshes = Rc::new(RefCell::new(0));
    controller.on_refresh({
        let refreshes = refreshes.clone();
        move || *refreshes.borrow_mut() += 1
    });

    let bg_input = controller.bg_color_picker().element().clone();
    bg_input.set_value("ABCDEF");
    bg_input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(controller.state().bg_color, "ABCDEF");
    assert_eq!(*refreshes.borrow(), 1);

    drop(controller);
    bg_input.set_value("FEDCBA");
    bg_input.dispatch_event(&Event::new("input").unwrap()).unwrap();
    assert_eq!(*refreshes.borrow(), 1);
}
