//! Color pickers bound to the text and background colors.

use std::fmt::Formatter;

use web_sys::{Event, HtmlInputElement};

use crate::{
    backend::event_callback::{EventCallback, COLOR_INPUT_EVENT_TYPES},
    error::Error,
    utils::{get_document, get_element_by_id_as},
};

/// A color picker widget.
///
/// Colors are 6 hex digits without a leading `#`.
pub trait ColorPicker: Sized {
    /// Binds a picker to the element with the given ID and sets its initial
    /// color.
    fn bind(id: &str, initial_color: &str) -> Result<Self, Error>;

    /// Sets the current color.
    fn set_color(&mut self, color: &str) -> Result<(), Error>;

    /// Returns the current color.
    fn value(&self) -> Result<String, Error>;

    /// Calls `callback` with the new color whenever the user changes it.
    fn on_change<F>(&mut self, callback: F) -> Result<(), Error>
    where
        F: FnMut(String) + 'static;
}

/// Strips the `#` that `<input type="color">` puts in front of its value.
fn normalize(value: &str) -> String {
    value.trim().trim_start_matches('#').to_string()
}

/// Color picker backed by an `<input>` element.
///
/// Works with plain `<input type="color">` as well as text inputs managed
/// by a picker library such as jscolor. The element's value is the source
/// of truth.
#[derive(Debug)]
pub struct InputColorPicker {
    /// The input element.
    input: HtmlInputElement,
    /// Registered change listeners.
    callbacks: Vec<EventCallback<Event>>,
}

impl InputColorPicker {
    /// Returns the bound element.
    pub fn element(&self) -> &HtmlInputElement {
        &self.input
    }
}

impl ColorPicker for InputColorPicker {
    fn bind(id: &str, initial_color: &str) -> Result<Self, Error> {
        let document = get_document()?;
        let input = get_element_by_id_as::<HtmlInputElement>(&document, id, "input")?;
        let mut picker = Self {
            input,
            callbacks: Vec::new(),
        };
        picker.set_color(initial_color)?;
        Ok(picker)
    }

    fn set_color(&mut self, color: &str) -> Result<(), Error> {
        let color = normalize(color);
        if self.input.type_() == "color" {
            // Color inputs only accept lowercase `#rrggbb`.
            self.input.set_value(&format!("#{}", color.to_ascii_lowercase()));
        } else {
            self.input.set_value(&color);
        }
        Ok(())
    }

    fn value(&self) -> Result<String, Error> {
        Ok(normalize(&self.input.value()))
    }

    fn on_change<F>(&mut self, mut callback: F) -> Result<(), Error>
    where
        F: FnMut(String) + 'static,
    {
        let input = self.input.clone();
        self.callbacks.push(EventCallback::new(
            self.input.clone().into(),
            COLOR_INPUT_EVENT_TYPES,
            move |_: Event| callback(normalize(&input.value())),
        )?);
        Ok(())
    }
}

/// Color picker that keeps its color in memory.
///
/// Useful outside the browser. [`MemoryColorPicker::pick`] plays the part
/// of the user.
#[derive(Default)]
pub struct MemoryColorPicker {
    /// The ID the picker was bound to.
    id: String,
    /// Current color.
    color: String,
    /// Change listeners.
    listeners: Vec<Box<dyn FnMut(String)>>,
}

impl MemoryColorPicker {
    /// Returns the ID the picker was bound to.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Changes the color as a user would and notifies the listeners.
    pub fn pick(&mut self, color: &str) {
        self.color = normalize(color);
        for listener in &mut self.listeners {
            listener(self.color.clone());
        }
    }
}

impl std::fmt::Debug for MemoryColorPicker {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryColorPicker")
            .field("id", &self.id)
            .field("color", &self.color)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl ColorPicker for MemoryColorPicker {
    fn bind(id: &str, initial_color: &str) -> Result<Self, Error> {
        Ok(Self {
            id: id.to_string(),
            color: normalize(initial_color),
            listeners: Vec::new(),
        })
    }

    fn set_color(&mut self, color: &str) -> Result<(), Error> {
        self.color = normalize(color);
        Ok(())
    }

    fn value(&self) -> Result<String, Error> {
        Ok(self.color.clone())
    }

    fn on_change<F>(&mut self, callback: F) -> Result<(), Error>
    where
        F: FnMut(String) + 'static,
    {
        self.listeners.push(Box::new(callback));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{cell::RefCell, rc::Rc};

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("#ff00ab"), "ff00ab");
        assert_eq!(normalize(" FF00AB "), "FF00AB");
    }

    #[test]
    fn test_memory_picker_notifies_on_pick() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut picker = MemoryColorPicker::bind("bgColorId", "112233").unwrap();
        assert_eq!(picker.id(), "bgColorId");
        picker
            .on_change({
                let seen = seen.clone();
                move |color| seen.borrow_mut().push(color)
            })
            .unwrap();

        // Programmatic changes are silent.
        picker.set_color("445566").unwrap();
        assert_eq!(picker.value().unwrap(), "445566");
        assert!(seen.borrow().is_empty());

        picker.pick("#AABBCC");
        assert_eq!(picker.value().unwrap(), "AABBCC");
        assert_eq!(*seen.borrow(), ["AABBCC"]);
    }
}
