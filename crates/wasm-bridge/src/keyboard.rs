//! Window-level keydown listener
//!
//! The listener stays registered for as long as the [`KeyListener`] lives;
//! dropping it removes the callback from the window.

use plotboard_shared::{KeyEvent, PlotboardError, PlotboardResult};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub fn key_event(event: &web_sys::KeyboardEvent) -> KeyEvent {
    KeyEvent {
        key: event.key(),
        ctrl_key: event.ctrl_key(),
        shift_key: event.shift_key(),
        alt_key: event.alt_key(),
        meta_key: event.meta_key(),
    }
}

pub struct KeyListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::KeyboardEvent)>,
}

impl KeyListener {
    pub fn attach(handler: impl FnMut(KeyEvent) + 'static) -> PlotboardResult<Self> {
        let window = web_sys::window().ok_or_else(|| PlotboardError::JsInterop {
            message: "No window available for keyboard listener".to_string(),
        })?;

        let mut handler = handler;
        let callback = Closure::<dyn FnMut(web_sys::KeyboardEvent)>::new(
            move |event: web_sys::KeyboardEvent| handler(key_event(&event)),
        );

        window.add_event_listener_with_callback("keydown", callback.as_ref().unchecked_ref())?;
        log::debug!("Keyboard listener attached");

        Ok(Self { window, callback })
    }
}

impl Drop for KeyListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("keydown", self.callback.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove keyboard listener: {e:?}");
        } else {
            log::debug!("Keyboard listener removed");
        }
    }
}
