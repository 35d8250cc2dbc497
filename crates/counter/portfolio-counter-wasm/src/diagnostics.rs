//! Page-global error logging. Observational only: nothing is retried or
//! suppressed.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{ErrorEvent, Event, PromiseRejectionEvent, Window};

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// `error` and `unhandledrejection` listeners on the window, removed on drop.
pub struct GlobalErrorLog {
    window: Window,
    on_error: Closure<dyn FnMut(Event)>,
    on_rejection: Closure<dyn FnMut(PromiseRejectionEvent)>,
}

impl GlobalErrorLog {
    pub fn install(window: &Window) -> Result<Self, JsValue> {
        let on_error = Closure::<dyn FnMut(Event)>::new(|e: Event| match e.dyn_ref::<ErrorEvent>() {
            Some(e) => log::error!(
                "JavaScript error: {} ({}:{}:{}) {}",
                e.message(),
                e.filename(),
                e.lineno(),
                e.colno(),
                describe(&e.error())
            ),
            None => log::error!("JavaScript error event: {}", e.type_()),
        });
        let on_rejection =
            Closure::<dyn FnMut(PromiseRejectionEvent)>::new(|e: PromiseRejectionEvent| {
                log::error!("Unhandled promise rejection: {}", describe(&e.reason()));
            });

        window.add_event_listener_with_callback("error", on_error.as_ref().unchecked_ref())?;
        window.add_event_listener_with_callback(
            "unhandledrejection",
            on_rejection.as_ref().unchecked_ref(),
        )?;

        Ok(Self {
            window: window.clone(),
            on_error,
            on_rejection,
        })
    }
}

impl Drop for GlobalErrorLog {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("error", self.on_error.as_ref().unchecked_ref());
        let _ = self.window.remove_event_listener_with_callback(
            "unhandledrejection",
            self.on_rejection.as_ref().unchecked_ref(),
        );
    }
}
