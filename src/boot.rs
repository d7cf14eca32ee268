//! Progress handshake with the loader overlay declared in `index.html`.

use js_sys::{Array, Function, Object, Reflect};
use wasm_bindgen::{JsCast, JsValue};

const LOADER_KEY: &str = "__LOVE_LETTER_BOOT";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum BootPhase {
    Config,
    Mount,
}

impl BootPhase {
    fn label(self) -> &'static str {
        match self {
            BootPhase::Config => "config",
            BootPhase::Mount => "mount",
        }
    }

    fn detail(self) -> &'static str {
        match self {
            BootPhase::Config => "reading role bindings",
            BootPhase::Mount => "rendering letter",
        }
    }
}

pub(crate) fn enter(phase: BootPhase) {
    notify("setPhase", &[phase.label(), phase.detail()]);
}

pub(crate) fn fail(code: &str, message: &str, hint: &str) {
    gloo::console::warn!("boot failed", code, message);
    notify("fail", &[code, message, hint]);
}

pub(crate) fn ready() {
    notify("ready", &[]);
}

fn loader() -> Option<Object> {
    let window = web_sys::window()?;
    Reflect::get(&window, &JsValue::from_str(LOADER_KEY))
        .ok()?
        .dyn_into::<Object>()
        .ok()
}

/// Calls `method` on the loader if the page installed one.
fn notify(method: &str, args: &[&str]) {
    let Some(loader) = loader() else {
        return;
    };
    let Some(callback) = Reflect::get(&loader, &JsValue::from_str(method))
        .ok()
        .and_then(|value| value.dyn_into::<Function>().ok())
    else {
        return;
    };
    let args: Array = args.iter().map(|arg| JsValue::from_str(arg)).collect();
    if let Err(err) = callback.apply(&loader, &args) {
        gloo::console::warn!("boot loader rejected", method, err);
    }
}
