//! Patient portal front-end for WebAssembly: uploads, assistant chat, booking and toasts.

#[cfg(target_arch = "wasm32")]
mod bindings;
#[cfg(target_arch = "wasm32")]
mod host;
#[cfg(target_arch = "wasm32")]
mod styles;
#[cfg(target_arch = "wasm32")]
mod view;

#[cfg(target_arch = "wasm32")]
pub use bindings::{mount_portal, PortalHandle};

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_portal(
    _: &str,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "portal-ui only supports the wasm32 target",
    ))
}
