#![cfg(target_arch = "wasm32")]

use portal_core::{PortalConfig, PortalConfigPatch};
use portal_engine::{Outcome, PortalController};
use serde_wasm_bindgen::from_value;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, Window};

use crate::host::{scroll_to_section, PortalHost};
use crate::view::{PortalView, PortalViewProps};

type Operation = fn(&mut PortalController) -> Outcome;

const GLOBAL_OPERATIONS: [(&str, Operation); 6] = [
    ("toggleChatbot", PortalController::toggle_chatbot),
    ("openChatbot", PortalController::open_chatbot),
    ("closeChatbot", PortalController::close_chatbot),
    ("startVideoCall", PortalController::start_video_call),
    ("endVideoCall", PortalController::end_video_call),
    ("showBooking", PortalController::show_booking),
];

/// Entry points of a mounted portal, for inline event attributes on the host page.
#[wasm_bindgen]
pub struct PortalHandle {
    host: PortalHost,
}

#[wasm_bindgen]
impl PortalHandle {
    #[wasm_bindgen(js_name = toggleChatbot)]
    pub fn toggle_chatbot(&self) {
        self.host.dispatch(PortalController::toggle_chatbot);
    }

    #[wasm_bindgen(js_name = openChatbot)]
    pub fn open_chatbot(&self) {
        self.host.dispatch(PortalController::open_chatbot);
    }

    #[wasm_bindgen(js_name = closeChatbot)]
    pub fn close_chatbot(&self) {
        self.host.dispatch(PortalController::close_chatbot);
    }

    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self) {
        self.host.submit_chat();
    }

    #[wasm_bindgen(js_name = quickMessage)]
    pub fn quick_message(&self, message: &str) {
        self.host
            .dispatch(|controller| controller.quick_message(message));
    }

    #[wasm_bindgen(js_name = startVideoCall)]
    pub fn start_video_call(&self) {
        self.host.dispatch(PortalController::start_video_call);
    }

    #[wasm_bindgen(js_name = endVideoCall)]
    pub fn end_video_call(&self) {
        self.host.dispatch(PortalController::end_video_call);
    }

    #[wasm_bindgen(js_name = showBooking)]
    pub fn show_booking(&self) {
        self.host.dispatch(PortalController::show_booking);
    }

    /// Publish the entry points as `window.toggleChatbot()` and friends.
    #[wasm_bindgen(js_name = installGlobals)]
    pub fn install_globals(&self) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;

        for (name, operation) in GLOBAL_OPERATIONS {
            let host = self.host.clone();
            let callback = Closure::<dyn Fn()>::new(move || host.dispatch(operation));
            publish(&window, name, callback.as_ref())?;
            callback.forget();
        }

        let host = self.host.clone();
        let send = Closure::<dyn Fn()>::new(move || host.submit_chat());
        publish(&window, "sendMessage", send.as_ref())?;
        send.forget();

        let host = self.host.clone();
        let quick = Closure::<dyn Fn(String)>::new(move |message: String| {
            host.dispatch(|controller| controller.quick_message(&message))
        });
        publish(&window, "quickMessage", quick.as_ref())?;
        quick.forget();

        Ok(())
    }
}

/// Render the portal into the element matched by `selector`.
#[wasm_bindgen]
pub fn mount_portal(selector: &str, config: Option<JsValue>) -> Result<PortalHandle, JsValue> {
    _ = console_log::init_with_level(log::Level::Info);
    console_error_panic_hook::set_once();

    let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("No window"))?;
    let document: Document = window
        .document()
        .ok_or_else(|| JsValue::from_str("Document is not accessible"))?;

    let target: Element = document
        .query_selector(selector)
        .map_err(|err| JsValue::from_str(&format!("Invalid selector: {err:?}")))?
        .ok_or_else(|| JsValue::from_str("No element matches the selector"))?;

    let config = match config {
        Some(js_cfg) => PortalConfig::from(from_value::<PortalConfigPatch>(js_cfg)?),
        None => PortalConfig::default(),
    };

    let host = PortalHost::new(config);
    install_anchor_scrolling(&document)?;

    yew::Renderer::<PortalView>::with_root_and_props(
        target,
        PortalViewProps { host: host.clone() },
    )
    .render();
    log::info!("portal mounted on {selector}");

    Ok(PortalHandle { host })
}

fn publish(window: &Window, name: &str, callback: &JsValue) -> Result<(), JsValue> {
    js_sys::Reflect::set(window, &JsValue::from_str(name), callback)?;
    Ok(())
}

/// Smooth scrolling for in-page anchors already on the host page.
fn install_anchor_scrolling(document: &Document) -> Result<(), JsValue> {
    let anchors = document.query_selector_all("a[href^=\"#\"]")?;

    for index in 0..anchors.length() {
        let Some(anchor) = anchors
            .item(index)
            .and_then(|node| node.dyn_into::<Element>().ok())
        else {
            continue;
        };
        let target = anchor
            .get_attribute("href")
            .unwrap_or_default()
            .trim_start_matches('#')
            .to_string();
        if target.is_empty() {
            continue;
        }

        let handler = Closure::<dyn Fn(Event)>::new(move |event: Event| {
            event.prevent_default();
            scroll_to_section(&target);
        });
        anchor.add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())?;
        handler.forget();
    }

    Ok(())
}
