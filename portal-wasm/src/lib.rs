//! Framework-neutral WASM bridge for hosts that render their own portal UI.

use portal_core::{FileCandidate, MessageBody, PortalConfig, PortalConfigPatch, PortalError};
use portal_engine::ReplyTopic;
use serde::Serialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct JsChatReply {
    topic: ReplyTopic,
    body: MessageBody,
}

/// Validate a `{ name, type, size }` file descriptor against the intake rules.
#[wasm_bindgen]
pub fn validate_upload(candidate: JsValue, config: Option<JsValue>) -> Result<JsValue, JsValue> {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();

    let candidate: FileCandidate = from_value(candidate)
        .map_err(|err| JsValue::from_str(&format!("Could not read file descriptor: {err}")))?;
    let cfg = read_config(config)?;

    let file = portal_core::validate_upload(&candidate, &cfg)
        .map_err(|err| JsValue::from_str(&format_portal_error(err)))?;

    to_value(&file).map_err(|err| JsValue::from_str(&format!("Could not serialize file: {err}")))
}

/// Route a chat message and return `{ topic, body }` for the host to render.
#[wasm_bindgen]
pub fn chat_reply(message: &str) -> Result<JsValue, JsValue> {
    let (topic, body) = portal_engine::compose_reply(message);
    to_value(&JsChatReply { topic, body })
        .map_err(|err| JsValue::from_str(&format!("Could not serialize reply: {err}")))
}

/// Draw one of the canned report analyses.
#[wasm_bindgen]
pub fn generate_report_analysis() -> Result<JsValue, JsValue> {
    let analysis = portal_engine::pick_analysis(&mut rand::thread_rng());
    to_value(&portal_engine::analysis_card(&analysis))
        .map_err(|err| JsValue::from_str(&format!("Could not serialize analysis: {err}")))
}

#[wasm_bindgen]
pub fn format_file_size(bytes: f64) -> String {
    portal_core::format_file_size(bytes.max(0.0) as u64)
}

fn read_config(config: Option<JsValue>) -> Result<PortalConfig, JsValue> {
    match config {
        Some(js_cfg) => {
            let patch: PortalConfigPatch = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Could not read config: {err}")))?;
            Ok(PortalConfig::from(patch))
        }
        None => Ok(PortalConfig::default()),
    }
}

fn format_portal_error(err: PortalError) -> String {
    format!("Upload rejected: {err}")
}
