#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-portal-ui]";

/// Default CSS for the portal along with easy-to-override design tokens.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --portal-font-family: 'Inter', system-ui, -apple-system, BlinkMacSystemFont, 'Segoe UI', sans-serif;
  --portal-bg: #f8fafc;
  --portal-surface: #ffffff;
  --portal-border: rgba(148, 163, 184, 0.28);
  --portal-radius: 14px;
  --portal-text: #1f2933;
  --portal-muted: #52606d;
  --portal-primary: #2563eb;
  --portal-primary-text: #ffffff;
  --portal-danger: #b42318;
  --portal-tone-info-bg: #eff6ff;
  --portal-tone-info: #1d4ed8;
  --portal-tone-danger-bg: #fef2f2;
  --portal-tone-danger: #b91c1c;
  --portal-tone-success-bg: #f0fdf4;
  --portal-tone-success: #15803d;
  --portal-tone-caution-bg: #fefce8;
  --portal-tone-caution: #a16207;
  --portal-tone-accent-bg: #faf5ff;
  --portal-tone-accent: #7e22ce;
  --portal-toast-success: #22c55e;
  --portal-toast-error: #ef4444;
  --portal-toast-info: #3b82f6;
  --portal-toast-warning: #eab308;
}

.portal-root {
  font-family: var(--portal-font-family);
  background: var(--portal-bg);
  color: var(--portal-text);
  display: flex;
  flex-direction: column;
  gap: 28px;
  padding: 24px;
}

.portal-root .hidden {
  display: none !important;
}

.portal-nav {
  display: flex;
  align-items: center;
  justify-content: space-between;
  background: var(--portal-surface);
  border: 1px solid var(--portal-border);
  border-radius: var(--portal-radius);
  padding: 12px 20px;
}

.portal-nav ul {
  display: flex;
  gap: 18px;
  list-style: none;
  margin: 0;
  padding: 0;
}

.portal-nav a {
  color: var(--portal-muted);
  text-decoration: none;
  font-weight: 600;
}

.portal-nav a:hover {
  color: var(--portal-primary);
}

.portal-brand {
  font-weight: 700;
  color: var(--portal-primary);
}

.portal-section {
  background: var(--portal-surface);
  border: 1px solid var(--portal-border);
  border-radius: var(--portal-radius);
  padding: 24px;
  box-shadow: 0 12px 28px rgba(15, 23, 42, 0.06);
}

.portal-section-header h2 {
  margin: 0 0 4px;
}

.portal-section-header p,
.portal-muted {
  color: var(--portal-muted);
  font-size: 0.875rem;
  margin: 0;
}

.portal-dropzone {
  margin-top: 18px;
  border: 2px dashed var(--portal-border);
  border-radius: var(--portal-radius);
  padding: 36px 20px;
  text-align: center;
  cursor: pointer;
  transition: border-color 0.2s ease, background 0.2s ease;
}

.portal-dropzone.dragover {
  border-color: var(--portal-primary);
  background: var(--portal-tone-info-bg);
}

.portal-dropzone-icon {
  font-size: 2rem;
}

.portal-uploads {
  margin-top: 20px;
}

#filesList {
  display: flex;
  flex-direction: column;
  gap: 10px;
}

.portal-file {
  display: flex;
  align-items: center;
  justify-content: space-between;
  background: var(--portal-bg);
  border-radius: 10px;
  padding: 12px;
}

.portal-file-info,
.portal-file-actions {
  display: flex;
  align-items: center;
  gap: 12px;
}

.portal-file-info p {
  margin: 0;
}

.portal-file-name {
  font-weight: 600;
}

.portal-file-status {
  color: var(--portal-tone-success);
  font-size: 0.875rem;
}

.portal-icon-button {
  background: none;
  border: none;
  cursor: pointer;
  font-size: 1.1rem;
  color: var(--portal-danger);
}

.portal-form {
  margin-top: 18px;
  display: grid;
  grid-template-columns: repeat(2, minmax(0, 1fr));
  gap: 14px;
}

.portal-form label {
  display: flex;
  flex-direction: column;
  gap: 6px;
  font-size: 0.875rem;
  font-weight: 600;
}

.portal-form input,
.portal-form select,
.portal-form textarea,
.portal-chat-input input {
  border: 1px solid var(--portal-border);
  border-radius: 8px;
  padding: 8px 10px;
  font: inherit;
}

.portal-form-wide {
  grid-column: 1 / -1;
}

.portal-button {
  background: var(--portal-primary);
  color: var(--portal-primary-text);
  border: none;
  border-radius: 8px;
  padding: 10px 16px;
  font-weight: 600;
  cursor: pointer;
}

.portal-button-danger {
  background: var(--portal-danger);
}

.portal-launcher {
  position: fixed;
  right: 24px;
  bottom: 24px;
  width: 56px;
  height: 56px;
  border-radius: 999px;
  border: none;
  background: var(--portal-primary);
  font-size: 1.5rem;
  cursor: pointer;
  box-shadow: 0 10px 24px rgba(37, 99, 235, 0.35);
  z-index: 40;
}

.portal-chatbot {
  position: fixed;
  right: 24px;
  bottom: 92px;
  width: min(380px, calc(100vw - 48px));
  height: 560px;
  display: flex;
  flex-direction: column;
  background: var(--portal-surface);
  border-radius: var(--portal-radius);
  box-shadow: 0 24px 48px rgba(15, 23, 42, 0.2);
  overflow: hidden;
  z-index: 45;
}

.portal-chatbot-header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  background: var(--portal-primary);
  color: var(--portal-primary-text);
  padding: 12px 16px;
}

.portal-chatbot-header h3 {
  margin: 0;
  font-size: 1rem;
}

.portal-chatbot-header .portal-icon-button {
  color: var(--portal-primary-text);
}

.portal-status {
  font-size: 0.75rem;
  opacity: 0.85;
}

.portal-chat-log {
  flex: 1;
  overflow-y: auto;
  padding: 16px;
  background: var(--portal-bg);
}

.portal-message {
  margin-bottom: 14px;
}

.portal-message[data-sender="user"] {
  text-align: right;
}

.portal-bubble {
  display: inline-block;
  max-width: 85%;
  text-align: left;
  padding: 10px 12px;
  border-radius: 10px;
  background: var(--portal-surface);
  border: 1px solid var(--portal-border);
}

.portal-message[data-sender="user"] .portal-bubble {
  background: var(--portal-primary);
  color: var(--portal-primary-text);
  border-color: transparent;
}

.portal-message-text {
  margin: 0;
  font-size: 0.875rem;
  white-space: pre-line;
}

.portal-typing {
  display: inline-flex;
  gap: 4px;
  padding: 10px 12px;
  background: #e5e7eb;
  border-radius: 10px;
}

.portal-typing span {
  width: 8px;
  height: 8px;
  border-radius: 999px;
  background: #9ca3af;
  animation: portal-bounce 1s infinite;
}

.portal-typing span:nth-child(2) {
  animation-delay: 0.1s;
}

.portal-typing span:nth-child(3) {
  animation-delay: 0.2s;
}

@keyframes portal-bounce {
  0%, 100% { transform: translateY(0); }
  50% { transform: translateY(-4px); }
}

.portal-card {
  border-left: 4px solid var(--portal-card-accent);
  background: var(--portal-card-bg);
  border-radius: 8px;
  padding: 10px 12px;
  font-size: 0.85rem;
}

.portal-card h4 {
  margin: 0 0 8px;
  color: var(--portal-card-accent);
}

.portal-card p {
  margin: 0 0 8px;
}

.portal-card[data-tone="info"] { --portal-card-accent: var(--portal-tone-info); --portal-card-bg: var(--portal-tone-info-bg); }
.portal-card[data-tone="danger"] { --portal-card-accent: var(--portal-tone-danger); --portal-card-bg: var(--portal-tone-danger-bg); }
.portal-card[data-tone="success"] { --portal-card-accent: var(--portal-tone-success); --portal-card-bg: var(--portal-tone-success-bg); }
.portal-card[data-tone="caution"] { --portal-card-accent: var(--portal-tone-caution); --portal-card-bg: var(--portal-tone-caution-bg); }
.portal-card[data-tone="accent"] { --portal-card-accent: var(--portal-tone-accent); --portal-card-bg: var(--portal-tone-accent-bg); }

.portal-card-section ul {
  margin: 4px 0 8px;
  padding-left: 18px;
}

.portal-card-notice {
  background: #fee2e2;
  color: #991b1b;
  border-radius: 6px;
  padding: 6px 8px;
  margin-bottom: 8px;
  font-size: 0.78rem;
}

.portal-card-footer {
  display: flex;
  flex-wrap: wrap;
  align-items: center;
  justify-content: space-between;
  gap: 8px;
}

.portal-card-action {
  border: none;
  border-radius: 6px;
  padding: 6px 10px;
  background: var(--portal-card-accent);
  color: #ffffff;
  cursor: pointer;
  font-size: 0.78rem;
}

.portal-badge {
  font-size: 0.72rem;
  border-radius: 999px;
  padding: 2px 8px;
  background: #f3f4f6;
  color: #1f2937;
}

.portal-badge[data-level="high"] { background: #fee2e2; color: #991b1b; }
.portal-badge[data-level="medium"] { background: #fef9c3; color: #854d0e; }
.portal-badge[data-level="low"] { background: #dcfce7; color: #166534; }

.portal-quick-prompts {
  display: flex;
  flex-wrap: wrap;
  gap: 6px;
  padding: 8px 12px 0;
}

.portal-chip {
  border: 1px solid var(--portal-border);
  background: var(--portal-surface);
  border-radius: 999px;
  padding: 4px 10px;
  font-size: 0.75rem;
  cursor: pointer;
}

.portal-chat-input {
  display: flex;
  gap: 8px;
  padding: 12px;
}

.portal-chat-input input {
  flex: 1;
}

.portal-overlay {
  position: fixed;
  inset: 0;
  background: rgba(15, 23, 42, 0.6);
  display: flex;
  align-items: center;
  justify-content: center;
  z-index: 50;
}

.portal-video {
  background: #0f172a;
  color: #e2e8f0;
  border-radius: var(--portal-radius);
  padding: 24px;
  width: min(640px, calc(100vw - 48px));
  display: flex;
  flex-direction: column;
  gap: 16px;
  align-items: center;
}

.portal-video-stage {
  width: 100%;
  aspect-ratio: 16 / 9;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  background: #1e293b;
  border-radius: 10px;
}

.portal-video-avatar {
  font-size: 3rem;
}

.portal-toasts {
  position: fixed;
  top: 96px;
  right: 16px;
  display: flex;
  flex-direction: column;
  gap: 10px;
  z-index: 60;
}

.portal-toast {
  display: flex;
  align-items: center;
  justify-content: space-between;
  gap: 12px;
  max-width: 360px;
  padding: 14px 16px;
  border-radius: 10px;
  color: #ffffff;
  box-shadow: 0 10px 24px rgba(15, 23, 42, 0.2);
  transition: transform 0.3s ease, opacity 0.3s ease;
  font-size: 0.875rem;
}

.portal-toast button {
  background: none;
  border: none;
  color: inherit;
  font-size: 1.1rem;
  cursor: pointer;
}

.portal-toast[data-phase="entering"],
.portal-toast[data-phase="leaving"] {
  transform: translateX(calc(100% + 24px));
  opacity: 0;
}

.portal-toast[data-kind="success"] { background: var(--portal-toast-success); }
.portal-toast[data-kind="error"] { background: var(--portal-toast-error); }
.portal-toast[data-kind="info"] { background: var(--portal-toast-info); }
.portal-toast[data-kind="warning"] { background: var(--portal-toast-warning); color: #111827; }

@media (max-width: 720px) {
  .portal-form {
    grid-template-columns: 1fr;
  }

  .portal-nav ul {
    gap: 10px;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("Document has no <head> element"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-portal-ui", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
