//! Assistant content, the portal controller and a virtual-time runtime.

pub mod analysis;
pub mod assistant;
pub mod controller;
pub mod runtime;

pub use analysis::{analysis_card, analysis_template, pick_analysis, TEMPLATE_COUNT};
pub use assistant::{compose_reply, route, symptom_advice, ReplyTopic, QUICK_PROMPTS};
pub use controller::{Deferred, Outcome, PortalController, Scheduled, UiEffect};
pub use runtime::{RaisedToast, VirtualRuntime};
