//! Core data model for the patient portal: uploads, appointments, chat and toasts.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// Tunable limits and delays of the portal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortalConfig {
    /// Largest accepted upload, in bytes (inclusive).
    pub max_upload_bytes: u64,
    /// Delay before a simulated report analysis is delivered.
    pub analysis_delay_ms: u32,
    /// Delay between a chat message and the assistant reply.
    pub reply_delay_ms: u32,
    /// Delay before a started video call reports it is connected.
    pub call_connect_delay_ms: u32,
    /// Delay before a new toast slides in.
    pub toast_enter_ms: u32,
    /// Time from creation until a toast starts sliding out.
    pub toast_visible_ms: u32,
    /// Slide-out transition length; the toast is removed afterwards.
    pub toast_exit_ms: u32,
    pub appointment_id_prefix: String,
    pub default_patient_name: String,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: 10 * 1024 * 1024,
            analysis_delay_ms: 2_000,
            reply_delay_ms: 1_500,
            call_connect_delay_ms: 3_000,
            toast_enter_ms: 100,
            toast_visible_ms: 5_000,
            toast_exit_ms: 300,
            appointment_id_prefix: "APT-".to_string(),
            default_patient_name: "Patient".to_string(),
        }
    }
}

/// Partial configuration coming from a host page; missing fields keep defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct PortalConfigPatch {
    pub max_upload_bytes: Option<u64>,
    pub analysis_delay_ms: Option<u32>,
    pub reply_delay_ms: Option<u32>,
    pub call_connect_delay_ms: Option<u32>,
    pub toast_enter_ms: Option<u32>,
    pub toast_visible_ms: Option<u32>,
    pub toast_exit_ms: Option<u32>,
    pub appointment_id_prefix: Option<String>,
    pub default_patient_name: Option<String>,
}

impl From<PortalConfigPatch> for PortalConfig {
    fn from(patch: PortalConfigPatch) -> Self {
        let mut base = PortalConfig::default();
        if let Some(bytes) = patch.max_upload_bytes {
            base.max_upload_bytes = bytes;
        }
        if let Some(ms) = patch.analysis_delay_ms {
            base.analysis_delay_ms = ms;
        }
        if let Some(ms) = patch.reply_delay_ms {
            base.reply_delay_ms = ms;
        }
        if let Some(ms) = patch.call_connect_delay_ms {
            base.call_connect_delay_ms = ms;
        }
        if let Some(ms) = patch.toast_enter_ms {
            base.toast_enter_ms = ms;
        }
        if let Some(ms) = patch.toast_visible_ms {
            base.toast_visible_ms = ms;
        }
        if let Some(ms) = patch.toast_exit_ms {
            base.toast_exit_ms = ms;
        }
        if let Some(prefix) = patch.appointment_id_prefix {
            base.appointment_id_prefix = prefix;
        }
        if let Some(name) = patch.default_patient_name {
            base.default_patient_name = name;
        }
        base
    }
}

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MimeType {
    Pdf,
    Jpeg,
    Png,
}

impl MimeType {
    /// Parse a browser-reported MIME type. `image/jpg` is accepted as an alias.
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            "application/pdf" => Some(Self::Pdf),
            "image/jpeg" | "image/jpg" => Some(Self::Jpeg),
            "image/png" => Some(Self::Png),
            _ => None,
        }
    }

    /// Best-effort MIME guess from a file name, for hosts without one.
    pub fn mime_for_file_name(name: &str) -> &'static str {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "pdf" => "application/pdf",
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            _ => "application/octet-stream",
        }
    }

    pub fn as_mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }

    /// Icon family shown next to the file in the upload list.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Jpeg | Self::Png => "image",
        }
    }
}

/// A file as reported by a drop or file-input event, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FileCandidate {
    pub name: String,
    #[serde(rename = "type")]
    pub mime: String,
    pub size: u64,
}

/// A file that passed intake validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadedFile {
    pub name: String,
    pub mime_type: MimeType,
    pub size_bytes: u64,
}

impl UploadedFile {
    pub fn display_size(&self) -> String {
        format_file_size(self.size_bytes)
    }
}

/// Check a candidate against the type allow-list and the size limit.
///
/// The type is checked before the size, so an oversized file of the wrong
/// type is reported as a type error.
pub fn validate_upload(
    candidate: &FileCandidate,
    config: &PortalConfig,
) -> Result<UploadedFile, PortalError> {
    let mime_type = MimeType::from_mime(&candidate.mime)
        .ok_or_else(|| PortalError::UnsupportedFileType(candidate.mime.clone()))?;

    if candidate.size > config.max_upload_bytes {
        return Err(PortalError::FileTooLarge {
            size: candidate.size,
            limit: config.max_upload_bytes,
        });
    }

    Ok(UploadedFile {
        name: candidate.name.clone(),
        mime_type,
        size_bytes: candidate.size,
    })
}

/// Human readable size: `0 Bytes`, `1.5 KB`, `10 MB`.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut exponent = 0;
    while exponent + 1 < UNITS.len() && bytes >= 1024u64.pow(exponent as u32 + 1) {
        exponent += 1;
    }

    let scaled = bytes as f64 / 1024f64.powi(exponent as i32);
    let rounded = (scaled * 100.0).round() / 100.0;
    format!("{rounded} {}", UNITS[exponent])
}

/// Limit text for the size error: whole megabytes read "10MB", anything else uses
/// the upload list format.
fn format_size_limit(limit: &u64) -> String {
    const MIB: u64 = 1024 * 1024;
    let limit = *limit;
    if limit >= MIB && limit % MIB == 0 {
        format!("{}MB", limit / MIB)
    } else {
        format_file_size(limit)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Confirmed,
}

/// A booked appointment. Kept in memory only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Appointment {
    pub id: String,
    pub patient_name: String,
    /// Local calendar date of the booking, `M/D/YYYY`.
    pub date: String,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Build a confirmed appointment booked at `booked_at` (client local time).
    pub fn confirmed(prefix: &str, patient_name: String, booked_at: DateTime<FixedOffset>) -> Self {
        Self {
            id: format!("{prefix}{}", booked_at.timestamp_millis()),
            patient_name,
            date: booked_at.format("%-m/%-d/%Y").to_string(),
            status: AppointmentStatus::Confirmed,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// What a chat message carries. Neither variant is ever rendered as markup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum MessageBody {
    PlainText(String),
    Rich(RichCard),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub sender: Sender,
    pub body: MessageBody,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            body: MessageBody::PlainText(text.into()),
        }
    }

    pub fn bot(body: MessageBody) -> Self {
        Self {
            sender: Sender::Bot,
            body,
        }
    }
}

/// Colour family of a rich reply card.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CardTone {
    Info,
    Danger,
    Success,
    Caution,
    Accent,
}

/// Structured assistant reply, rendered by the UI from plain text fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RichCard {
    pub tone: CardTone,
    pub icon: String,
    pub title: String,
    pub summary: Option<String>,
    #[serde(default)]
    pub sections: Vec<CardSection>,
    pub notice: Option<String>,
    pub badge: Option<Urgency>,
    #[serde(default)]
    pub actions: Vec<ActionButton>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CardSection {
    pub heading: String,
    pub body: Option<String>,
    #[serde(default)]
    pub items: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionButton {
    pub action: ChatAction,
    pub label: String,
}

/// Follow-up actions offered by assistant cards.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ChatAction {
    StartVideoCall,
    CallEmergency,
    ShowBooking,
    ScheduleFollowUp,
    VisitStore,
}

/// Priority attached to a report analysis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
    None,
}

impl Urgency {
    pub fn label(self) -> &'static str {
        match self {
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::None => "None",
        }
    }

    /// Badge colour level used by the stylesheet.
    pub fn level(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::None => "none",
        }
    }
}

/// Outcome of a simulated report analysis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReportAnalysis {
    pub report_type: String,
    pub findings: String,
    pub recommendations: Vec<String>,
    pub urgency: Urgency,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastKind {
    Success,
    Error,
    Info,
    Warning,
}

/// Animation phase of a toast.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToastPhase {
    /// Created, still off-screen.
    Entering,
    Shown,
    /// Sliding out, about to be removed.
    Leaving,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Toast {
    pub id: ToastId,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
}

/// Panels that can be shown or hidden.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Modal {
    Chatbot,
    VideoCall,
}

/// Upload rejections. The display text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PortalError {
    #[error("Please upload PDF, JPG, or PNG files only.")]
    UnsupportedFileType(String),
    #[error("File size should be less than {}.", format_size_limit(.limit))]
    FileTooLarge { size: u64, limit: u64 },
}
