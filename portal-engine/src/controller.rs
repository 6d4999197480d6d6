//! The portal controller: in-memory state plus every user-facing operation.
//!
//! Operations never touch a clock or the DOM. They mutate state and return an
//! [`Outcome`] listing deferred tasks (with their delays) and UI side effects.
//! The host runs the tasks on its own timers and feeds them back through
//! [`PortalController::resolve`]. Tasks are fire-and-forget: nothing is ever
//! cancelled, so a reply still arrives after the chat panel was closed.

use chrono::{DateTime, FixedOffset};
use portal_core::{
    validate_upload, Appointment, ChatAction, ChatMessage, FileCandidate, MessageBody, Modal,
    PortalConfig, Toast, ToastId, ToastKind, ToastPhase, UploadedFile,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::analysis::{analysis_card, pick_analysis};
use crate::assistant::{compose_reply, FOLLOW_UP_MESSAGE, WELCOME_MESSAGE};

pub const APPOINTMENTS_SECTION: &str = "appointments";
pub const STORE_SECTION: &str = "store";

const EMERGENCY_ALERT: &str =
    "Emergency services contacted! Help is on the way. Stay calm and follow any instructions given.";

/// Work the host must run after a fixed delay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deferred {
    RevealToast { id: ToastId },
    RetireToast { id: ToastId },
    DropToast { id: ToastId },
    /// The analysis is simulated and never reads the file; `file_name` only labels the log line.
    DeliverAnalysis { file_name: String },
    DeliverReply { prompt: String },
    ConfirmCallConnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scheduled {
    pub after_ms: u32,
    pub task: Deferred,
}

/// DOM side effects the host applies once the new state is rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    FocusChatInput,
    ClearChatInput,
    ScrollChatToEnd,
    ScrollToSection(&'static str),
    ResetAppointmentForm,
    Alert(&'static str),
}

/// Result of one controller operation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Outcome {
    pub scheduled: Vec<Scheduled>,
    pub effects: Vec<UiEffect>,
}

impl Outcome {
    pub fn is_empty(&self) -> bool {
        self.scheduled.is_empty() && self.effects.is_empty()
    }

    fn schedule(&mut self, after_ms: u32, task: Deferred) {
        self.scheduled.push(Scheduled { after_ms, task });
    }

    fn effect(&mut self, effect: UiEffect) {
        self.effects.push(effect);
    }

    fn merge(&mut self, other: Outcome) {
        self.scheduled.extend(other.scheduled);
        self.effects.extend(other.effects);
    }
}

/// Owns uploads, appointments, the chat transcript, live toasts and panel visibility.
#[derive(Debug, Clone)]
pub struct PortalController {
    config: PortalConfig,
    files: Vec<UploadedFile>,
    appointments: Vec<Appointment>,
    transcript: Vec<ChatMessage>,
    toasts: Vec<Toast>,
    next_toast: u64,
    pending_replies: usize,
    chatbot_open: bool,
    video_call_open: bool,
    drag_active: bool,
    rng: StdRng,
}

impl PortalController {
    pub fn new(config: PortalConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Controller with a fixed seed for the analysis template pick.
    pub fn with_seed(config: PortalConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: PortalConfig, rng: StdRng) -> Self {
        Self {
            config,
            files: Vec::new(),
            appointments: Vec::new(),
            transcript: vec![ChatMessage::bot(MessageBody::PlainText(
                WELCOME_MESSAGE.to_string(),
            ))],
            toasts: Vec::new(),
            next_toast: 1,
            pending_replies: 0,
            chatbot_open: false,
            video_call_open: false,
            drag_active: false,
            rng,
        }
    }

    pub fn config(&self) -> &PortalConfig {
        &self.config
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    /// Whether the "uploaded files" panel is shown.
    pub fn has_uploads(&self) -> bool {
        !self.files.is_empty()
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    pub fn toast(&self, id: ToastId) -> Option<&Toast> {
        self.toasts.iter().find(|toast| toast.id == id)
    }

    /// The typing indicator shows while at least one reply is pending.
    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    pub fn pending_replies(&self) -> usize {
        self.pending_replies
    }

    pub fn is_open(&self, modal: Modal) -> bool {
        match modal {
            Modal::Chatbot => self.chatbot_open,
            Modal::VideoCall => self.video_call_open,
        }
    }

    pub fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    pub fn set_drag_active(&mut self, active: bool) {
        self.drag_active = active;
    }

    /// Raise a toast and schedule its slide-in, slide-out and removal.
    pub fn notify(&mut self, message: impl Into<String>, kind: ToastKind) -> Outcome {
        let id = ToastId(self.next_toast);
        self.next_toast += 1;
        self.toasts.push(Toast {
            id,
            message: message.into(),
            kind,
            phase: ToastPhase::Entering,
        });

        let mut outcome = Outcome::default();
        outcome.schedule(self.config.toast_enter_ms, Deferred::RevealToast { id });
        outcome.schedule(self.config.toast_visible_ms, Deferred::RetireToast { id });
        outcome
    }

    /// Manual dismissal. Returns whether a toast was removed.
    pub fn dismiss_toast(&mut self, id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != id);
        self.toasts.len() != before
    }

    /// Validate and add dropped or selected files; each accepted file gets an analysis.
    pub fn upload_files<I>(&mut self, candidates: I) -> Outcome
    where
        I: IntoIterator<Item = FileCandidate>,
    {
        self.drag_active = false;
        let mut outcome = Outcome::default();

        for candidate in candidates {
            match validate_upload(&candidate, &self.config) {
                Ok(file) => {
                    log::debug!("accepted upload {} ({} bytes)", file.name, file.size_bytes);
                    outcome.schedule(
                        self.config.analysis_delay_ms,
                        Deferred::DeliverAnalysis {
                            file_name: file.name.clone(),
                        },
                    );
                    self.files.push(file);
                }
                Err(err) => {
                    log::warn!("rejected upload {}: {err}", candidate.name);
                    outcome.merge(self.notify(err.to_string(), ToastKind::Error));
                }
            }
        }

        outcome
    }

    /// Remove every uploaded file called `name`.
    pub fn remove_file(&mut self, name: &str) -> Outcome {
        self.files.retain(|file| file.name != name);
        self.notify("File removed successfully", ToastKind::Info)
    }

    /// Post a user message; the reply follows after the configured delay.
    /// Blank input is ignored.
    pub fn send_message(&mut self, input: &str) -> Outcome {
        let message = input.trim();
        if message.is_empty() {
            return Outcome::default();
        }

        self.transcript.push(ChatMessage::user(message));
        self.pending_replies += 1;

        let mut outcome = Outcome::default();
        outcome.effect(UiEffect::ClearChatInput);
        outcome.effect(UiEffect::ScrollChatToEnd);
        outcome.schedule(
            self.config.reply_delay_ms,
            Deferred::DeliverReply {
                prompt: message.to_string(),
            },
        );
        outcome
    }

    /// Send a preset prompt as if it had been typed.
    pub fn quick_message(&mut self, prompt: &str) -> Outcome {
        self.send_message(prompt)
    }

    /// Open the assistant panel and send `prompt` in one step.
    pub fn ask_assistant(&mut self, prompt: &str) -> Outcome {
        let mut outcome = self.open_chatbot();
        outcome.merge(self.send_message(prompt));
        outcome
    }

    pub fn open_chatbot(&mut self) -> Outcome {
        self.chatbot_open = true;
        Outcome {
            scheduled: Vec::new(),
            effects: vec![UiEffect::FocusChatInput],
        }
    }

    pub fn close_chatbot(&mut self) -> Outcome {
        self.chatbot_open = false;
        Outcome::default()
    }

    pub fn toggle_chatbot(&mut self) -> Outcome {
        if self.chatbot_open {
            self.close_chatbot()
        } else {
            self.open_chatbot()
        }
    }

    pub fn start_video_call(&mut self) -> Outcome {
        self.video_call_open = true;
        let mut outcome = self.notify("Connecting to doctor...", ToastKind::Info);
        outcome.schedule(
            self.config.call_connect_delay_ms,
            Deferred::ConfirmCallConnected,
        );
        outcome
    }

    pub fn end_video_call(&mut self) -> Outcome {
        self.video_call_open = false;
        self.notify("Video call ended", ToastKind::Info)
    }

    pub fn call_emergency(&mut self) -> Outcome {
        log::info!("emergency call requested");
        Outcome {
            scheduled: Vec::new(),
            effects: vec![UiEffect::Alert(EMERGENCY_ALERT)],
        }
    }

    pub fn show_booking(&mut self) -> Outcome {
        let mut outcome = self.notify(
            "Please fill out the appointment form below",
            ToastKind::Info,
        );
        outcome.effect(UiEffect::ScrollToSection(APPOINTMENTS_SECTION));
        outcome
    }

    pub fn schedule_follow_up(&mut self) -> Outcome {
        let mut outcome = self.show_booking();
        self.transcript.push(ChatMessage::bot(MessageBody::PlainText(
            FOLLOW_UP_MESSAGE.to_string(),
        )));
        outcome.effect(UiEffect::ScrollChatToEnd);
        outcome
    }

    pub fn visit_store(&mut self) -> Outcome {
        Outcome {
            scheduled: Vec::new(),
            effects: vec![UiEffect::ScrollToSection(STORE_SECTION)],
        }
    }

    /// Run the action behind a card button.
    pub fn run_action(&mut self, action: ChatAction) -> Outcome {
        match action {
            ChatAction::StartVideoCall => self.start_video_call(),
            ChatAction::CallEmergency => self.call_emergency(),
            ChatAction::ShowBooking => self.show_booking(),
            ChatAction::ScheduleFollowUp => self.schedule_follow_up(),
            ChatAction::VisitStore => self.visit_store(),
        }
    }

    /// Record a confirmed appointment. A blank name falls back to the default.
    pub fn book_appointment(
        &mut self,
        patient_name: &str,
        booked_at: DateTime<FixedOffset>,
    ) -> Outcome {
        let name = patient_name.trim();
        let name = if name.is_empty() {
            self.config.default_patient_name.clone()
        } else {
            name.to_string()
        };

        let appointment =
            Appointment::confirmed(&self.config.appointment_id_prefix, name, booked_at);
        log::info!("booked appointment {}", appointment.id);
        let message = format!(
            "Appointment booked successfully! Confirmation ID: {}",
            appointment.id
        );
        self.appointments.push(appointment);

        let mut outcome = self.notify(message, ToastKind::Success);
        outcome.effect(UiEffect::ResetAppointmentForm);
        outcome
    }

    /// Apply a deferred task once its delay has elapsed.
    pub fn resolve(&mut self, task: Deferred) -> Outcome {
        match task {
            Deferred::RevealToast { id } => {
                if let Some(toast) = self.toasts.iter_mut().find(|toast| toast.id == id) {
                    if toast.phase == ToastPhase::Entering {
                        toast.phase = ToastPhase::Shown;
                    }
                }
                Outcome::default()
            }
            Deferred::RetireToast { id } => {
                let mut outcome = Outcome::default();
                if self.set_toast_phase(id, ToastPhase::Leaving) {
                    outcome.schedule(self.config.toast_exit_ms, Deferred::DropToast { id });
                }
                outcome
            }
            Deferred::DropToast { id } => {
                self.dismiss_toast(id);
                Outcome::default()
            }
            Deferred::DeliverAnalysis { file_name } => {
                let analysis = pick_analysis(&mut self.rng);
                log::debug!("analysis for {file_name}: {}", analysis.report_type);
                self.transcript
                    .push(ChatMessage::bot(MessageBody::Rich(analysis_card(&analysis))));
                let mut outcome = self.notify("Report analysis completed!", ToastKind::Success);
                outcome.effect(UiEffect::ScrollChatToEnd);
                outcome
            }
            Deferred::DeliverReply { prompt } => {
                self.pending_replies = self.pending_replies.saturating_sub(1);
                let (topic, body) = compose_reply(&prompt);
                log::debug!("reply topic {topic:?}");
                self.transcript.push(ChatMessage::bot(body));
                Outcome {
                    scheduled: Vec::new(),
                    effects: vec![UiEffect::ScrollChatToEnd],
                }
            }
            Deferred::ConfirmCallConnected => {
                self.notify("Connected! Doctor will join shortly.", ToastKind::Success)
            }
        }
    }

    fn set_toast_phase(&mut self, id: ToastId, phase: ToastPhase) -> bool {
        match self.toasts.iter_mut().find(|toast| toast.id == id) {
            Some(toast) => {
                toast.phase = phase;
                true
            }
            None => false,
        }
    }
}
