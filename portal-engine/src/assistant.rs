//! Keyword routing and canned assistant replies.

use portal_core::{ActionButton, CardSection, CardTone, ChatAction, MessageBody, RichCard};
use serde::{Deserialize, Serialize};

/// Reply category chosen for a chat message.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReplyTopic {
    Emergency,
    Symptom,
    Report,
    Appointment,
    Medicine,
    General,
}

/// Ordered routing table; the first topic with a matching keyword wins.
const ROUTES: &[(ReplyTopic, &[&str])] = &[
    (ReplyTopic::Emergency, &["emergency", "urgent", "help"]),
    (ReplyTopic::Symptom, &["symptom", "pain", "fever", "vomit"]),
    (ReplyTopic::Report, &["report", "analyze", "test result"]),
    (ReplyTopic::Appointment, &["appointment", "book", "schedule"]),
    (ReplyTopic::Medicine, &["medicine", "medication", "drug"]),
];

pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI medical assistant. I can help you with:\n\n\
• Analyzing medical reports\n\
• Providing health recommendations\n\
• Scheduling appointments\n\
• Emergency guidance\n\n\
How can I assist you today?";

pub const FOLLOW_UP_MESSAGE: &str =
    "Great! Please fill out the appointment form to schedule your follow-up visit.";

const REPORT_REPLY: &str = "I can analyze your medical reports! Please upload your reports using the upload section above, and I'll provide detailed analysis with recommendations. Supported formats: PDF, JPG, PNG.";

/// Preset prompts offered as one-click chips in the chat panel.
pub const QUICK_PROMPTS: &[&str] = &[
    "I have a fever",
    "Analyze my report",
    "Book an appointment",
    "Medicine information",
    "Emergency help",
];

/// Advice block for a recognised symptom.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymptomAdvice {
    pub advice: &'static str,
    pub remedies: [&'static str; 4],
    pub warning: &'static str,
}

const SYMPTOMS: &[(&str, SymptomAdvice)] = &[
    (
        "vomit",
        SymptomAdvice {
            advice: "For vomiting, try sipping small amounts of clear fluids like water or ginger tea. Avoid solid foods until vomiting stops.",
            remedies: [
                "Stay hydrated with small sips",
                "Try ginger tea",
                "Rest in upright position",
                "Avoid dairy and fatty foods",
            ],
            warning: "Consult a doctor if vomiting persists for more than 24 hours or if you have severe dehydration.",
        },
    ),
    (
        "fever",
        SymptomAdvice {
            advice: "For fever, rest and stay hydrated. You can take over-the-counter fever reducers if needed.",
            remedies: [
                "Drink plenty of fluids",
                "Rest in cool environment",
                "Use cool compress",
                "Take acetaminophen if needed",
            ],
            warning: "Seek immediate medical attention if fever exceeds 103°F (39.4°C) or persists for more than 3 days.",
        },
    ),
    (
        "pain",
        SymptomAdvice {
            advice: "The treatment for pain depends on its location and severity. Can you describe where you feel pain?",
            remedies: [
                "Apply ice or heat as appropriate",
                "Take over-the-counter pain relievers",
                "Rest the affected area",
                "Gentle stretching if muscular",
            ],
            warning: "Seek immediate care for severe pain, chest pain, or pain with other concerning symptoms.",
        },
    ),
];

const GENERIC_SYMPTOM: SymptomAdvice = SymptomAdvice {
    advice: "I understand you're experiencing symptoms. Please describe them in more detail so I can provide better guidance.",
    remedies: [
        "Rest and stay hydrated",
        "Monitor your symptoms",
        "Take your temperature if possible",
        "Avoid strenuous activities",
    ],
    warning: "Contact a healthcare provider if symptoms worsen or persist.",
};

/// Pick the reply topic for a message. Matching is case-insensitive substring search.
pub fn route(message: &str) -> ReplyTopic {
    let lower = message.to_lowercase();
    ROUTES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|keyword| lower.contains(keyword)))
        .map(|(topic, _)| *topic)
        .unwrap_or(ReplyTopic::General)
}

/// Look up symptom advice; the first table entry found in the text wins.
pub fn symptom_advice(message: &str) -> SymptomAdvice {
    let lower = message.to_lowercase();
    SYMPTOMS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, advice)| *advice)
        .unwrap_or(GENERIC_SYMPTOM)
}

/// Build the assistant reply for a user message.
pub fn compose_reply(message: &str) -> (ReplyTopic, MessageBody) {
    let topic = route(message);
    let body = match topic {
        ReplyTopic::Emergency => MessageBody::Rich(emergency_card()),
        ReplyTopic::Symptom => MessageBody::Rich(symptom_card(&symptom_advice(message))),
        ReplyTopic::Report => MessageBody::PlainText(REPORT_REPLY.to_string()),
        ReplyTopic::Appointment => MessageBody::Rich(appointment_card()),
        ReplyTopic::Medicine => MessageBody::Rich(medicine_card()),
        ReplyTopic::General => MessageBody::PlainText(capability_message(message)),
    };
    (topic, body)
}

fn capability_message(message: &str) -> String {
    format!(
        "I understand you're asking about \"{message}\". As your AI medical assistant, I can help with:\n\n\
• 🔬 Medical report analysis\n\
• 💊 Medicine information and ordering\n\
• 📅 Appointment scheduling\n\
• 🎥 Video consultations\n\
• 🚨 Emergency guidance\n\n\
Please let me know what specific help you need, or upload your medical reports for detailed analysis."
    )
}

fn button(action: ChatAction, label: &str) -> ActionButton {
    ActionButton {
        action,
        label: label.to_string(),
    }
}

fn emergency_card() -> RichCard {
    RichCard {
        tone: CardTone::Danger,
        icon: "🚨".to_string(),
        title: "Emergency Response".to_string(),
        summary: Some(
            "If this is a medical emergency, please call 911 immediately.".to_string(),
        ),
        sections: Vec::new(),
        notice: None,
        badge: None,
        actions: vec![
            button(ChatAction::StartVideoCall, "🎥 Emergency Video Call"),
            button(ChatAction::CallEmergency, "📞 Call 911"),
        ],
    }
}

fn symptom_card(advice: &SymptomAdvice) -> RichCard {
    RichCard {
        tone: CardTone::Caution,
        icon: "🩺".to_string(),
        title: "Symptom Assessment".to_string(),
        summary: Some(advice.advice.to_string()),
        sections: vec![CardSection {
            heading: "Immediate remedies:".to_string(),
            body: None,
            items: advice.remedies.iter().map(|r| r.to_string()).collect(),
        }],
        notice: Some(format!("⚠️ {}", advice.warning)),
        badge: None,
        actions: vec![
            button(ChatAction::StartVideoCall, "Video Consult"),
            button(ChatAction::ShowBooking, "Book Appointment"),
        ],
    }
}

fn appointment_card() -> RichCard {
    RichCard {
        tone: CardTone::Success,
        icon: "📅".to_string(),
        title: "Book Appointment".to_string(),
        summary: Some("I can help you schedule an appointment with our doctors.".to_string()),
        sections: Vec::new(),
        notice: None,
        badge: None,
        actions: vec![button(ChatAction::ShowBooking, "Book Now")],
    }
}

fn medicine_card() -> RichCard {
    RichCard {
        tone: CardTone::Accent,
        icon: "💊".to_string(),
        title: "Medicine Information".to_string(),
        summary: Some(
            "You can browse and order medicines from our store with free delivery.".to_string(),
        ),
        sections: Vec::new(),
        notice: None,
        badge: None,
        actions: vec![button(ChatAction::VisitStore, "Visit Store")],
    }
}

