//! Simulated report analysis backed by three fixed templates.

use portal_core::{
    ActionButton, CardSection, CardTone, ChatAction, ReportAnalysis, RichCard, Urgency,
};
use rand::Rng;

struct Template {
    report_type: &'static str,
    findings: &'static str,
    recommendations: [&'static str; 3],
    urgency: Urgency,
}

const TEMPLATES: [Template; 3] = [
    Template {
        report_type: "Blood Test",
        findings: "Your blood test shows normal white blood cell count. Slight elevation in cholesterol levels detected. Recommend dietary modifications and regular exercise.",
        recommendations: [
            "Reduce saturated fat intake",
            "Exercise 30 minutes daily",
            "Follow up in 3 months",
        ],
        urgency: Urgency::Low,
    },
    Template {
        report_type: "X-Ray",
        findings: "Chest X-ray appears normal. No signs of pneumonia or other respiratory issues. Clear lung fields observed.",
        recommendations: [
            "Continue regular check-ups",
            "Maintain healthy lifestyle",
            "No immediate action required",
        ],
        urgency: Urgency::None,
    },
    Template {
        report_type: "ECG",
        findings: "ECG shows normal sinus rhythm. Heart rate within normal range. No signs of arrhythmia detected.",
        recommendations: [
            "Continue current medications if any",
            "Regular cardio exercise",
            "Annual cardiac check-up",
        ],
        urgency: Urgency::Low,
    },
];

/// Number of canned analyses.
pub const TEMPLATE_COUNT: usize = TEMPLATES.len();

/// Analysis template at `index`, wrapping around.
pub fn analysis_template(index: usize) -> ReportAnalysis {
    let template = &TEMPLATES[index % TEMPLATES.len()];
    ReportAnalysis {
        report_type: template.report_type.to_string(),
        findings: template.findings.to_string(),
        recommendations: template
            .recommendations
            .iter()
            .map(|r| r.to_string())
            .collect(),
        urgency: template.urgency,
    }
}

/// Uniformly pick one template. The file content plays no part.
pub fn pick_analysis<R: Rng + ?Sized>(rng: &mut R) -> ReportAnalysis {
    analysis_template(rng.gen_range(0..TEMPLATES.len()))
}

pub fn analysis_card(analysis: &ReportAnalysis) -> RichCard {
    RichCard {
        tone: CardTone::Info,
        icon: "🔬".to_string(),
        title: format!("AI Analysis: {}", analysis.report_type),
        summary: None,
        sections: vec![
            CardSection {
                heading: "Findings:".to_string(),
                body: Some(analysis.findings.clone()),
                items: Vec::new(),
            },
            CardSection {
                heading: "Recommendations:".to_string(),
                body: None,
                items: analysis.recommendations.clone(),
            },
        ],
        notice: None,
        badge: Some(analysis.urgency),
        actions: vec![ActionButton {
            action: ChatAction::ScheduleFollowUp,
            label: "📅 Schedule Follow-up".to_string(),
        }],
    }
}
