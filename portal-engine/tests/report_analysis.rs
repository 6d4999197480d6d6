use portal_core::{CardTone, ChatAction, Urgency};
use portal_engine::{
    analysis_card, analysis_template, pick_analysis, PortalController, TEMPLATE_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn templates_cover_blood_xray_and_ecg() {
    let types: Vec<String> = (0..TEMPLATE_COUNT)
        .map(|index| analysis_template(index).report_type)
        .collect();
    assert_eq!(types, vec!["Blood Test", "X-Ray", "ECG"]);

    let xray = analysis_template(1);
    assert_eq!(xray.urgency, Urgency::None);
    assert_eq!(xray.recommendations.len(), 3);
}

#[test]
fn pick_only_returns_known_templates() {
    let mut rng = StdRng::seed_from_u64(42);
    let known: Vec<_> = (0..TEMPLATE_COUNT).map(analysis_template).collect();

    let mut seen = Vec::new();
    for _ in 0..200 {
        let analysis = pick_analysis(&mut rng);
        assert!(known.contains(&analysis));
        if !seen.contains(&analysis.report_type) {
            seen.push(analysis.report_type);
        }
    }
    assert_eq!(seen.len(), TEMPLATE_COUNT, "every template should come up");
}

#[test]
fn analysis_card_lists_findings_and_follow_up() {
    let card = analysis_card(&analysis_template(2));

    assert_eq!(card.tone, CardTone::Info);
    assert_eq!(card.title, "AI Analysis: ECG");
    assert_eq!(card.sections[0].heading, "Findings:");
    assert!(card.sections[0]
        .body
        .as_deref()
        .is_some_and(|body| body.contains("sinus rhythm")));
    assert_eq!(card.sections[1].items.len(), 3);
    assert_eq!(card.badge.map(Urgency::level), Some("low"));
    assert_eq!(card.actions[0].action, ChatAction::ScheduleFollowUp);
}

#[test]
fn operations_without_side_effects_return_empty_outcomes() {
    let mut controller = PortalController::with_seed(Default::default(), 1);

    assert!(controller.send_message("\n\t ").is_empty());
    assert!(controller.close_chatbot().is_empty());
    assert!(!controller.open_chatbot().is_empty());
}
