use chrono::{FixedOffset, TimeZone};
use portal_core::{
    AppointmentStatus, ChatAction, FileCandidate, MessageBody, Modal, PortalConfig, Sender,
    ToastKind, ToastPhase,
};
use portal_engine::{Outcome, PortalController, UiEffect, VirtualRuntime};

fn runtime() -> VirtualRuntime {
    VirtualRuntime::new(PortalController::with_seed(PortalConfig::default(), 7))
}

fn file(name: &str, mime: &str, size: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        mime: mime.to_string(),
        size,
    }
}

fn count_toasts(rt: &VirtualRuntime, kind: ToastKind) -> usize {
    rt.raised_toasts()
        .iter()
        .filter(|raised| raised.toast.kind == kind)
        .count()
}

#[test]
fn rejected_upload_leaves_list_unchanged() {
    let mut rt = runtime();
    rt.dispatch(|c| {
        c.upload_files([
            file("notes.txt", "text/plain", 100),
            file("huge.pdf", "application/pdf", 10 * 1024 * 1024 + 1),
        ])
    });

    assert!(rt.controller().files().is_empty());
    assert!(!rt.controller().has_uploads());
    assert_eq!(count_toasts(&rt, ToastKind::Error), 2);

    rt.run_until_idle();
    assert_eq!(rt.controller().transcript().len(), 1, "only the welcome message");
}

#[test]
fn accepted_upload_is_analysed_after_delay() {
    let mut rt = runtime();
    rt.dispatch(|c| c.upload_files([file("blood.pdf", "application/pdf", 2048)]));

    assert_eq!(rt.controller().files().len(), 1);
    assert!(rt.controller().has_uploads());
    let transcript_before = rt.controller().transcript().len();

    rt.advance(1_999);
    assert_eq!(rt.controller().transcript().len(), transcript_before);
    assert_eq!(count_toasts(&rt, ToastKind::Success), 0);

    rt.advance(1);
    assert_eq!(rt.controller().transcript().len(), transcript_before + 1);
    assert_eq!(count_toasts(&rt, ToastKind::Success), 1);

    let last = rt.controller().transcript().last().expect("Missing analysis");
    assert_eq!(last.sender, Sender::Bot);
    let MessageBody::Rich(card) = &last.body else {
        panic!("Analysis should be a card");
    };
    assert!(card.title.starts_with("AI Analysis: "));
    assert!(card.badge.is_some());
    assert_eq!(card.actions[0].action, ChatAction::ScheduleFollowUp);
}

#[test]
fn drop_clears_the_drag_highlight() {
    let mut rt = runtime();
    assert!(!rt.controller().is_drag_active());

    rt.dispatch(|c| {
        c.set_drag_active(true);
        Outcome::default()
    });
    assert!(rt.controller().is_drag_active());

    rt.dispatch(|c| c.upload_files([file("xray.png", "image/png", 4096)]));
    assert!(!rt.controller().is_drag_active());
    assert_eq!(rt.controller().files().len(), 1);
}

#[test]
fn drag_leave_clears_highlight_without_uploading() {
    let mut rt = runtime();
    rt.dispatch(|c| {
        c.set_drag_active(true);
        c.set_drag_active(false);
        Outcome::default()
    });

    assert!(!rt.controller().is_drag_active());
    assert!(rt.controller().files().is_empty());
    assert!(rt.raised_toasts().is_empty());
}

#[test]
fn removing_by_name_drops_duplicates_together() {
    let mut rt = runtime();
    rt.dispatch(|c| {
        c.upload_files([
            file("scan.png", "image/png", 10),
            file("scan.png", "image/png", 20),
            file("ecg.pdf", "application/pdf", 30),
        ])
    });
    assert_eq!(rt.controller().files().len(), 3);

    rt.dispatch(|c| c.remove_file("scan.png"));
    let names: Vec<&str> = rt
        .controller()
        .files()
        .iter()
        .map(|f| f.name.as_str())
        .collect();
    assert_eq!(names, vec!["ecg.pdf"]);
    assert!(rt.controller().has_uploads());

    rt.dispatch(|c| c.remove_file("ecg.pdf"));
    assert!(!rt.controller().has_uploads());
    assert_eq!(count_toasts(&rt, ToastKind::Info), 2);
}

#[test]
fn analysis_still_arrives_for_removed_file() {
    let mut rt = runtime();
    rt.dispatch(|c| c.upload_files([file("xray.jpg", "image/jpg", 4096)]));
    rt.dispatch(|c| c.remove_file("xray.jpg"));
    rt.advance(2_000);

    assert_eq!(rt.controller().transcript().len(), 2);
}

#[test]
fn chat_reply_follows_typing_indicator() {
    let mut rt = runtime();
    rt.dispatch(|c| c.send_message("  I need urgent help  "));

    let controller = rt.controller();
    assert!(controller.is_typing());
    let user = controller.transcript().last().expect("Missing user message");
    assert_eq!(user.sender, Sender::User);
    assert_eq!(user.body, MessageBody::PlainText("I need urgent help".to_string()));
    assert!(rt.effects().contains(&UiEffect::ClearChatInput));

    rt.advance(1_499);
    assert!(rt.controller().is_typing());

    rt.advance(1);
    assert!(!rt.controller().is_typing());
    let reply = rt.controller().transcript().last().expect("Missing reply");
    assert_eq!(reply.sender, Sender::Bot);
    assert!(matches!(&reply.body, MessageBody::Rich(card) if card.title == "Emergency Response"));
}

#[test]
fn blank_message_is_ignored() {
    let mut rt = runtime();
    rt.dispatch(|c| c.send_message("   "));

    assert_eq!(rt.controller().transcript().len(), 1);
    assert_eq!(rt.pending(), 0);
    assert!(rt.effects().is_empty());
}

#[test]
fn reply_is_delivered_after_chat_is_closed() {
    let mut rt = runtime();
    rt.dispatch(|c| c.open_chatbot());
    rt.dispatch(|c| c.quick_message("book an appointment"));
    rt.dispatch(|c| c.close_chatbot());
    rt.run_until_idle();

    assert!(!rt.controller().is_open(Modal::Chatbot));
    let reply = rt.controller().transcript().last().expect("Missing reply");
    assert!(matches!(&reply.body, MessageBody::Rich(card) if card.title == "Book Appointment"));
}

#[test]
fn overlapping_messages_keep_indicator_until_last_reply() {
    let mut rt = runtime();
    rt.dispatch(|c| c.send_message("first"));
    rt.advance(500);
    rt.dispatch(|c| c.send_message("second"));

    rt.advance(1_000);
    assert_eq!(rt.controller().pending_replies(), 1);
    assert!(rt.controller().is_typing());

    rt.advance(500);
    assert!(!rt.controller().is_typing());
    assert_eq!(rt.controller().transcript().len(), 5);
}

#[test]
fn booking_records_confirmed_appointment() {
    let mut rt = runtime();
    let booked_at = FixedOffset::west_opt(5 * 3600)
        .expect("Invalid offset")
        .with_ymd_and_hms(2024, 11, 2, 14, 0, 0)
        .single()
        .expect("Ambiguous timestamp");

    rt.dispatch(|c| c.book_appointment("Jane", booked_at));

    let appointment = rt.controller().appointments().last().expect("No appointment");
    assert_eq!(appointment.patient_name, "Jane");
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
    assert!(appointment.id.starts_with("APT-"));
    assert_eq!(appointment.date, "11/2/2024");

    let raised = rt.raised_toasts().last().expect("No toast");
    assert_eq!(raised.toast.kind, ToastKind::Success);
    assert!(raised.toast.message.contains(&appointment.id));
    assert!(rt.effects().contains(&UiEffect::ResetAppointmentForm));
}

#[test]
fn blank_patient_name_defaults() {
    let mut rt = runtime();
    let booked_at = FixedOffset::east_opt(0)
        .expect("Invalid offset")
        .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .expect("Ambiguous timestamp");

    rt.dispatch(|c| c.book_appointment("  ", booked_at));
    assert_eq!(rt.controller().appointments()[0].patient_name, "Patient");
}

#[test]
fn toast_slides_out_at_five_seconds_and_is_gone_after_transition() {
    let mut rt = runtime();
    rt.dispatch(|c| c.notify("Saved", ToastKind::Success));
    let id = rt.raised_toasts()[0].toast.id;

    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Entering));

    rt.advance(100);
    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Shown));

    rt.advance(4_899);
    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Shown));

    rt.advance(1);
    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Leaving));

    rt.advance(299);
    assert!(rt.controller().toast(id).is_some());

    rt.advance(1);
    assert!(rt.controller().toast(id).is_none());
    assert_eq!(rt.pending(), 0);
}

#[test]
fn late_reveal_does_not_undo_slide_out() {
    let config = PortalConfig {
        toast_enter_ms: 200,
        toast_visible_ms: 100,
        ..PortalConfig::default()
    };
    let mut rt = VirtualRuntime::new(PortalController::with_seed(config, 7));
    rt.dispatch(|c| c.notify("Saved", ToastKind::Success));
    let id = rt.raised_toasts()[0].toast.id;

    rt.advance(100);
    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Leaving));

    rt.advance(150);
    assert_eq!(rt.controller().toast(id).map(|t| t.phase), Some(ToastPhase::Leaving));

    rt.advance(149);
    assert!(rt.controller().toast(id).is_some());

    rt.advance(1);
    assert!(rt.controller().toast(id).is_none());
}

#[test]
fn dismissed_toast_ignores_later_timers() {
    let mut rt = runtime();
    rt.dispatch(|c| c.notify("first", ToastKind::Info));
    rt.dispatch(|c| c.notify("second", ToastKind::Warning));
    let first = rt.raised_toasts()[0].toast.id;

    rt.dispatch(|c| {
        assert!(c.dismiss_toast(first));
        Outcome::default()
    });
    assert_eq!(rt.controller().toasts().len(), 1);

    rt.run_until_idle();
    assert!(rt.controller().toasts().is_empty());
}

#[test]
fn video_call_handshake_raises_two_toasts() {
    let mut rt = runtime();
    rt.dispatch(|c| c.start_video_call());
    assert!(rt.controller().is_open(Modal::VideoCall));
    assert_eq!(rt.raised_toasts()[0].toast.message, "Connecting to doctor...");

    rt.advance(3_000);
    let connected = &rt.raised_toasts()[1];
    assert_eq!(connected.at_ms, 3_000);
    assert_eq!(connected.toast.kind, ToastKind::Success);

    rt.dispatch(|c| c.end_video_call());
    assert!(!rt.controller().is_open(Modal::VideoCall));
    assert_eq!(
        rt.raised_toasts().last().map(|r| r.toast.message.as_str()),
        Some("Video call ended")
    );
}

#[test]
fn chatbot_toggle_is_idempotent_per_call() {
    let mut rt = runtime();
    rt.dispatch(|c| c.toggle_chatbot());
    assert!(rt.controller().is_open(Modal::Chatbot));
    assert_eq!(rt.effects(), &[UiEffect::FocusChatInput]);

    rt.dispatch(|c| c.open_chatbot());
    assert!(rt.controller().is_open(Modal::Chatbot));

    rt.dispatch(|c| c.toggle_chatbot());
    rt.dispatch(|c| c.close_chatbot());
    assert!(!rt.controller().is_open(Modal::Chatbot));
}

#[test]
fn follow_up_action_scrolls_to_booking_and_replies() {
    let mut rt = runtime();
    rt.dispatch(|c| c.run_action(ChatAction::ScheduleFollowUp));

    assert!(rt
        .effects()
        .contains(&UiEffect::ScrollToSection("appointments")));
    let reply = rt.controller().transcript().last().expect("Missing reply");
    assert!(matches!(&reply.body, MessageBody::PlainText(text) if text.starts_with("Great!")));
    assert_eq!(count_toasts(&rt, ToastKind::Info), 1);
}

#[test]
fn emergency_and_store_actions_only_emit_effects() {
    let mut rt = runtime();
    rt.dispatch(|c| c.run_action(ChatAction::CallEmergency));
    rt.dispatch(|c| c.run_action(ChatAction::VisitStore));

    assert!(matches!(rt.effects()[0], UiEffect::Alert(_)));
    assert_eq!(rt.effects()[1], UiEffect::ScrollToSection("store"));
    assert!(rt.raised_toasts().is_empty());
}

#[test]
fn pharmacy_question_opens_assistant_and_gets_medicine_reply() {
    let mut rt = runtime();
    rt.dispatch(|c| c.ask_assistant("I need medicine information"));

    assert!(rt.controller().is_open(Modal::Chatbot));
    assert!(rt.controller().is_typing());
    assert_eq!(rt.effects()[0], UiEffect::FocusChatInput);

    rt.run_until_idle();
    let reply = rt.controller().transcript().last().expect("Missing reply");
    assert_eq!(reply.sender, Sender::Bot);
    assert!(matches!(&reply.body, MessageBody::Rich(_)));
}

#[test]
fn seeded_controllers_pick_the_same_analysis() {
    let mut first = runtime();
    let mut second = runtime();
    for rt in [&mut first, &mut second] {
        rt.dispatch(|c| c.upload_files([file("a.pdf", "application/pdf", 1)]));
        rt.run_until_idle();
    }

    assert_eq!(
        first.controller().transcript().last(),
        second.controller().transcript().last()
    );
}
