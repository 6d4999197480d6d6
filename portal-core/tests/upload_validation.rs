use chrono::{FixedOffset, TimeZone};
use portal_core::{
    format_file_size, validate_upload, Appointment, AppointmentStatus, FileCandidate, MimeType,
    PortalConfig, PortalConfigPatch, PortalError,
};

fn candidate(name: &str, mime: &str, size: u64) -> FileCandidate {
    FileCandidate {
        name: name.to_string(),
        mime: mime.to_string(),
        size,
    }
}

#[test]
fn accepts_allowed_types_including_jpg_alias() {
    let config = PortalConfig::default();
    for (mime, expected) in [
        ("application/pdf", MimeType::Pdf),
        ("image/jpeg", MimeType::Jpeg),
        ("image/jpg", MimeType::Jpeg),
        ("image/png", MimeType::Png),
    ] {
        let file = validate_upload(&candidate("report", mime, 2048), &config)
            .expect("Allowed type was rejected");
        assert_eq!(file.mime_type, expected);
        assert_eq!(file.size_bytes, 2048);
    }
}

#[test]
fn rejects_unknown_type_with_user_message() {
    let err = validate_upload(
        &candidate("notes.docx", "application/msword", 10),
        &PortalConfig::default(),
    )
    .unwrap_err();

    assert_eq!(
        err,
        PortalError::UnsupportedFileType("application/msword".to_string())
    );
    assert_eq!(err.to_string(), "Please upload PDF, JPG, or PNG files only.");
}

#[test]
fn size_limit_is_inclusive() {
    let config = PortalConfig::default();
    let limit = 10 * 1024 * 1024;

    assert!(validate_upload(&candidate("scan.png", "image/png", limit), &config).is_ok());

    let err = validate_upload(&candidate("scan.png", "image/png", limit + 1), &config).unwrap_err();
    assert_eq!(err.to_string(), "File size should be less than 10MB.");
}

#[test]
fn configured_limit_below_a_megabyte_is_reported_exactly() {
    let config = PortalConfig::from(PortalConfigPatch {
        max_upload_bytes: Some(500_000),
        ..PortalConfigPatch::default()
    });

    assert!(validate_upload(&candidate("scan.pdf", "application/pdf", 500_000), &config).is_ok());

    let err = validate_upload(&candidate("scan.pdf", "application/pdf", 600_000), &config)
        .unwrap_err();
    assert_eq!(err.to_string(), "File size should be less than 488.28 KB.");
}

#[test]
fn whole_megabyte_limit_keeps_compact_text() {
    let config = PortalConfig::from(PortalConfigPatch {
        max_upload_bytes: Some(5 * 1024 * 1024),
        ..PortalConfigPatch::default()
    });

    let err = validate_upload(&candidate("scan.png", "image/png", 6 * 1024 * 1024), &config)
        .unwrap_err();
    assert_eq!(err.to_string(), "File size should be less than 5MB.");
}

#[test]
fn type_is_checked_before_size() {
    let err = validate_upload(
        &candidate("movie.mp4", "video/mp4", u64::MAX),
        &PortalConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PortalError::UnsupportedFileType(_)));
}

#[test]
fn formats_sizes_like_the_upload_list() {
    assert_eq!(format_file_size(0), "0 Bytes");
    assert_eq!(format_file_size(512), "512 Bytes");
    assert_eq!(format_file_size(1536), "1.5 KB");
    assert_eq!(format_file_size(2048), "2 KB");
    assert_eq!(format_file_size(1_234_567), "1.18 MB");
    assert_eq!(format_file_size(10 * 1024 * 1024), "10 MB");
    assert_eq!(format_file_size(3 * 1024 * 1024 * 1024), "3 GB");
}

#[test]
fn guesses_mime_from_extension() {
    assert_eq!(MimeType::mime_for_file_name("Scan.JPG"), "image/jpeg");
    assert_eq!(MimeType::mime_for_file_name("lab.pdf"), "application/pdf");
    assert_eq!(
        MimeType::mime_for_file_name("README"),
        "application/octet-stream"
    );
}

#[test]
fn config_patch_overrides_only_given_fields() {
    let patch: PortalConfigPatch =
        serde_json::from_str(r#"{ "replyDelayMs": 10, "appointmentIdPrefix": "BK-" }"#)
            .expect("Patch JSON is invalid");
    let config = PortalConfig::from(patch);

    assert_eq!(config.reply_delay_ms, 10);
    assert_eq!(config.appointment_id_prefix, "BK-");
    assert_eq!(config.analysis_delay_ms, 2_000);
    assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
}

#[test]
fn appointment_id_uses_prefix_and_millis() {
    let offset = FixedOffset::east_opt(2 * 3600).expect("Invalid offset");
    let booked_at = offset
        .with_ymd_and_hms(2024, 3, 7, 9, 30, 0)
        .single()
        .expect("Ambiguous timestamp");

    let appointment = Appointment::confirmed("APT-", "Jane".to_string(), booked_at);

    assert_eq!(appointment.id, format!("APT-{}", booked_at.timestamp_millis()));
    assert_eq!(appointment.date, "3/7/2024");
    assert_eq!(appointment.status, AppointmentStatus::Confirmed);
}
