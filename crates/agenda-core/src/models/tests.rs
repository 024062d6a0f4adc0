use jiff::{
    civil::{date, DateTime},
    SignedDuration,
};

use super::*;

fn task_at(start_at: DateTime, end_at: Option<DateTime>) -> Task {
    Task {
        id: 1,
        client_id: None,
        order_id: None,
        kind: TaskKind::Generic,
        title: "Call".to_string(),
        description: None,
        start_at,
        end_at,
        status: TaskStatus::Pending,
        is_process: true,
        service: None,
        time_spent: None,
    }
}

#[test]
fn test_kind_labels_round_trip() {
    for kind in TaskKind::KNOWN {
        assert_eq!(TaskKind::from_label(kind.as_str()), kind);
    }
}

#[test]
fn test_kind_accepts_historical_aliases() {
    assert_eq!(TaskKind::from_label("r1"), TaskKind::FirstMeeting);
    assert_eq!(TaskKind::from_label("tache"), TaskKind::Generic);
    assert_eq!(TaskKind::from_label("à rappeller"), TaskKind::CallbackReminder);
    assert_eq!(TaskKind::from_label("First_Meeting"), TaskKind::FirstMeeting);
}

#[test]
fn test_unknown_kind_is_preserved() {
    let kind = TaskKind::from_label("workshop");
    assert_eq!(kind, TaskKind::Legacy("workshop".to_string()));
    assert_eq!(kind.as_str(), "workshop");
    assert!(kind.is_legacy());

    let json = serde_json::to_string(&kind).unwrap();
    assert_eq!(json, "\"workshop\"");
    let back: TaskKind = serde_json::from_str(&json).unwrap();
    assert_eq!(back, kind);
}

#[test]
fn test_status_parse() {
    assert_eq!("pending".parse::<TaskStatus>().unwrap(), TaskStatus::Pending);
    assert_eq!("DONE".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    assert_eq!("terminé".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    assert!("cancelled".parse::<TaskStatus>().is_err());
}

#[test]
fn test_complete_is_idempotent() {
    let mut task = task_at(date(2024, 6, 10).at(9, 0, 0, 0), None);
    assert!(task.complete());
    assert!(!task.complete());
    assert_eq!(task.status, TaskStatus::Done);
}

#[test]
fn test_reschedule_resets_done_task() {
    let mut task = task_at(date(2024, 6, 10).at(9, 0, 0, 0), None);
    task.complete();

    let start = date(2024, 6, 12).at(14, 0, 0, 0);
    let end = date(2024, 6, 12).at(15, 30, 0, 0);
    task.reschedule(start, Some(end)).unwrap();

    assert_eq!(task.status, TaskStatus::Pending);
    assert_eq!(task.start_at, start);
    assert_eq!(task.end_at, Some(end));
}

#[test]
fn test_reschedule_rejects_inverted_extent() {
    let original = date(2024, 6, 10).at(9, 0, 0, 0);
    let mut task = task_at(original, None);
    task.complete();

    let start = date(2024, 6, 12).at(14, 0, 0, 0);
    let err = task.reschedule(start, Some(start)).unwrap_err();

    assert!(err.is_validation());
    // No partial write
    assert_eq!(task.start_at, original);
    assert_eq!(task.status, TaskStatus::Done);
}

#[test]
fn test_validate_rejects_client_on_process_task() {
    let mut task = task_at(date(2024, 6, 10).at(9, 0, 0, 0), None);
    task.client_id = Some(3);
    assert!(task.validate().is_err());

    task.is_process = false;
    assert!(task.validate().is_ok());

    task.title = "   ".to_string();
    assert!(task.validate().is_err());
}

#[test]
fn test_days_spanned() {
    let single = task_at(date(2024, 6, 10).at(9, 0, 0, 0), None);
    assert_eq!(single.days().days().count(), 1);

    let multi = task_at(
        date(2024, 6, 10).at(22, 0, 0, 0),
        Some(date(2024, 6, 12).at(2, 0, 0, 0)),
    );
    assert_eq!(multi.days().start, date(2024, 6, 10));
    assert_eq!(multi.days().end, date(2024, 6, 12));

    let until_midnight = task_at(
        date(2024, 6, 10).at(22, 0, 0, 0),
        Some(date(2024, 6, 11).at(0, 0, 0, 0)),
    );
    assert_eq!(until_midnight.days().end, date(2024, 6, 10));
}

#[test]
fn test_time_spent_prefers_explicit_value() {
    let mut task = task_at(
        date(2024, 6, 10).at(9, 0, 0, 0),
        Some(date(2024, 6, 10).at(11, 0, 0, 0)),
    );
    assert_eq!(task.time_spent_or_extent(), SignedDuration::from_hours(2));

    task.time_spent = Some(SignedDuration::from_mins(45));
    assert_eq!(task.time_spent_or_extent(), SignedDuration::from_mins(45));

    let point = task_at(date(2024, 6, 10).at(9, 0, 0, 0), None);
    assert_eq!(point.time_spent_or_extent(), SignedDuration::ZERO);
}

#[test]
fn test_delivery_storage_mapping() {
    for delivery in [Delivery::Unset, Delivery::Delivered, Delivery::NotDelivered] {
        assert_eq!(Delivery::from_db(delivery.to_db()), delivery);
    }
    assert!(Delivery::Delivered.is_delivered());
    assert!(!Delivery::NotDelivered.is_delivered());
}
