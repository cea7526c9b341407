use std::collections::BTreeSet;
use std::error::Error;
use tutorgrid_core::conflict::{Conflict, ConflictReport, ContendedResource};
use tutorgrid_core::errors::{ScheduleError, ScheduleResult, SlotField, ValidationErrors};
use tutorgrid_core::models::{SlotId, TeacherId};

#[test]
fn test_schedule_error_display() {
    let not_found = ScheduleError::NotFound("Slot not found".to_string());
    let validation = ScheduleError::Validation(ValidationErrors::single(SlotField::RoomId, "is required"));
    let storage = ScheduleError::Storage(eyre::eyre!("store unreachable"));
    let conflict = ScheduleError::Conflict(ConflictReport {
        conflicts: vec![Conflict {
            slot_id: SlotId::from_u128(1),
            resources: vec![ContendedResource::Teacher(TeacherId::from("TeacherX"))],
        }],
    });

    assert_eq!(not_found.to_string(), "Resource not found: Slot not found");
    assert_eq!(validation.to_string(), "Validation error: room_id is required");
    assert!(storage.to_string().contains("Storage error:"));
    assert_eq!(
        conflict.to_string(),
        "Schedule conflict: collides with 1 slot(s): 00000000-0000-0000-0000-000000000001 (teacher TeacherX)"
    );
}

#[test]
fn test_validation_errors_join_fields() {
    let mut errors = ValidationErrors::new();
    errors.push(SlotField::StartTime, "is required");
    errors.push(SlotField::StudentIds, "must contain at least one student");

    assert_eq!(
        errors.to_string(),
        "start_time is required; student_ids must contain at least one student"
    );
    assert_eq!(errors.for_field(SlotField::StartTime).count(), 1);
    assert!(errors.clone().into_result().is_err());
    assert!(ValidationErrors::new().into_result().is_ok());
}

#[test]
fn test_extend_unreported_skips_fields_already_flagged() {
    let mut errors = ValidationErrors::single(SlotField::DayOfWeek, "unknown day of week 'Funday'");
    let mut later = ValidationErrors::new();
    later.push(SlotField::DayOfWeek, "is required");
    later.push(SlotField::Subject, "is required");

    errors.extend_unreported(later);

    assert_eq!(errors.len(), 2);
    assert_eq!(
        errors.for_field(SlotField::DayOfWeek).next().map(|e| e.message.as_str()),
        Some("unknown day of week 'Funday'")
    );
}

#[test]
fn test_conversions_into_schedule_error() {
    let from_validation: ScheduleError = ValidationErrors::single(SlotField::Subject, "is required").into();
    let from_report: ScheduleError = eyre::eyre!("write failed").into();

    assert!(matches!(from_validation, ScheduleError::Validation(_)));
    assert!(matches!(from_report, ScheduleError::Storage(_)));
    assert!(ScheduleError::Validation(ValidationErrors::new()).source().is_some());
}

#[test]
fn test_schedule_result() {
    let result: ScheduleResult<i32> = Ok(42);
    assert_eq!(result.unwrap(), 42);

    let result: ScheduleResult<BTreeSet<SlotId>> = Err(ScheduleError::NotFound("Not found".to_string()));
    assert!(result.is_err());
}
