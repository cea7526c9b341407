use pretty_assertions::assert_eq;
use rstest::rstest;
use std::io::Write;
use tutorgrid_core::errors::SlotField;
use tutorgrid_core::models::{DayOfWeek, SessionType, SlotId};
use tutorgrid_core::store::{Directory, SlotStore};
use tutorgrid_db::models::DbSlot;
use tutorgrid_db::{load_seed, parse_seed};

const SEED: &str = r#"{
    "teachers": [
        { "id": "T1", "name": "Dana", "assigned_student_ids": ["S1", "S2"] },
        { "id": "T2", "name": "" }
    ],
    "students": [
        { "id": "S1", "name": "Noa" },
        { "id": "S2", "name": "Omer" }
    ],
    "weekly_schedule": [
        {
            "id": "00000000-0000-0000-0000-000000000001",
            "day_of_week": "Sunday",
            "start_time": "13:00",
            "end_time": "14:00",
            "room": "101",
            "teacher_id": "T1",
            "student_ids": ["S1", "S2"],
            "subject": "Math",
            "class_type": "private",
            "active": "yes"
        },
        {
            "id": "00000000-0000-0000-0000-000000000002",
            "day_of_week": "Monday",
            "start_time": "15:00",
            "end_time": "16:00",
            "room": "102",
            "teacher_id": "T2",
            "student_ids": ["S1"],
            "subject": "Hebrew",
            "active": "no"
        },
        {
            "day_of_week": "Funday",
            "start_time": "16:00",
            "end_time": "15:00",
            "room": "103",
            "teacher_id": "T1",
            "student_ids": [],
            "subject": "Math"
        }
    ]
}"#;

#[tokio::test]
async fn test_parse_seed_loads_valid_documents() {
    let seed = parse_seed(SEED).unwrap();

    assert_eq!(seed.slots.len(), 2);
    assert_eq!(seed.rejected.len(), 1);
    assert_eq!(seed.rejected[0].0, 2);

    let (store, directory) = seed.into_stores();
    let first = store.get(SlotId::from_u128(1)).await.unwrap().unwrap();
    assert_eq!(first.details.day(), DayOfWeek::Sunday);
    assert!(first.details.is_active());
    // class_type said private; two students make it a group
    assert_eq!(first.details.session_type(), SessionType::Group);

    let second = store.get(SlotId::from_u128(2)).await.unwrap().unwrap();
    assert!(!second.details.is_active());

    assert_eq!(directory.teachers().await.unwrap().len(), 2);
    assert_eq!(
        directory.teacher("T2".into()).await.unwrap().unwrap().display_name(),
        "Unnamed Teacher (T2)"
    );
}

#[test]
fn test_rejected_document_reports_every_field() {
    let seed = parse_seed(SEED).unwrap();
    let (_, errors) = &seed.rejected[0];

    assert!(errors.has(SlotField::DayOfWeek));
    assert!(errors.has(SlotField::StudentIds));
    assert!(errors.has(SlotField::EndTime));
}

#[test]
fn test_null_active_flag_keeps_the_document() {
    let raw = r#"{
        "weekly_schedule": [{
            "day_of_week": "Tuesday",
            "start_time": "13:00",
            "end_time": "14:00",
            "room": "101",
            "teacher_id": "T1",
            "student_ids": ["S1"],
            "subject": "Arabic",
            "active": null
        }]
    }"#;

    let seed = parse_seed(raw).unwrap();

    assert_eq!(seed.slots.len(), 1);
    assert!(seed.slots[0].details.is_active());
    assert!(seed.rejected.is_empty());
}

#[test]
fn test_malformed_json_fails_the_load() {
    assert!(parse_seed("{ not json").is_err());
}

#[test]
fn test_empty_document_is_an_empty_seed() {
    let seed = parse_seed("{}").unwrap();

    assert!(seed.slots.is_empty());
    assert!(seed.directory.is_empty());
}

#[rstest]
#[case(r#""yes""#, true)]
#[case(r#""no""#, false)]
#[case(r#""""#, true)]
#[case("true", true)]
#[case("false", false)]
#[case("null", true)]
fn test_active_flag_forms(#[case] flag: &str, #[case] expected: bool) {
    let raw = format!(r#"{{ "active": {} }}"#, flag);
    let slot: DbSlot = serde_json::from_str(&raw).unwrap();

    assert_eq!(slot.active, expected);
}

#[test]
fn test_active_defaults_to_true_and_room_id_alias() {
    let slot: DbSlot = serde_json::from_str(r#"{ "room_id": "204" }"#).unwrap();

    assert!(slot.active);
    assert_eq!(slot.room, "204");
}

#[test]
fn test_load_seed_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(SEED.as_bytes()).unwrap();

    let seed = load_seed(file.path()).unwrap();

    assert_eq!(seed.slots.len(), 2);
}

#[test]
fn test_load_seed_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    assert!(load_seed(dir.path().join("missing.json")).is_err());
}
