mod test_utils;

use std::sync::Arc;

use mockall::predicate::{always, eq};

use pretty_assertions::assert_eq;
use tutorgrid_api::Scheduler;
use tutorgrid_core::conflict::ContendedResource;
use tutorgrid_core::errors::{ScheduleError, SlotField};
use tutorgrid_core::lanes::{FreeLanes, RoomColumns};
use tutorgrid_core::models::{DayOfWeek, SlotId, SlotPatch};
use tutorgrid_core::store::SlotStore;
use tutorgrid_core::week::SlotFilter;
use tutorgrid_db::mock::{MockDirectory, MockSlotStore};

use test_utils::{directory, draft, grid, slot, TestContext};

#[tokio::test]
async fn test_create_slot_stores_valid_slot() {
    let ctx = TestContext::new();

    let created = ctx
        .scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]))
        .await
        .unwrap();

    assert_eq!(ctx.store.list_all().await.unwrap(), vec![created]);
}

#[tokio::test]
async fn test_create_slot_rejects_teacher_double_booking() {
    let ctx = TestContext::with_slots(vec![slot(1, DayOfWeek::Monday, "14:00", "16:00", "101", "T1", &["S1"])]);

    let err = ctx
        .scheduler
        .create_slot(draft(DayOfWeek::Monday, "15:00", "17:00", "102", "T1", &["S2"]))
        .await
        .unwrap_err();

    match err {
        ScheduleError::Conflict(report) => {
            assert_eq!(report.slot_ids().into_iter().collect::<Vec<_>>(), vec![SlotId::from_u128(1)]);
            assert_eq!(
                report.conflicts[0].resources,
                vec![ContendedResource::Teacher("T1".into())]
            );
        }
        other => panic!("expected conflict, got {:?}", other),
    }
    assert_eq!(ctx.store.list_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_slot_allows_touching_sessions() {
    let ctx = TestContext::with_slots(vec![slot(1, DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"])]);

    let result = ctx
        .scheduler
        .create_slot(draft(DayOfWeek::Monday, "14:00", "15:00", "101", "T1", &["S1"]))
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_create_slot_rejects_board_misaligned_times() {
    let ctx = TestContext::new();

    let err = ctx
        .scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:30", "21:00", "101", "T1", &["S1"]))
        .await
        .unwrap_err();

    let ScheduleError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.has(SlotField::StartTime));
    assert!(errors.has(SlotField::EndTime));
}

#[tokio::test]
async fn test_create_slot_checks_references() {
    let ctx = TestContext::new();

    let err = ctx
        .scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T9", &["S1", "S9"]))
        .await
        .unwrap_err();

    let ScheduleError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert!(errors.has(SlotField::TeacherId));
    assert_eq!(errors.for_field(SlotField::StudentIds).count(), 1);
}

#[tokio::test]
async fn test_roster_enforcement() {
    let store = Arc::new(tutorgrid_db::InMemorySlotStore::new());
    let scheduler = Scheduler::new(store, Arc::new(directory()), grid()).with_roster_enforcement(true);

    let err = scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1", "S3"]))
        .await
        .unwrap_err();
    let ScheduleError::Validation(errors) = err else {
        panic!("expected validation error");
    };
    assert_eq!(
        errors.for_field(SlotField::StudentIds).next().map(|e| e.message.as_str()),
        Some("student 'S3' is not assigned to teacher 'T1'")
    );

    let ok = scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1", "S2"]))
        .await;
    assert!(ok.is_ok());
}

#[tokio::test]
async fn test_invalid_draft_never_reaches_store() {
    let mut store = MockSlotStore::new();
    store.expect_list_all().never();
    store.expect_create().never();

    let scheduler = Scheduler::new(Arc::new(store), Arc::new(MockDirectory::new()), grid()).with_reference_checks(false);

    let err = scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &[]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScheduleError::Validation(ref errors) if errors.has(SlotField::StudentIds)));
}

#[tokio::test]
async fn test_storage_failure_propagates_without_write() {
    let mut store = MockSlotStore::new();
    store
        .expect_list_all()
        .times(1)
        .returning(|| Err(eyre::eyre!("store unreachable")));
    store.expect_create().never();

    let scheduler = Scheduler::new(Arc::new(store), Arc::new(MockDirectory::new()), grid()).with_reference_checks(false);

    let err = scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]))
        .await
        .unwrap_err();

    assert!(matches!(err, ScheduleError::Storage(_)));
    assert!(err.to_string().contains("store unreachable"));
}

#[tokio::test]
async fn test_update_slot_excludes_itself() {
    let ctx = TestContext::with_slots(vec![slot(1, DayOfWeek::Monday, "13:00", "15:00", "101", "T1", &["S1"])]);

    let patch = SlotPatch {
        end_time: tutorgrid_core::models::time::parse("16:00"),
        ..SlotPatch::default()
    };
    let updated = ctx.scheduler.update_slot(SlotId::from_u128(1), patch).await.unwrap();

    assert_eq!(updated.id, SlotId::from_u128(1));
    assert_eq!(updated.details.duration_minutes(), 180);
    assert_eq!(ctx.store.get(SlotId::from_u128(1)).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn test_update_slot_writes_only_the_edited_slot() {
    let existing = slot(1, DayOfWeek::Monday, "13:00", "15:00", "101", "T1", &["S1"]);
    let mut store = MockSlotStore::new();
    let stored = existing.clone();
    store
        .expect_get()
        .with(eq(SlotId::from_u128(1)))
        .times(1)
        .returning(move |_| Ok(Some(stored.clone())));
    let listed = existing.clone();
    store.expect_list_all().times(1).returning(move || Ok(vec![listed.clone()]));
    store
        .expect_update()
        .with(eq(SlotId::from_u128(1)), always())
        .times(1)
        .returning(|_, _| Ok(()));
    store.expect_create().never();

    let scheduler = Scheduler::new(Arc::new(store), Arc::new(MockDirectory::new()), grid()).with_reference_checks(false);
    let patch = SlotPatch {
        room_id: Some("102".into()),
        ..SlotPatch::default()
    };

    let updated = scheduler.update_slot(SlotId::from_u128(1), patch).await.unwrap();

    assert_eq!(updated.details.room_id().as_str(), "102");
}

#[tokio::test]
async fn test_update_slot_into_collision() {
    let ctx = TestContext::with_slots(vec![
        slot(1, DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]),
        slot(2, DayOfWeek::Tuesday, "13:00", "14:00", "101", "T2", &["S3"]),
    ]);

    let patch = SlotPatch {
        day_of_week: Some(DayOfWeek::Monday),
        ..SlotPatch::default()
    };
    let err = ctx.scheduler.update_slot(SlotId::from_u128(2), patch).await.unwrap_err();

    assert!(matches!(err, ScheduleError::Conflict(_)));
    let unchanged = ctx.store.get(SlotId::from_u128(2)).await.unwrap().unwrap();
    assert_eq!(unchanged.details.day(), DayOfWeek::Tuesday);
}

#[tokio::test]
async fn test_update_and_delete_unknown_slot() {
    let ctx = TestContext::new();
    let missing = SlotId::from_u128(7);

    let update = ctx.scheduler.update_slot(missing, SlotPatch::default()).await;
    let delete = ctx.scheduler.delete_slot(missing).await;

    assert!(matches!(update, Err(ScheduleError::NotFound(_))));
    assert!(matches!(delete, Err(ScheduleError::NotFound(_))));
}

#[tokio::test]
async fn test_delete_slot() {
    let ctx = TestContext::with_slots(vec![slot(1, DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"])]);

    ctx.scheduler.delete_slot(SlotId::from_u128(1)).await.unwrap();

    assert!(ctx.store.list_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_inactive_slots_are_not_gated() {
    let mut paused = slot(1, DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]);
    paused.details = paused.details.with_active(false);
    let ctx = TestContext::with_slots(vec![paused]);

    // An inactive existing slot does not block an active one
    ctx.scheduler
        .create_slot(draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]))
        .await
        .unwrap();

    // An inactive candidate may overlap the active one
    let mut inactive = draft(DayOfWeek::Monday, "13:00", "14:00", "101", "T1", &["S1"]);
    inactive.active = false;
    ctx.scheduler.create_slot(inactive).await.unwrap();

    assert_eq!(ctx.store.list_all().await.unwrap().len(), 3);
    assert!(ctx.scheduler.audit().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_audit_reports_stored_conflicts() {
    let ctx = TestContext::with_slots(vec![
        slot(1, DayOfWeek::Monday, "13:00", "15:00", "101", "T1", &["S1"]),
        slot(2, DayOfWeek::Monday, "14:00", "16:00", "101", "T2", &["S3"]),
        slot(3, DayOfWeek::Tuesday, "14:00", "16:00", "101", "T2", &["S3"]),
    ]);

    let pairs = ctx.scheduler.audit().await.unwrap();

    assert_eq!(pairs.len(), 1);
    assert_eq!((pairs[0].first, pairs[0].second), (SlotId::from_u128(1), SlotId::from_u128(2)));
    assert_eq!(pairs[0].resources, vec![ContendedResource::Room("101".into())]);
}

#[tokio::test]
async fn test_week_board_for_teacher_flags_outside_conflicts() {
    let ctx = TestContext::with_slots(vec![
        slot(1, DayOfWeek::Monday, "13:00", "15:00", "101", "T1", &["S1"]),
        slot(2, DayOfWeek::Monday, "14:00", "16:00", "101", "T2", &["S3"]),
    ]);

    let board = ctx
        .scheduler
        .week_board(&SlotFilter::for_teacher("T1".into()), &FreeLanes)
        .await
        .unwrap();

    let monday = board.day(DayOfWeek::Monday).unwrap();
    assert_eq!(monday.layout.placed_ids().into_iter().collect::<Vec<_>>(), vec![SlotId::from_u128(1)]);
    assert!(monday.conflicts.contains(&SlotId::from_u128(1)));
    assert_eq!(board.days.len(), 7);
}

#[tokio::test]
async fn test_day_board_by_room() {
    let ctx = TestContext::with_slots(vec![
        slot(1, DayOfWeek::Sunday, "13:00", "14:00", "102", "T1", &["S1"]),
        slot(2, DayOfWeek::Sunday, "13:00", "14:00", "101", "T2", &["S3"]),
        slot(3, DayOfWeek::Monday, "13:00", "14:00", "103", "T2", &["S3"]),
    ]);

    let board = ctx
        .scheduler
        .day_board(DayOfWeek::Sunday, &SlotFilter::default(), &RoomColumns::from_day())
        .await
        .unwrap();

    // Room 103 is only used on Monday but still gets a Sunday column
    assert_eq!(board.day, DayOfWeek::Sunday);
    assert_eq!(board.layout.lane_count(), 3);
    assert_eq!(board.layout.placed_ids().len(), 2);
    assert!(board.conflicts.is_empty());
}

#[tokio::test]
async fn test_selectable_students() {
    let ctx = TestContext::new();

    let students = ctx.scheduler.selectable_students("T1".into()).await.unwrap();
    let names: Vec<String> = students.iter().map(|s| s.display_name()).collect();

    assert_eq!(names, vec!["Noa".to_string(), "Omer".to_string()]);
    assert!(matches!(
        ctx.scheduler.selectable_students("T9".into()).await,
        Err(ScheduleError::NotFound(_))
    ));
}
