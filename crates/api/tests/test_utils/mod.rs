#![allow(dead_code)]

use std::sync::Arc;

use axum_test::TestServer;
use tutorgrid_api::{router, ApiState, Scheduler};
use tutorgrid_core::models::{time, DayOfWeek, ScheduleSlot, SlotDraft, SlotId, Student, Subject, Teacher, TimeGrid};
use tutorgrid_core::store::{Directory, SlotStore};
use tutorgrid_db::{InMemoryDirectory, InMemorySlotStore};

pub fn grid() -> TimeGrid {
    TimeGrid::hourly(13, 20).unwrap()
}

/// T1 teaches S1 and S2, T2 teaches S3; S4 is nobody's.
pub fn directory() -> InMemoryDirectory {
    let teacher = |id: &str, name: &str, students: &[&str]| Teacher {
        id: id.into(),
        name: name.to_string(),
        assigned_student_ids: students.iter().map(|s| (*s).into()).collect(),
    };
    let student = |id: &str, name: &str| Student {
        id: id.into(),
        name: name.to_string(),
    };

    InMemoryDirectory::new(
        vec![teacher("T1", "Dana", &["S1", "S2"]), teacher("T2", "Yossi", &["S3"])],
        vec![
            student("S1", "Noa"),
            student("S2", "Omer"),
            student("S3", "Lior"),
            student("S4", "Maya"),
        ],
    )
}

pub fn draft(day: DayOfWeek, start: &str, end: &str, room: &str, teacher: &str, students: &[&str]) -> SlotDraft {
    SlotDraft {
        day_of_week: Some(day),
        start_time: time::parse(start),
        end_time: time::parse(end),
        room_id: Some(room.into()),
        teacher_id: Some(teacher.into()),
        student_ids: students.iter().map(|s| (*s).into()).collect(),
        subject: Some(Subject::Math),
        active: true,
    }
}

pub fn slot(
    id: u128,
    day: DayOfWeek,
    start: &str,
    end: &str,
    room: &str,
    teacher: &str,
    students: &[&str],
) -> ScheduleSlot {
    let details = draft(day, start, end, room, teacher, students).validate().unwrap();
    ScheduleSlot::new(SlotId::from_u128(id), details)
}

pub struct TestContext {
    pub store: Arc<InMemorySlotStore>,
    pub scheduler: Scheduler,
}

impl TestContext {
    pub fn with_slots(slots: Vec<ScheduleSlot>) -> Self {
        let store = Arc::new(InMemorySlotStore::with_slots(slots));
        let directory: Arc<dyn Directory> = Arc::new(directory());
        let scheduler = Scheduler::new(store.clone() as Arc<dyn SlotStore>, directory, grid());
        Self { store, scheduler }
    }

    pub fn new() -> Self {
        Self::with_slots(Vec::new())
    }
}

pub fn server(slots: Vec<ScheduleSlot>) -> TestServer {
    let TestContext { scheduler, .. } = TestContext::with_slots(slots);
    TestServer::new(router(Arc::new(ApiState::new(scheduler)))).unwrap()
}
