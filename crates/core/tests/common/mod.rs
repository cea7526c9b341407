#![allow(dead_code)]

use chrono::NaiveTime;
use std::collections::BTreeSet;
use tutorgrid_core::models::{DayOfWeek, ScheduleSlot, SlotDetails, SlotDraft, SlotId, StudentId, Subject};

pub fn t(value: &str) -> NaiveTime {
    NaiveTime::parse_from_str(value, "%H:%M").expect("fixture time must be HH:MM")
}

pub fn students(ids: &[&str]) -> BTreeSet<StudentId> {
    ids.iter().map(|id| StudentId::from(*id)).collect()
}

pub fn details(day: DayOfWeek, start: &str, end: &str, room: &str, teacher: &str, student_ids: &[&str]) -> SlotDetails {
    SlotDraft {
        day_of_week: Some(day),
        start_time: Some(t(start)),
        end_time: Some(t(end)),
        room_id: Some(room.into()),
        teacher_id: Some(teacher.into()),
        student_ids: students(student_ids),
        subject: Some(Subject::Math),
        active: true,
    }
    .validate()
    .expect("fixture slot must be valid")
}

pub fn slot(
    id: u128,
    day: DayOfWeek,
    start: &str,
    end: &str,
    room: &str,
    teacher: &str,
    student_ids: &[&str],
) -> ScheduleSlot {
    ScheduleSlot::new(SlotId::from_u128(id), details(day, start, end, room, teacher, student_ids))
}

/// A Monday slot with unique resources, so only time decides overlap.
pub fn lone(id: u128, start: &str, end: &str) -> ScheduleSlot {
    let room = format!("room-{}", id);
    let teacher = format!("teacher-{}", id);
    let student = format!("student-{}", id);
    slot(id, DayOfWeek::Monday, start, end, &room, &teacher, &[student.as_str()])
}
