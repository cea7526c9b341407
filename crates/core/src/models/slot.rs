use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use super::ids::{RoomId, SlotId, StudentId, TeacherId};
use super::time;
use crate::errors::{SlotField, ValidationErrors};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DayOfWeek {
    #[serde(alias = "sunday")]
    Sunday,
    #[serde(alias = "monday")]
    Monday,
    #[serde(alias = "tuesday")]
    Tuesday,
    #[serde(alias = "wednesday")]
    Wednesday,
    #[serde(alias = "thursday")]
    Thursday,
    #[serde(alias = "friday")]
    Friday,
    #[serde(alias = "saturday")]
    Saturday,
}

impl DayOfWeek {
    /// Sunday-first, the order the week board is rendered in.
    pub const ALL: [DayOfWeek; 7] = [
        DayOfWeek::Sunday,
        DayOfWeek::Monday,
        DayOfWeek::Tuesday,
        DayOfWeek::Wednesday,
        DayOfWeek::Thursday,
        DayOfWeek::Friday,
        DayOfWeek::Saturday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            DayOfWeek::Sunday => "Sunday",
            DayOfWeek::Monday => "Monday",
            DayOfWeek::Tuesday => "Tuesday",
            DayOfWeek::Wednesday => "Wednesday",
            DayOfWeek::Thursday => "Thursday",
            DayOfWeek::Friday => "Friday",
            DayOfWeek::Saturday => "Saturday",
        }
    }
}

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        DayOfWeek::ALL
            .into_iter()
            .find(|day| day.name().eq_ignore_ascii_case(wanted) || day.name()[..3].eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown day of week '{}'", s))
    }
}

impl From<Weekday> for DayOfWeek {
    fn from(value: Weekday) -> Self {
        match value {
            Weekday::Sun => DayOfWeek::Sunday,
            Weekday::Mon => DayOfWeek::Monday,
            Weekday::Tue => DayOfWeek::Tuesday,
            Weekday::Wed => DayOfWeek::Wednesday,
            Weekday::Thu => DayOfWeek::Thursday,
            Weekday::Fri => DayOfWeek::Friday,
            Weekday::Sat => DayOfWeek::Saturday,
        }
    }
}

impl From<DayOfWeek> for Weekday {
    fn from(value: DayOfWeek) -> Self {
        match value {
            DayOfWeek::Sunday => Weekday::Sun,
            DayOfWeek::Monday => Weekday::Mon,
            DayOfWeek::Tuesday => Weekday::Tue,
            DayOfWeek::Wednesday => Weekday::Wed,
            DayOfWeek::Thursday => Weekday::Thu,
            DayOfWeek::Friday => Weekday::Fri,
            DayOfWeek::Saturday => Weekday::Sat,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Subject {
    #[serde(alias = "math")]
    Math,
    #[serde(alias = "english")]
    English,
    #[serde(alias = "hebrew")]
    Hebrew,
    #[serde(alias = "arabic")]
    Arabic,
}

impl Subject {
    pub const ALL: [Subject; 4] = [Subject::Math, Subject::English, Subject::Hebrew, Subject::Arabic];

    pub fn name(self) -> &'static str {
        match self {
            Subject::Math => "Math",
            Subject::English => "English",
            Subject::Hebrew => "Hebrew",
            Subject::Arabic => "Arabic",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .into_iter()
            .find(|subject| subject.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown subject '{}'", s))
    }
}

/// Whether a session is taught one-on-one or to several students.
///
/// Always derived from the student set; there is no way to set it directly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionType {
    Group,
    #[default]
    Private,
}

impl SessionType {
    pub fn for_student_count(count: usize) -> Self {
        if count > 1 { SessionType::Group } else { SessionType::Private }
    }
}

/// Validated content of a slot, everything except its id.
///
/// Only obtainable through [`SlotDraft::validate`] or [`SlotDetails::apply`],
/// so every value holds the slot invariants: a non-empty student set,
/// `start_time < end_time`, and whole-minute times.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDetails {
    day_of_week: DayOfWeek,
    start_time: NaiveTime,
    end_time: NaiveTime,
    room_id: RoomId,
    teacher_id: TeacherId,
    student_ids: BTreeSet<StudentId>,
    subject: Subject,
    active: bool,
}

impl SlotDetails {
    pub fn day(&self) -> DayOfWeek {
        self.day_of_week
    }

    pub fn start_time(&self) -> NaiveTime {
        self.start_time
    }

    pub fn end_time(&self) -> NaiveTime {
        self.end_time
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn teacher_id(&self) -> &TeacherId {
        &self.teacher_id
    }

    pub fn student_ids(&self) -> &BTreeSet<StudentId> {
        &self.student_ids
    }

    pub fn subject(&self) -> Subject {
        self.subject
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn session_type(&self) -> SessionType {
        SessionType::for_student_count(self.student_ids.len())
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn to_draft(&self) -> SlotDraft {
        SlotDraft {
            day_of_week: Some(self.day_of_week),
            start_time: Some(self.start_time),
            end_time: Some(self.end_time),
            room_id: Some(self.room_id.clone()),
            teacher_id: Some(self.teacher_id.clone()),
            student_ids: self.student_ids.clone(),
            subject: Some(self.subject),
            active: self.active,
        }
    }

    /// Merges `patch` over these details and re-validates the result.
    pub fn apply(&self, patch: SlotPatch) -> Result<SlotDetails, ValidationErrors> {
        let mut draft = self.to_draft();
        if let Some(day) = patch.day_of_week {
            draft.day_of_week = Some(day);
        }
        if let Some(start) = patch.start_time {
            draft.start_time = Some(start);
        }
        if let Some(end) = patch.end_time {
            draft.end_time = Some(end);
        }
        if let Some(room) = patch.room_id {
            draft.room_id = Some(room);
        }
        if let Some(teacher) = patch.teacher_id {
            draft.teacher_id = Some(teacher);
        }
        if let Some(students) = patch.student_ids {
            draft.student_ids = students;
        }
        if let Some(subject) = patch.subject {
            draft.subject = Some(subject);
        }
        if let Some(active) = patch.active {
            draft.active = active;
        }
        draft.validate()
    }
}

/// Raw slot input as it arrives from a form or a seed file.
///
/// Every field may be missing; [`SlotDraft::validate`] reports each problem
/// against the field it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDraft {
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default, with = "time::hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time::hhmm::option")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub student_ids: BTreeSet<StudentId>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl Default for SlotDraft {
    fn default() -> Self {
        Self {
            day_of_week: None,
            start_time: None,
            end_time: None,
            room_id: None,
            teacher_id: None,
            student_ids: BTreeSet::new(),
            subject: None,
            active: true,
        }
    }
}

impl SlotDraft {
    pub fn validate(self) -> Result<SlotDetails, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        if self.day_of_week.is_none() {
            errors.push(SlotField::DayOfWeek, "is required");
        }

        for (field, value) in [(SlotField::StartTime, self.start_time), (SlotField::EndTime, self.end_time)] {
            match value {
                None => errors.push(field, "is required"),
                Some(t) if !time::is_whole_minute(t) => errors.push(field, "must be a whole minute (HH:MM)"),
                Some(_) => {}
            }
        }
        if let (Some(start), Some(end)) = (self.start_time, self.end_time) {
            if start >= end {
                errors.push(SlotField::EndTime, "must be later than start_time");
            }
        }

        let room_id = self.room_id.filter(|id| !id.is_blank());
        if room_id.is_none() {
            errors.push(SlotField::RoomId, "is required");
        }
        let teacher_id = self.teacher_id.filter(|id| !id.is_blank());
        if teacher_id.is_none() {
            errors.push(SlotField::TeacherId, "is required");
        }

        if self.student_ids.is_empty() {
            errors.push(SlotField::StudentIds, "must contain at least one student");
        } else if self.student_ids.iter().any(StudentId::is_blank) {
            errors.push(SlotField::StudentIds, "must not contain blank ids");
        }

        if self.subject.is_none() {
            errors.push(SlotField::Subject, "is required");
        }

        match (self.day_of_week, self.start_time, self.end_time, room_id, teacher_id, self.subject) {
            (Some(day_of_week), Some(start_time), Some(end_time), Some(room_id), Some(teacher_id), Some(subject))
                if errors.is_empty() =>
            {
                Ok(SlotDetails {
                    day_of_week,
                    start_time,
                    end_time,
                    room_id,
                    teacher_id,
                    student_ids: self.student_ids,
                    subject,
                    active: self.active,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Partial update to an existing slot; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPatch {
    #[serde(default)]
    pub day_of_week: Option<DayOfWeek>,
    #[serde(default, with = "time::hhmm::option")]
    pub start_time: Option<NaiveTime>,
    #[serde(default, with = "time::hhmm::option")]
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub room_id: Option<RoomId>,
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub student_ids: Option<BTreeSet<StudentId>>,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// A stored slot: an id assigned by the store plus validated details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "SlotRecord", try_from = "SlotRecord")]
pub struct ScheduleSlot {
    pub id: SlotId,
    pub details: SlotDetails,
}

impl ScheduleSlot {
    pub fn new(id: SlotId, details: SlotDetails) -> Self {
        Self { id, details }
    }
}

/// Flat wire form of a [`ScheduleSlot`].
///
/// `session_type` is written for the benefit of readers but skipped when
/// reading; it is recomputed from `student_ids`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    pub id: SlotId,
    pub day_of_week: DayOfWeek,
    #[serde(with = "time::hhmm")]
    pub start_time: NaiveTime,
    #[serde(with = "time::hhmm")]
    pub end_time: NaiveTime,
    pub room_id: RoomId,
    pub teacher_id: TeacherId,
    pub student_ids: BTreeSet<StudentId>,
    pub subject: Subject,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(default, skip_deserializing)]
    pub session_type: SessionType,
}

impl From<ScheduleSlot> for SlotRecord {
    fn from(slot: ScheduleSlot) -> Self {
        let session_type = slot.details.session_type();
        let SlotDetails {
            day_of_week,
            start_time,
            end_time,
            room_id,
            teacher_id,
            student_ids,
            subject,
            active,
        } = slot.details;
        Self {
            id: slot.id,
            day_of_week,
            start_time,
            end_time,
            room_id,
            teacher_id,
            student_ids,
            subject,
            active,
            session_type,
        }
    }
}

impl TryFrom<SlotRecord> for ScheduleSlot {
    type Error = ValidationErrors;

    fn try_from(record: SlotRecord) -> Result<Self, Self::Error> {
        let details = SlotDraft {
            day_of_week: Some(record.day_of_week),
            start_time: Some(record.start_time),
            end_time: Some(record.end_time),
            room_id: Some(record.room_id),
            teacher_id: Some(record.teacher_id),
            student_ids: record.student_ids,
            subject: Some(record.subject),
            active: record.active,
        }
        .validate()?;
        Ok(ScheduleSlot::new(record.id, details))
    }
}
