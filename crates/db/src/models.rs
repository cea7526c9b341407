use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};
use tutorgrid_core::errors::{SlotField, ValidationErrors};
use tutorgrid_core::models::{
    time, DayOfWeek, RoomId, ScheduleSlot, SlotDraft, SlotId, Student, StudentId, Subject, Teacher, TeacherId,
};

/// A `weekly_schedule` document as the admin screens store it.
///
/// Fields are kept as loose strings so one malformed document is reported
/// instead of failing the whole file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DbSlot {
    #[serde(default)]
    pub id: Option<SlotId>,
    #[serde(default)]
    pub day_of_week: String,
    #[serde(default)]
    pub start_time: String,
    #[serde(default)]
    pub end_time: String,
    #[serde(default, alias = "room_id")]
    pub room: String,
    #[serde(default)]
    pub teacher_id: String,
    #[serde(default)]
    pub student_ids: Vec<String>,
    #[serde(default)]
    pub subject: String,
    /// Written by older forms. Never read; session type is derived.
    #[serde(default, skip_serializing)]
    pub class_type: Option<String>,
    #[serde(default = "active_by_default", deserialize_with = "active_flag")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Accepts `true`/`false` as well as the `"yes"`/`"no"` strings the forms use.
/// `null` counts as active, like a missing field.
fn active_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Text(String),
    }

    match Option::<Flag>::deserialize(deserializer)? {
        None => Ok(true),
        Some(Flag::Bool(value)) => Ok(value),
        Some(Flag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "" | "yes" | "true" => Ok(true),
            "no" | "false" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid active flag '{}'", other))),
        },
    }
}

fn parse_field<T>(
    raw: &str,
    field: SlotField,
    errors: &mut ValidationErrors,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Option<T> {
    if raw.trim().is_empty() {
        return None;
    }
    match parse(raw) {
        Ok(value) => Some(value),
        Err(message) => {
            errors.push(field, message);
            None
        }
    }
}

impl DbSlot {
    /// Converts the document into a validated slot. Documents without an id
    /// get a fresh one.
    pub fn into_slot(self) -> Result<ScheduleSlot, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let day_of_week = parse_field(&self.day_of_week, SlotField::DayOfWeek, &mut errors, str::parse::<DayOfWeek>);
        let start_time = parse_field(&self.start_time, SlotField::StartTime, &mut errors, parse_time);
        let end_time = parse_field(&self.end_time, SlotField::EndTime, &mut errors, parse_time);
        let subject = parse_field(&self.subject, SlotField::Subject, &mut errors, str::parse::<Subject>);

        let draft = SlotDraft {
            day_of_week,
            start_time,
            end_time,
            room_id: Some(RoomId::new(self.room)),
            teacher_id: Some(TeacherId::new(self.teacher_id)),
            student_ids: self.student_ids.into_iter().map(StudentId::new).collect(),
            subject,
            active: self.active,
        };

        match draft.validate() {
            Ok(details) if errors.is_empty() => Ok(ScheduleSlot::new(self.id.unwrap_or_else(SlotId::random), details)),
            Ok(_) => Err(errors),
            Err(validation) => {
                errors.extend_unreported(validation);
                Err(errors)
            }
        }
    }
}

fn parse_time(raw: &str) -> Result<NaiveTime, String> {
    time::parse(raw).ok_or_else(|| format!("invalid time '{}', expected HH:MM", raw))
}

/// Top-level seed document: the `teachers`, `students` and
/// `weekly_schedule` collections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedDocument {
    #[serde(default)]
    pub teachers: Vec<Teacher>,
    #[serde(default)]
    pub students: Vec<Student>,
    #[serde(default)]
    pub weekly_schedule: Vec<DbSlot>,
}
