use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::conflict::ConflictReport;

#[derive(Error, Debug)]
pub enum ScheduleError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Schedule conflict: {0}")]
    Conflict(ConflictReport),

    #[error("Storage error: {0}")]
    Storage(#[from] eyre::Report),
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;

/// Fields of a slot that validation reports against
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotField {
    DayOfWeek,
    StartTime,
    EndTime,
    RoomId,
    TeacherId,
    StudentIds,
    Subject,
}

impl SlotField {
    pub fn as_str(self) -> &'static str {
        match self {
            SlotField::DayOfWeek => "day_of_week",
            SlotField::StartTime => "start_time",
            SlotField::EndTime => "end_time",
            SlotField::RoomId => "room_id",
            SlotField::TeacherId => "teacher_id",
            SlotField::StudentIds => "student_ids",
            SlotField::Subject => "subject",
        }
    }
}

impl fmt::Display for SlotField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: SlotField,
    pub message: String,
}

/// Per-field validation failures, in the order they were found
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: SlotField, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.push(field, message);
        errors
    }

    pub fn push(&mut self, field: SlotField, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    /// Appends the errors of `other` whose field is not already reported.
    pub fn extend_unreported(&mut self, other: ValidationErrors) {
        let reported: Vec<SlotField> = self.errors.iter().map(|e| e.field).collect();
        self.errors
            .extend(other.errors.into_iter().filter(|error| !reported.contains(&error.field)));
    }

    pub fn has(&self, field: SlotField) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    pub fn for_field(&self, field: SlotField) -> impl Iterator<Item = &FieldError> {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", error.field, error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Problems building a time grid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("time grid needs at least one tick")]
    Empty,

    #[error("grid ticks must be strictly increasing (tick {index} is out of order)")]
    NotIncreasing { index: usize },

    #[error("hour {0} is outside 0..=23")]
    InvalidHour(u32),

    #[error("grid step must be a positive number of minutes")]
    InvalidStep,
}
