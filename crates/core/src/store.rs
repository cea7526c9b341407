//! Repository traits the scheduling service consumes.
//!
//! Implementations own persistence; failures come back as [`eyre::Report`]
//! and are not retried by callers.

use async_trait::async_trait;
use eyre::Result;

use crate::models::{ScheduleSlot, SlotDetails, SlotId, Student, StudentId, Teacher, TeacherId};

#[async_trait]
pub trait SlotStore: Send + Sync {
    async fn list_all(&self) -> Result<Vec<ScheduleSlot>>;

    async fn get(&self, id: SlotId) -> Result<Option<ScheduleSlot>>;

    /// Stores a new slot and returns it with its assigned id.
    async fn create(&self, details: SlotDetails) -> Result<ScheduleSlot>;

    /// Replaces the details of an existing slot.
    async fn update(&self, id: SlotId, details: SlotDetails) -> Result<()>;

    /// Removes a slot permanently.
    async fn delete(&self, id: SlotId) -> Result<()>;
}

/// Teacher and student reference data
#[async_trait]
pub trait Directory: Send + Sync {
    async fn teacher(&self, id: TeacherId) -> Result<Option<Teacher>>;

    async fn student(&self, id: StudentId) -> Result<Option<Student>>;

    async fn teachers(&self) -> Result<Vec<Teacher>>;

    async fn students(&self) -> Result<Vec<Student>>;
}
