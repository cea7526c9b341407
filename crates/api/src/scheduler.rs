//! Scheduling service: every write goes through validation, the reference
//! checks and the conflict gate before it reaches the store.
//!
//! The gate is optimistic. It reads `list_all` once and then writes, so two
//! writers racing on the same resources can both pass.

use std::sync::Arc;

use tracing::{debug, info, warn};
use tutorgrid_core::conflict::{self, ConflictPair};
use tutorgrid_core::errors::{ScheduleError, ScheduleResult, SlotField, ValidationErrors};
use tutorgrid_core::lanes::PlacementStrategy;
use tutorgrid_core::models::{
    time, DayOfWeek, ScheduleSlot, SlotDetails, SlotDraft, SlotId, SlotPatch, Student, TeacherId, TimeGrid,
};
use tutorgrid_core::store::{Directory, SlotStore};
use tutorgrid_core::week::{self, DayBoard, SlotFilter, WeekBoard};

pub struct Scheduler {
    store: Arc<dyn SlotStore>,
    directory: Arc<dyn Directory>,
    grid: TimeGrid,
    check_references: bool,
    enforce_roster: bool,
}

impl Scheduler {
    pub fn new(store: Arc<dyn SlotStore>, directory: Arc<dyn Directory>, grid: TimeGrid) -> Self {
        Self {
            store,
            directory,
            grid,
            check_references: true,
            enforce_roster: false,
        }
    }

    /// Whether the teacher and students a slot names must exist in the directory.
    pub fn with_reference_checks(mut self, enabled: bool) -> Self {
        self.check_references = enabled;
        self
    }

    /// Whether every student on a slot must be assigned to its teacher.
    /// Has no effect while reference checks are off.
    pub fn with_roster_enforcement(mut self, enabled: bool) -> Self {
        self.enforce_roster = enabled;
        self
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    pub async fn list_slots(&self) -> ScheduleResult<Vec<ScheduleSlot>> {
        Ok(self.store.list_all().await?)
    }

    pub async fn get_slot(&self, id: SlotId) -> ScheduleResult<ScheduleSlot> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("Slot with ID {} not found", id)))
    }

    pub async fn create_slot(&self, draft: SlotDraft) -> ScheduleResult<ScheduleSlot> {
        let details = draft.validate()?;
        self.check(&details).await?;

        let existing = self.store.list_all().await?;
        self.gate(&details, &existing, None)?;

        let slot = self.store.create(details).await?;
        info!("Slot created: id={}, day={}", slot.id, slot.details.day());
        Ok(slot)
    }

    /// Applies `patch` to an existing slot. The slot is excluded from its own
    /// conflict check.
    pub async fn update_slot(&self, id: SlotId, patch: SlotPatch) -> ScheduleResult<ScheduleSlot> {
        let current = self.get_slot(id).await?;
        let details = current.details.apply(patch)?;
        self.check(&details).await?;

        let existing = self.store.list_all().await?;
        self.gate(&details, &existing, Some(id))?;

        self.store.update(id, details.clone()).await?;
        info!("Slot updated: id={}", id);
        Ok(ScheduleSlot::new(id, details))
    }

    pub async fn delete_slot(&self, id: SlotId) -> ScheduleResult<()> {
        self.get_slot(id).await?;
        self.store.delete(id).await?;
        info!("Slot deleted: id={}", id);
        Ok(())
    }

    /// Every conflicting pair among the active slots.
    pub async fn audit(&self) -> ScheduleResult<Vec<ConflictPair>> {
        let active = self.active_slots().await?;
        Ok(conflict::audit_pairs(&active))
    }

    pub async fn week_board<S>(&self, filter: &SlotFilter, strategy: &S) -> ScheduleResult<WeekBoard>
    where
        S: PlacementStrategy + Sync + ?Sized,
    {
        let slots = self.store.list_all().await?;
        debug!("Assembling board from {} slots", slots.len());
        Ok(week::assemble_view(&slots, filter, &self.grid, strategy))
    }

    pub async fn day_board<S>(&self, day: DayOfWeek, filter: &SlotFilter, strategy: &S) -> ScheduleResult<DayBoard>
    where
        S: PlacementStrategy + Sync + ?Sized,
    {
        let filter = filter.clone().on_day(day);
        let mut board = self.week_board(&filter, strategy).await?;
        board
            .days
            .remove(&day)
            .ok_or_else(|| ScheduleError::NotFound(format!("No board for {}", day)))
    }

    /// Students the teacher may be scheduled with, in id order.
    pub async fn selectable_students(&self, teacher_id: TeacherId) -> ScheduleResult<Vec<Student>> {
        let teacher = self
            .directory
            .teacher(teacher_id.clone())
            .await?
            .ok_or_else(|| ScheduleError::NotFound(format!("Teacher with ID {} not found", teacher_id)))?;

        let students = self.directory.students().await?;
        Ok(students.into_iter().filter(|student| teacher.teaches(&student.id)).collect())
    }

    async fn active_slots(&self) -> ScheduleResult<Vec<ScheduleSlot>> {
        let slots = self.store.list_all().await?;
        Ok(slots.into_iter().filter(|slot| slot.details.is_active()).collect())
    }

    async fn check(&self, details: &SlotDetails) -> ScheduleResult<()> {
        let mut errors = self.grid_errors(details);
        if self.check_references {
            errors.extend_unreported(self.reference_errors(details).await?);
        }
        errors.into_result()?;
        Ok(())
    }

    fn grid_errors(&self, details: &SlotDetails) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            (SlotField::StartTime, details.start_time()),
            (SlotField::EndTime, details.end_time()),
        ] {
            if self.grid.index_of(value).is_none() {
                errors.push(
                    field,
                    format!(
                        "must be a board time between {} and {}",
                        time::format(self.grid.first()),
                        time::format(self.grid.last())
                    ),
                );
            }
        }
        errors
    }

    async fn reference_errors(&self, details: &SlotDetails) -> ScheduleResult<ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let teacher = self.directory.teacher(details.teacher_id().clone()).await?;
        if teacher.is_none() {
            errors.push(SlotField::TeacherId, format!("unknown teacher '{}'", details.teacher_id()));
        }

        for student_id in details.student_ids() {
            if self.directory.student(student_id.clone()).await?.is_none() {
                errors.push(SlotField::StudentIds, format!("unknown student '{}'", student_id));
            } else if let Some(teacher) = teacher.as_ref().filter(|_| self.enforce_roster) {
                if !teacher.teaches(student_id) {
                    errors.push(
                        SlotField::StudentIds,
                        format!("student '{}' is not assigned to teacher '{}'", student_id, teacher.id),
                    );
                }
            }
        }

        Ok(errors)
    }

    /// Rejects `details` if it collides with an active slot. Inactive
    /// candidates are never gated.
    fn gate(&self, details: &SlotDetails, existing: &[ScheduleSlot], exclude_id: Option<SlotId>) -> ScheduleResult<()> {
        if !details.is_active() {
            return Ok(());
        }

        let active: Vec<ScheduleSlot> = existing.iter().filter(|slot| slot.details.is_active()).cloned().collect();
        let report = conflict::conflict_details(details, &active, exclude_id);
        if report.is_empty() {
            return Ok(());
        }

        warn!("Rejected slot on {}: {}", details.day(), report);
        Err(ScheduleError::Conflict(report))
    }
}
