//! # Conflict Detection
//!
//! Two slots conflict when all of these hold:
//!
//! 1. they fall on the same day of the week,
//! 2. their half-open time ranges overlap (`max(start) < min(end)`), so
//!    slots that merely touch at an endpoint are fine,
//! 3. they share a contended resource: the room, the teacher, or at least
//!    one student.
//!
//! The same rule serves the create/update gate (one candidate against the
//! stored slots) and the batch audit behind the admin warning badge
//! (every pair, O(n²), fine for a few hundred slots a week).

use chrono::NaiveTime;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

use crate::models::{DayOfWeek, RoomId, ScheduleSlot, SlotDetails, SlotId, StudentId, TeacherId};

/// A resource two overlapping slots both claim
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ContendedResource {
    Room(RoomId),
    Teacher(TeacherId),
    Students(BTreeSet<StudentId>),
}

impl fmt::Display for ContendedResource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContendedResource::Room(id) => write!(f, "room {}", id),
            ContendedResource::Teacher(id) => write!(f, "teacher {}", id),
            ContendedResource::Students(ids) => {
                let ids: Vec<&str> = ids.iter().map(StudentId::as_str).collect();
                write!(f, "students {}", ids.join(", "))
            }
        }
    }
}

/// One existing slot that collides with a candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Conflict {
    pub slot_id: SlotId,
    pub resources: Vec<ContendedResource>,
}

/// Every collision found for a candidate slot
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConflictReport {
    pub conflicts: Vec<Conflict>,
}

impl ConflictReport {
    pub fn is_empty(&self) -> bool {
        self.conflicts.is_empty()
    }

    pub fn slot_ids(&self) -> BTreeSet<SlotId> {
        self.conflicts.iter().map(|c| c.slot_id).collect()
    }
}

impl fmt::Display for ConflictReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "collides with {} slot(s)", self.conflicts.len())?;
        for (i, conflict) in self.conflicts.iter().enumerate() {
            f.write_str(if i == 0 { ": " } else { "; " })?;
            write!(f, "{} (", conflict.slot_id)?;
            for (j, resource) in conflict.resources.iter().enumerate() {
                if j > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", resource)?;
            }
            f.write_str(")")?;
        }
        Ok(())
    }
}

/// A conflicting pair found by the batch audit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConflictPair {
    pub first: SlotId,
    pub second: SlotId,
    pub day: DayOfWeek,
    pub resources: Vec<ContendedResource>,
}

/// Half-open interval overlap. Touching endpoints do not overlap, and an
/// empty interval overlaps nothing.
pub fn intervals_overlap(a_start: NaiveTime, a_end: NaiveTime, b_start: NaiveTime, b_end: NaiveTime) -> bool {
    a_start.max(b_start) < a_end.min(b_end)
}

/// Resources `a` and `b` both claim, regardless of day or time.
pub fn shared_resources(a: &SlotDetails, b: &SlotDetails) -> Vec<ContendedResource> {
    let mut shared = Vec::new();
    if a.room_id() == b.room_id() {
        shared.push(ContendedResource::Room(a.room_id().clone()));
    }
    if a.teacher_id() == b.teacher_id() {
        shared.push(ContendedResource::Teacher(a.teacher_id().clone()));
    }
    let students: BTreeSet<StudentId> = a.student_ids().intersection(b.student_ids()).cloned().collect();
    if !students.is_empty() {
        shared.push(ContendedResource::Students(students));
    }
    shared
}

/// The contended resources if `a` and `b` conflict, `None` otherwise.
pub fn collision(a: &SlotDetails, b: &SlotDetails) -> Option<Vec<ContendedResource>> {
    if a.day() != b.day() {
        return None;
    }
    if !intervals_overlap(a.start_time(), a.end_time(), b.start_time(), b.end_time()) {
        return None;
    }
    let shared = shared_resources(a, b);
    (!shared.is_empty()).then_some(shared)
}

/// Every existing slot `candidate` collides with, skipping `exclude_id`
/// (the slot being edited).
pub fn conflict_details(
    candidate: &SlotDetails,
    existing: &[ScheduleSlot],
    exclude_id: Option<SlotId>,
) -> ConflictReport {
    let conflicts = existing
        .iter()
        .filter(|slot| Some(slot.id) != exclude_id)
        .filter_map(|slot| {
            collision(candidate, &slot.details).map(|resources| Conflict {
                slot_id: slot.id,
                resources,
            })
        })
        .collect();
    ConflictReport { conflicts }
}

/// Ids of the existing slots `candidate` collides with; empty means clear.
pub fn conflicts_of(candidate: &SlotDetails, existing: &[ScheduleSlot], exclude_id: Option<SlotId>) -> BTreeSet<SlotId> {
    conflict_details(candidate, existing, exclude_id).slot_ids()
}

/// Every conflicting pair in `slots`, each reported once in input order.
pub fn audit_pairs(slots: &[ScheduleSlot]) -> Vec<ConflictPair> {
    let mut pairs = Vec::new();
    for (i, a) in slots.iter().enumerate() {
        for b in &slots[i + 1..] {
            if a.id == b.id {
                continue;
            }
            if let Some(resources) = collision(&a.details, &b.details) {
                pairs.push(ConflictPair {
                    first: a.id,
                    second: b.id,
                    day: a.details.day(),
                    resources,
                });
            }
        }
    }
    tracing::trace!(slots = slots.len(), pairs = pairs.len(), "conflict audit finished");
    pairs
}

/// Ids of every slot currently involved in at least one conflict.
pub fn audit(slots: &[ScheduleSlot]) -> BTreeSet<SlotId> {
    audit_pairs(slots)
        .into_iter()
        .flat_map(|pair| [pair.first, pair.second])
        .collect()
}
