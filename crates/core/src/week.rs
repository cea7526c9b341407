//! # Weekly Assembly
//!
//! Groups slots by day and runs each day through the conflict audit and the
//! lane packer, producing the board the schedule screens render.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::conflict;
use crate::lanes::{pack_day_from, DayLayout, PlacementStrategy};
use crate::models::{DayOfWeek, ScheduleSlot, SlotId, StudentId, TeacherId, TimeGrid};

/// Partitions slots by day. Order within a day is input order.
pub fn group_by_day<I>(slots: I) -> BTreeMap<DayOfWeek, Vec<ScheduleSlot>>
where
    I: IntoIterator<Item = ScheduleSlot>,
{
    let mut days: BTreeMap<DayOfWeek, Vec<ScheduleSlot>> = BTreeMap::new();
    for slot in slots {
        days.entry(slot.details.day()).or_default().push(slot);
    }
    days
}

/// Narrows which slots a board shows.
///
/// Filtering only affects what is laid out; conflicts are still audited
/// against every active slot, so a teacher's own view flags a room clash
/// with someone else's session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotFilter {
    #[serde(default)]
    pub teacher_id: Option<TeacherId>,
    #[serde(default)]
    pub student_id: Option<StudentId>,
    #[serde(default)]
    pub day: Option<DayOfWeek>,
    #[serde(default)]
    pub include_inactive: bool,
}

impl SlotFilter {
    pub fn for_teacher(teacher_id: TeacherId) -> Self {
        Self {
            teacher_id: Some(teacher_id),
            ..Self::default()
        }
    }

    pub fn for_student(student_id: StudentId) -> Self {
        Self {
            student_id: Some(student_id),
            ..Self::default()
        }
    }

    pub fn on_day(mut self, day: DayOfWeek) -> Self {
        self.day = Some(day);
        self
    }

    pub fn matches(&self, slot: &ScheduleSlot) -> bool {
        let details = &slot.details;
        (self.include_inactive || details.is_active())
            && self.teacher_id.as_ref().is_none_or(|id| details.teacher_id() == id)
            && self.student_id.as_ref().is_none_or(|id| details.student_ids().contains(id))
            && self.day.is_none_or(|day| details.day() == day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayBoard {
    pub day: DayOfWeek,
    pub layout: DayLayout,
    /// Ids of the displayed slots that currently conflict with another slot
    pub conflicts: BTreeSet<SlotId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeekBoard {
    pub grid: TimeGrid,
    pub days: BTreeMap<DayOfWeek, DayBoard>,
}

impl WeekBoard {
    pub fn day(&self, day: DayOfWeek) -> Option<&DayBoard> {
        self.days.get(&day)
    }

    /// Union of every day's conflict set.
    pub fn conflicting(&self) -> BTreeSet<SlotId> {
        self.days.values().flat_map(|board| board.conflicts.iter().copied()).collect()
    }

    pub fn lane_count(&self, day: DayOfWeek) -> usize {
        self.day(day).map_or(0, |board| board.layout.lane_count())
    }
}

/// Board for one day of the active slots in `slots`. Slots on other days are
/// ignored apart from contributing to room columns.
pub fn assemble_day<S>(day: DayOfWeek, slots: &[ScheduleSlot], grid: &TimeGrid, strategy: &S) -> DayBoard
where
    S: PlacementStrategy + ?Sized,
{
    let mut board = assemble_view(slots, &SlotFilter::default().on_day(day), grid, strategy);
    board.days.remove(&day).unwrap_or_else(|| DayBoard {
        day,
        layout: DayLayout::default(),
        conflicts: BTreeSet::new(),
    })
}

/// Board of every active slot, one entry per day of the week.
pub fn assemble_week<S>(slots: &[ScheduleSlot], grid: &TimeGrid, strategy: &S) -> WeekBoard
where
    S: PlacementStrategy + ?Sized,
{
    assemble_view(slots, &SlotFilter::default(), grid, strategy)
}

/// Board of the slots matching `filter`, with conflicts audited across every
/// active slot. Days excluded by the filter's `day` are left out; other days
/// without slots get an empty layout.
pub fn assemble_view<S>(slots: &[ScheduleSlot], filter: &SlotFilter, grid: &TimeGrid, strategy: &S) -> WeekBoard
where
    S: PlacementStrategy + ?Sized,
{
    let active: Vec<ScheduleSlot> = slots.iter().filter(|slot| slot.details.is_active()).cloned().collect();
    let conflicting = conflict::audit(&active);

    // Columns come from every slot the view could show on any day, so a
    // room column stays put when a single day is requested.
    let week_filter = SlotFilter {
        day: None,
        ..filter.clone()
    };
    let week_slots: Vec<ScheduleSlot> = slots.iter().filter(|slot| week_filter.matches(slot)).cloned().collect();
    let labels = strategy.initial_lanes(&week_slots);

    let mut shown = group_by_day(week_slots.into_iter().filter(|slot| filter.matches(slot)));

    let days = DayOfWeek::ALL
        .into_iter()
        .filter(|day| filter.day.is_none_or(|wanted| wanted == *day))
        .map(|day| {
            let day_slots = shown.remove(&day).unwrap_or_default();
            let conflicts = day_slots
                .iter()
                .map(|slot| slot.id)
                .filter(|id| conflicting.contains(id))
                .collect();
            let board = DayBoard {
                day,
                layout: pack_day_from(&day_slots, grid, strategy, labels.clone()),
                conflicts,
            };
            (day, board)
        })
        .collect();

    tracing::debug!(slots = slots.len(), conflicting = conflicting.len(), "assembled week board");

    WeekBoard { grid: grid.clone(), days }
}
