//! # Lane Packing
//!
//! Lays a single day's slots out as parallel lanes over a [`TimeGrid`], the
//! way the schedule tables draw them: a slot occupies the cell at its start
//! tick with a row span, and the ticks it covers below that are marked as
//! continuations so the renderer skips them.
//!
//! ## Algorithm
//!
//! 1. Map each slot's start and end to grid indices. A slot with an endpoint
//!    missing from the grid is not laid out; it is reported as
//!    [`UnplacedReason::OffGrid`].
//! 2. Sort by start index, breaking ties by slot id.
//! 3. Ask the [`PlacementStrategy`] for a lane. The packer only writes into
//!    a lane whose range `[start, end)` is entirely empty.
//!
//! [`FreeLanes`] is first-fit greedy: correct (no lane holds overlapping
//! slots) but not minimal, since an adversarial ordering can open more lanes
//! than the interval graph's chromatic number. That trade-off is accepted.
//! [`RoomColumns`] pins each slot to its room's column instead.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::models::{RoomId, ScheduleSlot, SlotId, TickSpan, TimeGrid};

/// One tick of a lane
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Cell {
    Empty,
    /// The tick a slot starts at; it spans `row_span` ticks.
    Start { slot: ScheduleSlot, row_span: usize },
    /// Covered by a slot that started earlier in this lane.
    Continuation,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum LaneLabel {
    /// Anonymous track, numbered from zero in creation order
    Track(usize),
    /// Column reserved for one room
    Room(RoomId),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Lane {
    pub label: LaneLabel,
    pub cells: Vec<Cell>,
}

impl Lane {
    pub fn new(label: LaneLabel, ticks: usize) -> Self {
        Self {
            label,
            cells: vec![Cell::Empty; ticks],
        }
    }

    pub fn is_free(&self, span: TickSpan) -> bool {
        span.end <= self.cells.len() && self.cells[span.start..span.end].iter().all(Cell::is_empty)
    }

    fn occupy(&mut self, slot: &ScheduleSlot, span: TickSpan) {
        self.cells[span.start] = Cell::Start {
            slot: slot.clone(),
            row_span: span.len(),
        };
        for cell in &mut self.cells[span.start + 1..span.end] {
            *cell = Cell::Continuation;
        }
    }

    /// `(start tick, slot, row span)` for every slot in the lane, top to bottom.
    pub fn placements(&self) -> impl Iterator<Item = (usize, &ScheduleSlot, usize)> {
        self.cells.iter().enumerate().filter_map(|(tick, cell)| match cell {
            Cell::Start { slot, row_span } => Some((tick, slot, *row_span)),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// Start or end time is not a tick of the grid
    OffGrid,
    /// The lane chosen for the slot is already taken over its range
    Occupied,
    /// The strategy has no lane for the slot
    NoLane,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unplaced {
    pub slot_id: SlotId,
    pub reason: UnplacedReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayLayout {
    pub lanes: Vec<Lane>,
    pub unplaced: Vec<Unplaced>,
}

impl DayLayout {
    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn placed_ids(&self) -> BTreeSet<SlotId> {
        self.lanes
            .iter()
            .flat_map(|lane| lane.placements().map(|(_, slot, _)| slot.id))
            .collect()
    }
}

/// Where a strategy wants a slot to go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaneChoice {
    Existing(usize),
    Open(LaneLabel),
    Reject(UnplacedReason),
}

/// Lane-selection rule plugged into [`pack_day_with`].
///
/// Strategies only choose; the packer owns the overlap and continuation
/// bookkeeping, so every strategy gets the same cell mechanics.
pub trait PlacementStrategy {
    /// Lanes that exist before any slot is placed.
    fn initial_lanes(&self, _slots: &[ScheduleSlot]) -> Vec<LaneLabel> {
        Vec::new()
    }

    fn choose(&self, slot: &ScheduleSlot, span: TickSpan, lanes: &[Lane]) -> LaneChoice;
}

/// First free anonymous lane, opening a new one when none fits
#[derive(Debug, Clone, Copy, Default)]
pub struct FreeLanes;

impl PlacementStrategy for FreeLanes {
    fn choose(&self, _slot: &ScheduleSlot, span: TickSpan, lanes: &[Lane]) -> LaneChoice {
        match lanes.iter().position(|lane| lane.is_free(span)) {
            Some(index) => LaneChoice::Existing(index),
            None => LaneChoice::Open(LaneLabel::Track(lanes.len())),
        }
    }
}

/// One column per room; a slot always lands in its room's column.
///
/// Columns come from a fixed room list when given, otherwise from the
/// distinct rooms of the slots passed to `initial_lanes`, sorted by id. Week
/// boards pass the whole week, so a room keeps its column on every day.
#[derive(Debug, Clone, Default)]
pub struct RoomColumns {
    rooms: Option<Vec<RoomId>>,
}

impl RoomColumns {
    pub fn from_day() -> Self {
        Self { rooms: None }
    }

    pub fn fixed(rooms: impl IntoIterator<Item = RoomId>) -> Self {
        let mut seen = BTreeSet::new();
        let rooms = rooms.into_iter().filter(|room| seen.insert(room.clone())).collect();
        Self { rooms: Some(rooms) }
    }
}

impl PlacementStrategy for RoomColumns {
    fn initial_lanes(&self, slots: &[ScheduleSlot]) -> Vec<LaneLabel> {
        match &self.rooms {
            Some(rooms) => rooms.iter().cloned().map(LaneLabel::Room).collect(),
            None => slots
                .iter()
                .map(|slot| slot.details.room_id().clone())
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(LaneLabel::Room)
                .collect(),
        }
    }

    fn choose(&self, slot: &ScheduleSlot, span: TickSpan, lanes: &[Lane]) -> LaneChoice {
        let column = lanes
            .iter()
            .position(|lane| matches!(&lane.label, LaneLabel::Room(room) if room == slot.details.room_id()));
        match column {
            Some(index) if lanes[index].is_free(span) => LaneChoice::Existing(index),
            Some(_) => LaneChoice::Reject(UnplacedReason::Occupied),
            None => LaneChoice::Reject(UnplacedReason::NoLane),
        }
    }
}

/// Named placement strategies, for configuration and query strings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementKind {
    #[default]
    #[serde(alias = "free_lanes")]
    Free,
    #[serde(alias = "room_columns")]
    Rooms,
}

impl PlacementKind {
    /// Builds the strategy; `rooms` fixes the column list for [`PlacementKind::Rooms`].
    pub fn build(self, rooms: Option<&[RoomId]>) -> Box<dyn PlacementStrategy + Send + Sync> {
        match (self, rooms) {
            (PlacementKind::Free, _) => Box::new(FreeLanes),
            (PlacementKind::Rooms, Some(rooms)) => Box::new(RoomColumns::fixed(rooms.iter().cloned())),
            (PlacementKind::Rooms, None) => Box::new(RoomColumns::from_day()),
        }
    }
}

impl fmt::Display for PlacementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementKind::Free => f.write_str("free"),
            PlacementKind::Rooms => f.write_str("rooms"),
        }
    }
}

impl FromStr for PlacementKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "free" | "free_lanes" => Ok(PlacementKind::Free),
            "rooms" | "room_columns" => Ok(PlacementKind::Rooms),
            other => Err(format!("unknown placement strategy '{}'", other)),
        }
    }
}

/// Packs one day's slots into lanes using `strategy`.
///
/// Slots are expected to share a day; the packer does not look at
/// `day_of_week`. Output depends only on the input, so repeated calls give
/// identical layouts.
pub fn pack_day_with<S>(slots: &[ScheduleSlot], grid: &TimeGrid, strategy: &S) -> DayLayout
where
    S: PlacementStrategy + ?Sized,
{
    pack_day_from(slots, grid, strategy, strategy.initial_lanes(slots))
}

/// Like [`pack_day_with`], starting from `labels` instead of the strategy's
/// initial lanes for `slots`. Lets a week board share one column set across
/// days.
pub fn pack_day_from<S>(slots: &[ScheduleSlot], grid: &TimeGrid, strategy: &S, labels: Vec<LaneLabel>) -> DayLayout
where
    S: PlacementStrategy + ?Sized,
{
    let mut unplaced = Vec::new();
    let mut spanned: Vec<(TickSpan, &ScheduleSlot)> = Vec::with_capacity(slots.len());

    for slot in slots {
        match grid.span_of(slot.details.start_time(), slot.details.end_time()) {
            Some(span) => spanned.push((span, slot)),
            None => {
                tracing::debug!(slot_id = %slot.id, "slot endpoints are off the grid, not laid out");
                unplaced.push(Unplaced {
                    slot_id: slot.id,
                    reason: UnplacedReason::OffGrid,
                });
            }
        }
    }

    spanned.sort_by_key(|(span, slot)| (span.start, slot.id));

    let mut lanes: Vec<Lane> = labels
        .into_iter()
        .map(|label| Lane::new(label, grid.len()))
        .collect();

    for (span, slot) in spanned {
        match strategy.choose(slot, span, &lanes) {
            LaneChoice::Existing(index) => match lanes.get_mut(index) {
                Some(lane) if lane.is_free(span) => lane.occupy(slot, span),
                Some(_) => unplaced.push(Unplaced {
                    slot_id: slot.id,
                    reason: UnplacedReason::Occupied,
                }),
                None => unplaced.push(Unplaced {
                    slot_id: slot.id,
                    reason: UnplacedReason::NoLane,
                }),
            },
            LaneChoice::Open(label) => {
                let mut lane = Lane::new(label, grid.len());
                lane.occupy(slot, span);
                lanes.push(lane);
            }
            LaneChoice::Reject(reason) => {
                tracing::debug!(slot_id = %slot.id, ?reason, "strategy rejected slot");
                unplaced.push(Unplaced { slot_id: slot.id, reason });
            }
        }
    }

    DayLayout { lanes, unplaced }
}

/// Free-lane packing, returning just the lanes.
pub fn pack_day(slots: &[ScheduleSlot], grid: &TimeGrid) -> Vec<Lane> {
    pack_day_with(slots, grid, &FreeLanes).lanes
}
