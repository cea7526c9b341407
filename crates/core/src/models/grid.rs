use chrono::{Duration, NaiveTime};
use serde::{Serialize, Serializer};

use super::time;
use crate::errors::GridError;

/// An ordered run of time-of-day ticks that slot boundaries are aligned to.
///
/// The grid is the vertical axis of the day layout: a slot from 13:00 to
/// 15:00 on an hourly grid starting at 13:00 covers ticks 0 and 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeGrid {
    ticks: Vec<NaiveTime>,
}

/// Half-open range of tick indices `[start, end)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TickSpan {
    pub start: usize,
    pub end: usize,
}

impl TickSpan {
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.start <= index && index < self.end
    }
}

impl TimeGrid {
    pub fn new(ticks: Vec<NaiveTime>) -> Result<Self, GridError> {
        if ticks.is_empty() {
            return Err(GridError::Empty);
        }
        if let Some(index) = ticks.windows(2).position(|pair| pair[0] >= pair[1]) {
            return Err(GridError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { ticks })
    }

    /// One tick per hour from `first_hour:00` through `last_hour:00` inclusive.
    pub fn hourly(first_hour: u32, last_hour: u32) -> Result<Self, GridError> {
        let start = NaiveTime::from_hms_opt(first_hour, 0, 0).ok_or(GridError::InvalidHour(first_hour))?;
        let end = NaiveTime::from_hms_opt(last_hour, 0, 0).ok_or(GridError::InvalidHour(last_hour))?;
        Self::stepped(start, end, 60)
    }

    /// Ticks from `start` through `end` inclusive, `step_minutes` apart.
    pub fn stepped(start: NaiveTime, end: NaiveTime, step_minutes: u32) -> Result<Self, GridError> {
        if step_minutes == 0 {
            return Err(GridError::InvalidStep);
        }
        let step = Duration::minutes(i64::from(step_minutes));
        let mut ticks = Vec::new();
        let mut current = start;
        while current <= end {
            ticks.push(current);
            let (next, wrapped) = current.overflowing_add_signed(step);
            if wrapped != 0 {
                break;
            }
            current = next;
        }
        Self::new(ticks)
    }

    pub fn ticks(&self) -> &[NaiveTime] {
        &self.ticks
    }

    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    /// Always false; a grid is never constructed without ticks.
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }

    pub fn first(&self) -> NaiveTime {
        self.ticks[0]
    }

    pub fn last(&self) -> NaiveTime {
        self.ticks[self.ticks.len() - 1]
    }

    /// Exact position of `time` on the grid.
    pub fn index_of(&self, time: NaiveTime) -> Option<usize> {
        self.ticks.binary_search(&time).ok()
    }

    /// Tick range a slot covers, or `None` if either endpoint is off the grid
    /// or the range is empty.
    pub fn span_of(&self, start: NaiveTime, end: NaiveTime) -> Option<TickSpan> {
        let start = self.index_of(start)?;
        let end = self.index_of(end)?;
        (start < end).then_some(TickSpan { start, end })
    }
}

impl Serialize for TimeGrid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.ticks.iter().map(|tick| time::format(*tick)))
    }
}
