pub mod directory;
pub mod grid;
pub mod ids;
pub mod slot;
pub mod time;

pub use directory::{Student, Teacher};
pub use grid::{TickSpan, TimeGrid};
pub use ids::{RoomId, SlotId, StudentId, TeacherId};
pub use slot::{
    DayOfWeek, ScheduleSlot, SessionType, SlotDetails, SlotDraft, SlotPatch, SlotRecord, Subject,
};
