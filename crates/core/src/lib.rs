//! # Tutorgrid Core
//!
//! Domain model and scheduling logic for recurring weekly tutoring sessions.
//!
//! ## Architecture
//!
//! - **Models**: slots, days, subjects, time grids and the reference directory
//! - **Conflict**: detection of double-booked rooms, teachers and students
//! - **Lanes**: packing a day's slots into parallel display lanes
//! - **Week**: grouping slots by day and assembling the board the UI renders
//! - **Store**: the async traits the slot repository and directory implement
//!
//! Everything except the store traits is synchronous and free of I/O.

/// Conflict detection over contended resources
pub mod conflict;
/// Domain error types
pub mod errors;
/// Lane packing for the visual day layout
pub mod lanes;
/// Slot, grid and directory models
pub mod models;
/// Repository traits consumed by the scheduling service
pub mod store;
/// Weekly board assembly
pub mod week;
