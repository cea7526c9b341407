pub mod repositories;

pub use repositories::{MockDirectory, MockSlotStore};
