pub mod models;
pub mod repositories;
pub mod seed;

pub mod mock;

pub use repositories::directory::InMemoryDirectory;
pub use repositories::slot::InMemorySlotStore;
pub use seed::{load_seed, parse_seed, Seed};
