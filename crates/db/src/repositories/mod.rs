pub mod directory;
pub mod slot;
