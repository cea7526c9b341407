pub mod board;
pub mod directory;
pub mod slots;
