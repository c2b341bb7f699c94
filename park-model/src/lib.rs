pub mod grid;
pub mod task;
