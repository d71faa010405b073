pub mod completions;
pub mod setup;
pub mod tags;
