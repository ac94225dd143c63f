pub mod completions;
pub mod engine;
pub mod reply;
