// Signal evaluation: turns an indicator snapshot into a Long/Short/None call.
pub mod evaluator;

pub use evaluator::{evaluate, try_evaluate, SignalPolicy};
