// Services orchestrating the signal pipeline.
pub mod scan_service;

pub use scan_service::{CycleReport, Scanner, SymbolOutcome};
