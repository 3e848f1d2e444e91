pub mod settings;

pub use settings::{ScanSettings, SymbolSource};
