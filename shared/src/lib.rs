pub mod models;
pub mod utils;

// Data models shared by the signal engine and any future front-end.
// No logic lives here beyond parsing helpers in utils.rs.
