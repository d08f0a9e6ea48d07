//! Front panel input implementations

pub mod button;

pub use button::{ButtonPanel, Debouncer};
