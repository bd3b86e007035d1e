//! Presentation layer with UI components and event handling.

/// Event handling.
pub mod events;
/// Column definitions for entity tables.
pub mod tables;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::{App, Backend, BackendCommand};
