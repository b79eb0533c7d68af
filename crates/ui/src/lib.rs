//! Scratchpad user interface.
//!
//! This crate holds the session state and the terminal front end:
//! - Editable source buffer
//! - Output log and the per-run capture sink
//! - Run and clear actions
//! - Theme and pane rendering

pub mod app;
pub mod editor;
pub mod output;
pub mod scratchpad;
pub mod theme;
pub mod view;

pub use app::App;
pub use editor::Editor;
pub use output::{OutputEntry, OutputLog};
pub use scratchpad::{RunSummary, Scratchpad};
pub use theme::{ThemeName, UiTheme};
