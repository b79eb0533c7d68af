//! Common types shared by the scratchpad crates.

pub mod color;
pub mod error;
pub mod severity;

pub use color::Color;
pub use error::{ScratchpadError, ScratchpadResult};
pub use severity::Severity;
