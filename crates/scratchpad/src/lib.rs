//! JavaScript scratchpad - edit a script, run it, read its console output.
//!
//! This crate wires the components together:
//! - Configuration
//! - Headless one-shot runs
//! - The interactive terminal session (see the `jspad` binary)

pub mod config;
pub mod headless;

pub use config::ScratchpadConfig;
pub use headless::{build_scratchpad, run_headless};

/// Scratchpad version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
