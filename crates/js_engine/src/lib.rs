//! JavaScript engine integration using Boa.
//!
//! This crate runs scratchpad scripts and captures their console output:
//! - [`ScriptExecutor`], the pluggable execution capability
//! - [`JsEngine`], the Boa backend
//! - [`CaptureSink`], the receiver for `console.*` calls

pub mod console;
pub mod context;
pub mod engine;
pub mod timers;

pub use console::{BufferedSink, CaptureSink, SharedSink};
pub use context::ExecutionOptions;
pub use engine::{ExecutionFailure, JsEngine, ScriptExecutor};
