//! Execution contexts and the options that shape them.

use crate::console::{register_console, SharedSink};
use crate::timers::register_timers;
use boa_engine::{Context, JsResult, js_string, property::Attribute};

/// Execution options.
///
/// Both limits are off by default, so a runaway script runs until the host
/// stops it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionOptions {
    /// Maximum iterations of any single loop.
    pub loop_iteration_limit: Option<u64>,
    /// Maximum depth of nested calls.
    pub recursion_limit: Option<usize>,
}

impl ExecutionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_loop_iteration_limit(mut self, limit: u64) -> Self {
        self.loop_iteration_limit = Some(limit);
        self
    }

    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Whether no limit is set.
    pub fn is_unbounded(&self) -> bool {
        self.loop_iteration_limit.is_none() && self.recursion_limit.is_none()
    }
}

/// Build a fresh context whose console writes to `sink`.
///
/// The context shares nothing with earlier ones: globals defined by a
/// previous script are gone, and the console of a dropped context can no
/// longer reach its sink.
pub fn build_context(options: &ExecutionOptions, sink: SharedSink) -> JsResult<Context> {
    let mut context = Context::default();

    let limits = context.runtime_limits_mut();
    if let Some(limit) = options.loop_iteration_limit {
        limits.set_loop_iteration_limit(limit);
    }
    if let Some(limit) = options.recursion_limit {
        limits.set_recursion_limit(limit);
    }

    register_console(&mut context, sink)?;
    register_timers(&mut context)?;

    // Window object (self-referential global)
    let window = context.global_object();
    context.register_global_property(js_string!("window"), window.clone(), Attribute::all())?;
    context.register_global_property(js_string!("self"), window, Attribute::all())?;

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferedSink;
    use boa_engine::Source;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_options_builder() {
        let options = ExecutionOptions::new()
            .with_loop_iteration_limit(1_000)
            .with_recursion_limit(64);

        assert_eq!(options.loop_iteration_limit, Some(1_000));
        assert_eq!(options.recursion_limit, Some(64));
        assert!(!options.is_unbounded());
        assert!(ExecutionOptions::default().is_unbounded());
    }

    #[test]
    fn test_window_aliases_global() {
        let sink = Rc::new(RefCell::new(BufferedSink::new()));
        let mut context = build_context(&ExecutionOptions::default(), sink).unwrap();

        let result = context
            .eval(Source::from_bytes("window === globalThis && self === globalThis"))
            .unwrap();
        assert_eq!(result.as_boolean(), Some(true));
    }

    #[test]
    fn test_contexts_do_not_share_globals() {
        let options = ExecutionOptions::default();
        let first = Rc::new(RefCell::new(BufferedSink::new()));
        let second = Rc::new(RefCell::new(BufferedSink::new()));

        let mut context = build_context(&options, first.clone()).unwrap();
        context.eval(Source::from_bytes("globalThis.leaked = 1")).unwrap();

        let mut context = build_context(&options, second.clone()).unwrap();
        let result = context.eval(Source::from_bytes("typeof leaked")).unwrap();
        assert_eq!(
            result.as_string().map(|s| s.to_std_string_escaped()),
            Some("undefined".to_string())
        );
    }
}
