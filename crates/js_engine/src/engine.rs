//! Script executors.

use crate::console::SharedSink;
use crate::context::{build_context, ExecutionOptions};
use boa_engine::{Context, JsError, JsObject, JsString, JsValue};
use boa_parser::{Parser, Source};
use tracing::debug;

/// A backend able to run source text against a capture sink.
pub trait ScriptExecutor {
    /// Short backend name, for logs and the status line.
    fn name(&self) -> &str;

    /// Run `source` as an independent top-level script.
    ///
    /// Console output goes to `sink` in call order. Uncaught failures are
    /// returned, never propagated as panics.
    fn execute(&mut self, source: &str, sink: SharedSink) -> Result<(), ExecutionFailure>;
}

/// JavaScript engine backed by Boa.
///
/// Each run gets its own context. The source becomes the body of a function
/// built by the realm's `Function` constructor, so a top-level `return` is
/// legal and declarations stay local to the run.
pub struct JsEngine {
    /// Limits applied to every run.
    options: ExecutionOptions,
    /// Script counter for identification.
    run_counter: u64,
}

impl JsEngine {
    /// Create a new JavaScript engine.
    pub fn new() -> Self {
        Self::with_options(ExecutionOptions::default())
    }

    pub fn with_options(options: ExecutionOptions) -> Self {
        Self {
            options,
            run_counter: 0,
        }
    }

    pub fn options(&self) -> &ExecutionOptions {
        &self.options
    }

    /// Number of runs started so far.
    pub fn runs(&self) -> u64 {
        self.run_counter
    }
}

impl Default for JsEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ScriptExecutor for JsEngine {
    fn name(&self) -> &str {
        "boa"
    }

    fn execute(&mut self, source: &str, sink: SharedSink) -> Result<(), ExecutionFailure> {
        self.run_counter += 1;
        let run = self.run_counter;
        debug!(run, source_len = source.len(), "executing script");

        let mut context = build_context(&self.options, sink)
            .map_err(|e| ExecutionFailure::Runtime(e.to_string()))?;

        let function = match compile(source, &mut context) {
            Ok(function) => function,
            Err(failure) => {
                debug!(run, "script failed to compile");
                return Err(failure);
            }
        };

        match function.call(&JsValue::undefined(), &[], &mut context) {
            Ok(_) => {
                debug!(run, "script completed");
                Ok(())
            }
            Err(error) => {
                debug!(run, "script raised an uncaught failure");
                Err(ExecutionFailure::Runtime(describe_failure(&error, &mut context)))
            }
        }
    }
}

/// Turn source text into a callable function, as `new Function(source)`.
fn compile(source: &str, context: &mut Context) -> Result<JsObject, ExecutionFailure> {
    check_body(source, context)?;
    let constructor = context.intrinsics().constructors().function().constructor();
    constructor
        .construct(&[JsValue::from(JsString::from(source))], None, context)
        .map_err(|e| ExecutionFailure::Syntax(describe_failure(&e, context)))
}

/// Reject source that is not exactly one complete function body.
///
/// The `Function` constructor stops at a stray `}` and keeps what came before
/// it, so the body is parsed on its own first. Inside a lone function
/// declaration an unbalanced brace either fails to parse or leaves more than
/// one top-level statement.
fn check_body(source: &str, context: &mut Context) -> Result<(), ExecutionFailure> {
    let wrapped = format!("function anonymous() {{\n{source}\n}}");
    let script = Parser::new(Source::from_bytes(wrapped.as_bytes()))
        .parse_script(context.interner_mut())
        .map_err(|e| ExecutionFailure::Syntax(format!("SyntaxError: {e}")))?;

    if script.statements().statements().len() != 1 {
        return Err(ExecutionFailure::Syntax(
            "SyntaxError: unexpected '}' closes the script body".to_string(),
        ));
    }
    Ok(())
}

/// String form of a failure, as the thrown value's `toString()` gives it.
fn describe_failure(error: &JsError, context: &mut Context) -> String {
    match error.as_opaque() {
        Some(value) => value
            .to_string(context)
            .map(|s| s.to_std_string_escaped())
            .unwrap_or_else(|_| value.display().to_string()),
        None => error.to_string(),
    }
}

/// Failure of a user script.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExecutionFailure {
    /// The source did not compile.
    #[error("{0}")]
    Syntax(String),
    /// An exception or thrown value escaped the script.
    #[error("{0}")]
    Runtime(String),
}

impl ExecutionFailure {
    /// Text shown to the user.
    pub fn message(&self) -> &str {
        match self {
            ExecutionFailure::Syntax(message) | ExecutionFailure::Runtime(message) => message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::BufferedSink;
    use common::Severity;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn run(engine: &mut JsEngine, source: &str) -> (Result<(), ExecutionFailure>, Vec<(Severity, String)>) {
        let sink = Rc::new(RefCell::new(BufferedSink::new()));
        let result = engine.execute(source, sink.clone());
        let lines = sink.borrow().lines().to_vec();
        (result, lines)
    }

    #[test]
    fn test_log_then_error() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(&mut engine, r#"console.log("hi"); console.error("bye")"#);

        assert!(result.is_ok());
        assert_eq!(
            lines,
            vec![
                (Severity::Log, "hi".to_string()),
                (Severity::Error, "bye".to_string()),
            ]
        );
    }

    #[test]
    fn test_mixed_channels_keep_call_order() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(
            &mut engine,
            r#"
            for (let i = 0; i < 3; i++) {
                console.info("i" + i);
                if (i % 2 === 0) console.warn("even " + i);
            }
            console.log("done");
            "#,
        );

        assert!(result.is_ok());
        let severities: Vec<Severity> = lines.iter().map(|(s, _)| *s).collect();
        assert_eq!(
            severities,
            vec![
                Severity::Info,
                Severity::Warn,
                Severity::Info,
                Severity::Info,
                Severity::Warn,
                Severity::Log,
            ]
        );
        assert_eq!(lines[4].1, "even 2");
    }

    #[test]
    fn test_thrown_error_keeps_earlier_output() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(&mut engine, r#"console.log("before"); throw new Error("boom");"#);

        assert_eq!(lines, vec![(Severity::Log, "before".to_string())]);
        let failure = result.unwrap_err();
        assert!(matches!(failure, ExecutionFailure::Runtime(_)));
        assert_eq!(failure.message(), "Error: boom");
    }

    #[test]
    fn test_thrown_non_error_value() {
        let mut engine = JsEngine::new();
        let (result, _) = run(&mut engine, r#"throw "oops""#);
        assert_eq!(result.unwrap_err().to_string(), "oops");
    }

    #[test]
    fn test_reference_error() {
        let mut engine = JsEngine::new();
        let (result, _) = run(&mut engine, "missing + 1");
        let failure = result.unwrap_err();
        assert!(failure.message().contains("missing"));
        assert!(failure.message().contains("ReferenceError"));
    }

    #[test]
    fn test_syntax_error_runs_nothing() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(&mut engine, r#"console.log("never"); let = ;"#);

        assert!(matches!(result, Err(ExecutionFailure::Syntax(_))));
        assert!(lines.is_empty());
    }

    #[test]
    fn test_unbalanced_closing_brace_is_a_syntax_error() {
        let mut engine = JsEngine::new();
        for source in [
            "console.log('a') }",
            "console.log('a'); } console.log('b')",
            "}); console.log('escaped'); (function(){",
            "} function later() {",
        ] {
            let (result, lines) = run(&mut engine, source);
            match result {
                Err(ExecutionFailure::Syntax(message)) => {
                    assert!(message.starts_with("SyntaxError"), "{source}: {message}")
                }
                other => panic!("{source}: expected a syntax error, got {other:?}"),
            }
            assert!(lines.is_empty(), "{source} ran {lines:?}");
        }
    }

    #[test]
    fn test_braces_inside_strings_and_comments_are_fine() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(
            &mut engine,
            "// }\nconsole.log('}', `{`); /* } */ if (true) { console.log('ok') }",
        );
        assert!(result.is_ok());
        assert_eq!(
            lines,
            vec![
                (Severity::Log, "} {".to_string()),
                (Severity::Log, "ok".to_string()),
            ]
        );
    }

    #[test]
    fn test_top_level_return_is_allowed() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(&mut engine, r#"console.log("a"); return; console.log("b");"#);
        assert!(result.is_ok());
        assert_eq!(lines, vec![(Severity::Log, "a".to_string())]);
    }

    #[test]
    fn test_runs_are_isolated() {
        let mut engine = JsEngine::new();
        let (first, _) = run(&mut engine, "var counter = 1; globalThis.shared = 2;");
        assert!(first.is_ok());

        let (second, lines) = run(
            &mut engine,
            "console.log(typeof counter, typeof shared);",
        );
        assert!(second.is_ok());
        assert_eq!(lines, vec![(Severity::Log, "undefined undefined".to_string())]);
        assert_eq!(engine.runs(), 2);
    }

    #[test]
    fn test_escaped_console_reference_cannot_reach_later_sinks() {
        let mut engine = JsEngine::new();
        let (_, first) = run(&mut engine, r#"globalThis.keep = console.log; keep("first");"#);
        let (_, second) = run(&mut engine, r#"console.log("second");"#);

        assert_eq!(first, vec![(Severity::Log, "first".to_string())]);
        assert_eq!(second, vec![(Severity::Log, "second".to_string())]);
    }

    #[test]
    fn test_promise_callbacks_after_return_are_not_captured() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(
            &mut engine,
            r#"Promise.resolve().then(() => console.log("late")); console.log("now");"#,
        );
        assert!(result.is_ok());
        assert_eq!(lines, vec![(Severity::Log, "now".to_string())]);
    }

    #[test]
    fn test_timer_callbacks_never_fire() {
        let mut engine = JsEngine::new();
        let (result, lines) = run(&mut engine, r#"setTimeout(() => console.log("tick"), 0);"#);
        assert!(result.is_ok());
        assert!(lines.is_empty());
    }

    #[test]
    fn test_loop_iteration_limit() {
        let mut engine =
            JsEngine::with_options(ExecutionOptions::new().with_loop_iteration_limit(1_000));
        let (result, _) = run(&mut engine, "while (true) {}");
        assert!(matches!(result, Err(ExecutionFailure::Runtime(_))));
    }

    #[test]
    fn test_recursion_limit() {
        let mut engine = JsEngine::with_options(ExecutionOptions::new().with_recursion_limit(32));
        let (result, lines) = run(
            &mut engine,
            r#"console.log("start"); function down(n) { return down(n + 1); } down(0);"#,
        );
        assert!(result.is_err());
        assert_eq!(lines, vec![(Severity::Log, "start".to_string())]);
    }

    #[test]
    fn test_backend_name() {
        assert_eq!(JsEngine::default().name(), "boa");
    }
}
