//! One-shot execution without the terminal UI.

use crate::config::ScratchpadConfig;
use common::ScratchpadResult;
use js_engine::JsEngine;
use std::io::Write;
use tracing::info;
use ui::{RunSummary, Scratchpad};

/// Build a scratchpad session from `config`, holding `source`.
pub fn build_scratchpad(config: &ScratchpadConfig, source: &str) -> Scratchpad {
    let engine = JsEngine::with_options(config.execution_options());
    Scratchpad::new(Box::new(engine))
        .with_source(source)
        .with_timestamp_format(&config.timestamp_format)
}

/// Run `source` once and write every captured line to `out`.
pub fn run_headless<W: Write>(
    config: &ScratchpadConfig,
    source: &str,
    out: &mut W,
) -> ScratchpadResult<RunSummary> {
    let mut scratchpad = build_scratchpad(config, source);
    let summary = scratchpad.run();

    for entry in scratchpad.output() {
        writeln!(out, "{entry}")?;
    }
    out.flush()?;

    info!(captured = summary.captured, failed = summary.failed, "headless run complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> (RunSummary, Vec<String>) {
        let config = ScratchpadConfig::default().with_timestamp_format("T");
        let mut out = Vec::new();
        let summary = run_headless(&config, source, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (summary, text.lines().map(str::to_string).collect())
    }

    #[test]
    fn test_prints_one_line_per_entry() {
        let (summary, lines) = run(r#"console.log("hi"); console.error("bye")"#);
        assert_eq!(summary, RunSummary { captured: 2, failed: false });
        assert_eq!(lines, vec!["T  > hi", "T  > bye"]);
    }

    #[test]
    fn test_failure_printed_last() {
        let (summary, lines) = run(r#"console.log("start"); throw "stop""#);
        assert!(summary.failed);
        assert_eq!(lines, vec!["T  > start", "T  > stop"]);
    }

    #[test]
    fn test_default_source_says_hello() {
        let config = ScratchpadConfig::default();
        let mut out = Vec::new();
        run_headless(&config, &config.initial_source, &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("> Hello, World!"));
    }

    #[test]
    fn test_limits_from_config_apply() {
        let config = ScratchpadConfig::default().with_loop_iteration_limit(100);
        let mut out = Vec::new();
        let summary = run_headless(&config, "for (;;) {}", &mut out).unwrap();
        assert!(summary.failed);
    }
}
