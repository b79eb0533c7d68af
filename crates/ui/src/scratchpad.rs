//! Scratchpad session state: the source buffer and the output log.

use crate::editor::Editor;
use crate::output::{OutputCollector, OutputLog, DEFAULT_TIMESTAMP_FORMAT};
use js_engine::{CaptureSink, ScriptExecutor};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::debug;

/// Outcome of one run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    /// Entries appended to the log, including the failure entry.
    pub captured: usize,
    /// Whether the script ended with an uncaught failure.
    pub failed: bool,
}

/// One scratchpad session.
pub struct Scratchpad {
    editor: Editor,
    output: OutputLog,
    executor: Box<dyn ScriptExecutor>,
    timestamp_format: String,
}

impl Scratchpad {
    pub fn new(executor: Box<dyn ScriptExecutor>) -> Self {
        Self {
            editor: Editor::new(),
            output: OutputLog::new(),
            executor,
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.editor.set_text(source);
        self
    }

    pub fn with_timestamp_format(mut self, format: &str) -> Self {
        self.timestamp_format = format.to_string();
        self
    }

    pub fn source(&self) -> &str {
        self.editor.text()
    }

    pub fn set_source(&mut self, source: &str) {
        self.editor.set_text(source);
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut Editor {
        &mut self.editor
    }

    pub fn output(&self) -> &OutputLog {
        &self.output
    }

    pub fn executor_name(&self) -> &str {
        self.executor.name()
    }

    /// Execute the current source and append what it printed.
    ///
    /// Console lines keep their call order. An uncaught failure adds one
    /// error entry after them. The batch lands in the log in a single step.
    pub fn run(&mut self) -> RunSummary {
        let collector = Rc::new(RefCell::new(OutputCollector::new(&self.timestamp_format)));
        let outcome = self.executor.execute(self.editor.text(), collector.clone());

        let mut collector = collector.borrow_mut();
        let failed = match outcome {
            Ok(()) => false,
            Err(failure) => {
                collector.error(failure.to_string());
                true
            }
        };
        let entries = collector.take_entries();
        let captured = entries.len();
        self.output.extend(entries);

        debug!(captured, failed, total = self.output.len(), "run finished");
        RunSummary { captured, failed }
    }

    /// Empty both the source and the log.
    pub fn clear(&mut self) {
        self.editor.clear();
        self.output.clear();
    }
}
