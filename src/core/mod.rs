pub mod errors;

use proc_macro2::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Location of a finding within a source file. `line` is 1-based and
/// `column` 0-based, following the span convention of the parser;
/// `offset` is the byte offset of the location within the file.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    /// Build a location from the starting point of a span.
    pub fn of(file: &Path, span: Span) -> Self {
        let start = span.start();
        Self {
            file: file.to_path_buf(),
            offset: span.byte_range().start,
            line: start.line,
            column: start.column,
        }
    }
}

/// One reported nested-if finding. Immutable after creation; within one
/// file, issues are produced in document order (outer before inner).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Issue {
    pub location: SourceLocation,
    pub complexity: u32,
    pub condition: String,
    pub message: String,
}

impl Issue {
    pub fn new(location: SourceLocation, complexity: u32, condition: String) -> Self {
        let message = format_message(&location, &condition, complexity);
        Self {
            location,
            complexity,
            condition,
            message,
        }
    }
}

/// Renders the canonical report line. The embedded column is 1-based to
/// match editor and grep conventions.
pub fn format_message(
    location: &SourceLocation,
    condition: &str,
    complexity: impl fmt::Display,
) -> String {
    format!(
        "{}:{}:{}: `if {}` is nested (complexity: {})",
        location.file.display(),
        location.line,
        location.column + 1,
        condition,
        complexity
    )
}

/// Write-only diagnostic capability: either a no-op or an attached
/// stream, resolved once at construction.
#[derive(Default)]
pub struct DebugSink(Option<Box<dyn Write + Send>>);

impl DebugSink {
    pub fn disabled() -> Self {
        Self(None)
    }

    pub fn to_writer(writer: Box<dyn Write + Send>) -> Self {
        Self(Some(writer))
    }

    pub fn is_enabled(&self) -> bool {
        self.0.is_some()
    }

    /// Emit one diagnostic line. The newline travels in the same write so
    /// that workers sharing a stream cannot split each other's lines. Sink
    /// write failures are deliberately ignored: diagnostics must never
    /// disturb checking.
    pub fn emit(&mut self, args: fmt::Arguments<'_>) {
        if let Some(writer) = &mut self.0 {
            let _ = writer.write_fmt(format_args!("{args}\n"));
        }
    }
}

impl fmt::Debug for DebugSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DebugSink")
            .field(&self.0.as_ref().map(|_| "attached"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_uses_one_based_column() {
        let location = SourceLocation {
            file: PathBuf::from("lib.rs"),
            offset: 120,
            line: 8,
            column: 4,
        };
        let issue = Issue::new(location, 3, "b1 && b2".to_string());
        assert_eq!(
            issue.message,
            "lib.rs:8:5: `if b1 && b2` is nested (complexity: 3)"
        );
    }

    #[test]
    fn test_disabled_sink_swallows_output() {
        let mut sink = DebugSink::disabled();
        assert!(!sink.is_enabled());
        sink.emit(format_args!("dropped"));
    }

    #[derive(Clone, Default)]
    struct SharedBuffer(std::sync::Arc<std::sync::Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_attached_sink_appends_newline() {
        let buffer = SharedBuffer::default();
        let mut sink = DebugSink::to_writer(Box::new(buffer.clone()));
        sink.emit(format_args!("2 issues found"));
        let written = buffer.0.lock().unwrap().clone();
        assert_eq!(String::from_utf8(written).unwrap(), "2 issues found\n");
    }

    /// Records the payload of every write call it receives, keeping call
    /// boundaries visible.
    #[derive(Clone, Default)]
    struct CallRecorder(std::sync::Arc<std::sync::Mutex<Vec<String>>>);

    impl Write for CallRecorder {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0
                .lock()
                .unwrap()
                .push(String::from_utf8_lossy(buf).into_owned());
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }

        fn write_fmt(&mut self, args: fmt::Arguments<'_>) -> std::io::Result<()> {
            self.0.lock().unwrap().push(args.to_string());
            Ok(())
        }
    }

    // Workers checking files in parallel share one stderr; a line that
    // reaches the writer in two calls could interleave with another
    // worker's output mid-line.
    #[test]
    fn test_emit_delivers_the_whole_line_in_one_write() {
        let recorder = CallRecorder::default();
        let mut sink = DebugSink::to_writer(Box::new(recorder.clone()));
        sink.emit(format_args!("3 issue(s) found in lib.rs"));
        let calls = recorder.0.lock().unwrap().clone();
        assert_eq!(calls, vec!["3 issue(s) found in lib.rs\n"]);
    }
}
