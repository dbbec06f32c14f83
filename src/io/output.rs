use crate::core::{format_message, Issue};
use colored::*;
use std::fs::File;
use std::io::Write;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub trait OutputWriter {
    fn write_issues(&mut self, issues: &[Issue]) -> anyhow::Result<()>;
}

/// Serializes the full issue set as a JSON array. The top-N cap does
/// not apply here: machine consumers get everything.
pub struct JsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_issues(&mut self, issues: &[Issue]) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(issues)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

/// Prints one report line per issue, capped at the top N.
pub struct TextWriter<W: Write> {
    writer: W,
    top: usize,
}

impl<W: Write> TextWriter<W> {
    pub fn new(writer: W, top: usize) -> Self {
        Self { writer, top }
    }
}

impl<W: Write> OutputWriter for TextWriter<W> {
    fn write_issues(&mut self, issues: &[Issue]) -> anyhow::Result<()> {
        for issue in issues.iter().take(self.top) {
            writeln!(
                self.writer,
                "{}",
                format_message(
                    &issue.location,
                    &issue.condition,
                    severity_tint(issue.complexity)
                )
            )?;
        }
        Ok(())
    }
}

fn severity_tint(complexity: u32) -> ColoredString {
    let text = complexity.to_string();
    match complexity {
        0..=3 => text.normal(),
        4..=7 => text.yellow(),
        _ => text.red(),
    }
}

pub fn create_writer(
    format: OutputFormat,
    output: Option<&Path>,
    top: usize,
) -> anyhow::Result<Box<dyn OutputWriter>> {
    Ok(match (format, output) {
        (OutputFormat::Json, Some(path)) => Box::new(JsonWriter::new(File::create(path)?)),
        (OutputFormat::Json, None) => Box::new(JsonWriter::new(std::io::stdout())),
        (OutputFormat::Text, Some(path)) => Box::new(TextWriter::new(File::create(path)?, top)),
        (OutputFormat::Text, None) => Box::new(TextWriter::new(std::io::stdout(), top)),
    })
}
