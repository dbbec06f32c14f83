// Export modules for library usage
pub mod analyzers;
pub mod cli;
pub mod complexity;
pub mod config;
pub mod core;
pub mod io;

// Re-export commonly used types
pub use crate::analyzers::Checker;
pub use crate::complexity::{score_if, IfScore, ScoreOptions};
pub use crate::config::{load_config, NestmapConfig};
pub use crate::core::{format_message, DebugSink, Issue, SourceLocation};
pub use crate::io::output::{create_writer, OutputFormat, OutputWriter};
pub use crate::io::resolve_targets;
