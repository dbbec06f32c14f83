use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::NestmapConfig;

#[derive(Parser, Debug)]
#[command(name = "nestmap")]
#[command(about = "Detect deeply nested if expressions in Rust code", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Files, directories, or glob patterns to check
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Minimum complexity to report
    #[arg(short = 'm', long = "min")]
    pub min_complexity: Option<u32>,

    /// Show only the top N most complex if expressions (text output only)
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Leave is_none()/is_err()-style guard conditions out of scoring
    #[arg(long = "skip-none-guards")]
    pub skip_none_guards: bool,

    /// Glob patterns to exclude, in addition to config exclusions
    #[arg(long, value_delimiter = ',')]
    pub exclude: Vec<String>,

    /// Emit progress diagnostics to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Fold the command line over the config file. Flags win for scalar
    /// settings; exclude patterns from both sources accumulate.
    pub fn settings(&self, config: NestmapConfig) -> NestmapConfig {
        let mut exclude = config.exclude;
        exclude.extend(self.exclude.iter().cloned());
        NestmapConfig {
            min_complexity: self.min_complexity.unwrap_or(config.min_complexity),
            top: self.top.unwrap_or(config.top),
            skip_none_guards: self.skip_none_guards || config.skip_none_guards,
            exclude,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for crate::io::output::OutputFormat {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Text => crate::io::output::OutputFormat::Text,
            OutputFormat::Json => crate::io::output::OutputFormat::Json,
        }
    }
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
