use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use nestmap::analyzers::Checker;
use nestmap::cli;
use nestmap::config;
use nestmap::core::Issue;
use nestmap::io::output::create_writer;
use nestmap::io::resolve_targets;

fn main() -> Result<()> {
    let cli = cli::parse_args();
    init_logging(cli.verbose);

    // Redirected output should stay plain for diffing and grepping.
    if cli.output.is_some() {
        colored::control::set_override(false);
    }

    let cwd = std::env::current_dir().context("cannot determine working directory")?;
    let settings = cli.settings(config::load_config(&cwd));

    let targets = resolve_targets(&cli.paths, &settings.exclude)?;
    log::debug!("checking {} file(s)", targets.len());

    let mut issues = check_files(
        &targets,
        settings.min_complexity,
        settings.skip_none_guards,
        cli.verbose,
    );
    issues.sort_by(|a, b| b.complexity.cmp(&a.complexity));

    let mut writer = create_writer(cli.format.into(), cli.output.as_deref(), settings.top)?;
    writer.write_issues(&issues)?;
    Ok(())
}

/// Check every target, one worker per file. A file that cannot be read
/// or parsed is logged and skipped so the rest of the batch completes.
fn check_files(
    targets: &[PathBuf],
    min_complexity: u32,
    skip_none_guards: bool,
    verbose: bool,
) -> Vec<Issue> {
    targets
        .par_iter()
        .filter_map(
            |path| match check_one(path, min_complexity, skip_none_guards, verbose) {
                Ok(issues) => Some(issues),
                Err(err) => {
                    log::warn!("skipping {}: {err}", path.display());
                    None
                }
            },
        )
        .flatten()
        .collect()
}

fn check_one(
    path: &Path,
    min_complexity: u32,
    skip_none_guards: bool,
    verbose: bool,
) -> nestmap::core::errors::Result<Vec<Issue>> {
    let mut checker = Checker::new()
        .with_min_complexity(min_complexity)
        .with_skip_none_guards(skip_none_guards);
    if verbose {
        checker = checker.with_debug_writer(Box::new(std::io::stderr()));
    }
    checker.check_file(path)
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}
