//! Target resolution.
//!
//! CLI arguments name files, directories, or glob patterns; everything
//! is expanded here into a flat list of Rust sources to check.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::core::errors::Result;

pub struct FileWalker {
    root: PathBuf,
    exclude: Vec<String>,
}

impl FileWalker {
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            exclude: vec![],
        }
    }

    pub fn with_exclude(mut self, patterns: Vec<String>) -> Self {
        self.exclude = patterns;
        self
    }

    /// Walk the root recursively, honoring gitignore files, and return
    /// matching Rust sources in path order.
    pub fn walk(&self) -> Result<Vec<PathBuf>> {
        let mut files = Vec::new();
        let walker = WalkBuilder::new(&self.root)
            .hidden(false)
            .git_ignore(true)
            .sort_by_file_path(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = entry?;
            let path = entry.path();

            if path.is_file() && self.should_check(path) {
                files.push(path.to_path_buf());
            }
        }

        Ok(files)
    }

    fn should_check(&self, path: &Path) -> bool {
        is_rust_file(path) && !is_excluded(path, &self.exclude)
    }
}

pub fn is_rust_file(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "rs")
}

fn is_excluded(path: &Path, exclude: &[String]) -> bool {
    let path_str = path.to_string_lossy();
    exclude.iter().any(|pattern| {
        glob::Pattern::new(pattern)
            .map(|p| p.matches(&path_str))
            .unwrap_or(false)
    })
}

/// Expand CLI path arguments into concrete files to check.
///
/// Directories are walked recursively, existing files are taken as
/// given, and anything else is treated as a glob pattern. A pattern
/// that matches no Rust sources warns rather than failing the run.
pub fn resolve_targets(paths: &[PathBuf], exclude: &[String]) -> Result<Vec<PathBuf>> {
    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            targets.extend(walk_dir(path, exclude)?);
        } else if path.is_file() {
            targets.push(path.clone());
        } else {
            expand_pattern(path, exclude, &mut targets)?;
        }
    }
    Ok(targets)
}

fn walk_dir(root: &Path, exclude: &[String]) -> Result<Vec<PathBuf>> {
    FileWalker::new(root.to_path_buf())
        .with_exclude(exclude.to_vec())
        .walk()
}

fn expand_pattern(pattern: &Path, exclude: &[String], targets: &mut Vec<PathBuf>) -> Result<()> {
    let pattern = pattern.to_string_lossy();
    let before = targets.len();

    for entry in glob::glob(&pattern)? {
        match entry {
            Ok(path) if path.is_dir() => targets.extend(walk_dir(&path, exclude)?),
            Ok(path) if is_rust_file(&path) && !is_excluded(&path, exclude) => targets.push(path),
            Ok(_) => {}
            Err(err) => log::warn!("skipping unreadable match: {err}"),
        }
    }

    if targets.len() == before {
        log::warn!("{pattern:?} matched no Rust sources");
    }
    Ok(())
}
