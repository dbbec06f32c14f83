pub mod output;
pub mod walker;

pub use walker::resolve_targets;

use std::fs;
use std::path::Path;

use crate::core::errors::Result;

pub fn read_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

const GENERATED_HEADER: &str = "// Code generated ";
const GENERATED_FOOTER: &str = " DO NOT EDIT.";

/// Lines inspected for an `@generated` marker, following the rustfmt
/// convention.
const GENERATED_MARKER_LINES: usize = 5;

/// Reports whether source text declares itself machine-generated.
///
/// Two conventions are recognized: a comment line reading
/// `// Code generated <tool> DO NOT EDIT.` anywhere in the file, and an
/// `@generated` marker within the first few lines.
pub fn is_generated(source: &str) -> bool {
    source
        .lines()
        .take(GENERATED_MARKER_LINES)
        .any(|line| line.contains("@generated"))
        || source.lines().any(is_generated_line)
}

fn is_generated_line(line: &str) -> bool {
    // The length guard keeps a short line from satisfying both affixes
    // with overlapping text.
    line.len() >= GENERATED_HEADER.len() + GENERATED_FOOTER.len()
        && line.starts_with(GENERATED_HEADER)
        && line.ends_with(GENERATED_FOOTER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_generated_header_line() {
        let source = "// Code generated by prost-build. DO NOT EDIT.\npub struct M;\n";
        assert!(is_generated(source));
    }

    #[test]
    fn test_detects_generated_marker_near_top() {
        let source = "// @generated by protoc\n\npub struct M;\n";
        assert!(is_generated(source));
    }

    #[test]
    fn test_marker_deep_in_file_is_ignored() {
        let body = "fn f() {}\n".repeat(10);
        let source = format!("{body}// @generated\n");
        assert!(!is_generated(&source));
    }

    #[test]
    fn test_rejects_overlapping_affixes() {
        // Shorter than header + footer combined, so the affixes overlap.
        assert!(!is_generated("// Code generated DO NOT EDIT.\n"));
    }

    #[test]
    fn test_plain_source_is_not_generated() {
        assert!(!is_generated("fn main() {}\n"));
    }
}
