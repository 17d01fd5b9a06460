// src/extract/mod.rs
// =============================================================================
// This module extracts the xk6 extension list from a markdown document.
//
// Submodules:
// - tree: walks the pulldown-cmark event stream as a tree of nodes
// - walker: finds the first list where every item has exactly one link
// - pattern: recognizes GitHub/GitLab repository (and release) links
// - module: turns a repository link into a module path
//
// The pipeline is:
//   markdown -> tree::parse -> tree::walk(ListQualifier) -> Vec<ModulePath>
//
// Rust concepts:
// - Modules: private submodules, with only what main.rs needs re-exported
// - Result<T, E>: reading the file and walking the document can fail
// =============================================================================

mod module;
mod pattern;
mod tree;
mod walker;

use std::fs;
use std::path::Path;

pub use module::ModulePath;

use crate::error::{Error, Result};
use walker::ListQualifier;

// Extracts the extension module paths from markdown text
//
// Parameters:
//   source: the markdown text to parse
//
// Returns: Result<Vec<ModulePath>>
//   Success: the module paths of the first qualifying list, in order
//            (an empty Vec when the document has no such list)
//   Error: only if the event stream turns out to be malformed
//
// Example input:
//   "- [a](https://github.com/foo/bar)\n- <https://gitlab.com/baz/qux/releases/tag/v1>"
//
// Example output:
//   [github.com/foo/bar, gitlab.com/baz/qux@v1]
pub fn extract(source: &str) -> Result<Vec<ModulePath>> {
    let mut qualifier = ListQualifier::new();

    tree::walk(tree::parse(source), &mut qualifier)?;

    Ok(qualifier.into_modules())
}

// Reads a markdown file and extracts its extension module paths
//
// Parameters:
//   path: the markdown file (README.md unless the user passed another one)
//
// Returns: Result<Vec<ModulePath>>
//   Error: SourceUnavailable if the file can't be read
//
// Invalid UTF-8 is replaced rather than rejected.
pub fn extract_file(path: &Path) -> Result<Vec<ModulePath>> {
    let contents = fs::read(path).map_err(|source| Error::SourceUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "read markdown source");

    extract(&String::from_utf8_lossy(&contents))
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does map_err do?
//    - fs::read returns io::Error on failure
//    - map_err converts it into our own Error::SourceUnavailable, keeping the
//      io::Error inside as the "source" and adding the path we tried to read
//
// 2. What is String::from_utf8_lossy?
//    - Turns bytes into text, replacing invalid UTF-8 with '\u{FFFD}'
//    - It returns a Cow<str>: no copy at all when the bytes were valid
//
// 3. Why does extract() take &str and not String?
//    - It only reads the text, so borrowing is enough
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_strings(source: &str) -> Vec<String> {
        extract(source)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect()
    }

    #[test]
    fn test_links_with_and_without_tag() {
        let markdown = "\
- [a](https://github.com/foo/bar)
- [b](https://gitlab.com/baz/qux/releases/tag/v1.2.3)
";
        assert_eq!(
            extract_strings(markdown),
            vec!["github.com/foo/bar", "gitlab.com/baz/qux@v1.2.3"]
        );
    }

    #[test]
    fn test_item_with_two_links_disqualifies_list() {
        let markdown = "\
- [a](https://github.com/foo/bar) [c](https://github.com/foo/baz)
- [b](https://gitlab.com/baz/qux)
";
        assert!(extract_strings(markdown).is_empty());
    }

    #[test]
    fn test_item_without_link_disqualifies_list() {
        let markdown = "\
- [a](https://github.com/foo/bar)
- just some words
- [b](https://gitlab.com/baz/qux)
";
        assert!(extract_strings(markdown).is_empty());
    }

    #[test]
    fn test_first_qualifying_list_wins() {
        let markdown = r#"
# Extensions

- [a](https://github.com/foo/first)

Some text between the lists.

- [b](https://github.com/foo/second)
"#;
        assert_eq!(extract_strings(markdown), vec!["github.com/foo/first"]);
    }

    #[test]
    fn test_later_list_qualifies_after_disqualified_one() {
        let markdown = r#"
## Contents

- Installation
- Usage

## Extensions

1. [a](https://github.com/grafana/xk6-sql)
2. [b](https://github.com/grafana/xk6-faker/releases/tag/v0.4.0)
"#;
        assert_eq!(
            extract_strings(markdown),
            vec![
                "github.com/grafana/xk6-sql",
                "github.com/grafana/xk6-faker@v0.4.0"
            ]
        );
    }

    #[test]
    fn test_autolink_and_bare_text_equal_bracket_link() {
        let bracket = "- [x](https://github.com/foo/bar)\n";
        let autolink = "- <https://github.com/foo/bar>\n";
        let bare = "- https://github.com/foo/bar\n";

        let expected = vec!["github.com/foo/bar"];
        assert_eq!(extract_strings(bracket), expected);
        assert_eq!(extract_strings(autolink), expected);
        assert_eq!(extract_strings(bare), expected);
    }

    #[test]
    fn test_bare_text_with_underscore() {
        let markdown = "- https://github.com/foo/xk6_sql_driver\n";
        assert_eq!(
            extract_strings(markdown),
            vec!["github.com/foo/xk6_sql_driver"]
        );
    }

    #[test]
    fn test_code_span_item() {
        let markdown = "- `https://github.com/foo/bar`\n";
        assert_eq!(extract_strings(markdown), vec!["github.com/foo/bar"]);
    }

    #[test]
    fn test_escaped_bare_url() {
        let markdown = "- https://github.com/foo\\_x/bar\n";
        assert_eq!(extract_strings(markdown), vec!["github.com/foo_x/bar"]);
    }

    #[test]
    fn test_loose_list() {
        let markdown = "\
- [a](https://github.com/foo/a)

- [b](https://github.com/foo/b)
";
        assert_eq!(
            extract_strings(markdown),
            vec!["github.com/foo/a", "github.com/foo/b"]
        );
    }

    #[test]
    fn test_no_list() {
        let markdown = "# Title\n\nSee [a](https://github.com/foo/bar).\n";
        assert!(extract_strings(markdown).is_empty());
        assert!(extract_strings("").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let markdown = "\
- [a](https://github.com/foo/a)
- <https://gitlab.com/foo/b/releases/tag/v1>
- https://github.com/foo/c
";
        let first = extract(markdown).unwrap();
        let second = extract(markdown).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn test_extract_file_missing() {
        let result = extract_file(Path::new("definitely/not/here/README.md"));
        assert!(matches!(result, Err(Error::SourceUnavailable { .. })));
    }

    #[test]
    fn test_extract_file() {
        let path = std::env::temp_dir().join(format!("md2xk6-{}-README.md", std::process::id()));
        fs::write(&path, "- [a](https://github.com/foo/bar)\n").unwrap();

        let modules = extract_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].to_string(), "github.com/foo/bar");
    }
}
