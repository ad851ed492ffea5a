//! Source discovery by filesystem walking.
//!
//! Walks the input root and keeps every file whose relative path is selected
//! by the ordered match patterns. Patterns are glob expressions; a leading `!`
//! turns one into an exclusion. Later patterns override earlier ones, and an
//! exclusion that matches a directory excludes everything below it.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use glob::{MatchOptions, Pattern};

use crate::BuildError;

const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// Discover source files under `input` selected by `patterns`.
///
/// Returns `/`-separated paths relative to `input`, sorted and free of
/// duplicates.
///
/// # Errors
///
/// Returns [`BuildError::BadInputDirectory`] if `input` is not an existing
/// directory, [`BuildError::InvalidPattern`] for a malformed pattern and
/// [`BuildError::Discovery`] if the root cannot be listed.
pub fn discover(input: &Path, patterns: &[String]) -> Result<BTreeSet<String>, BuildError> {
    if !fs::metadata(input).is_ok_and(|m| m.is_dir()) {
        return Err(BuildError::BadInputDirectory(input.to_path_buf()));
    }

    let scanner = Scanner {
        patterns: PatternSet::new(patterns)?,
    };
    let entries = fs::read_dir(input).map_err(|source| BuildError::Discovery {
        path: input.to_path_buf(),
        source,
    })?;

    let mut found = BTreeSet::new();
    scanner.scan_entries(entries, "", &mut found);
    tracing::debug!(input = %input.display(), files = found.len(), "Discovered source files");
    Ok(found)
}

struct Scanner {
    patterns: PatternSet,
}

impl Scanner {
    fn scan_directory(&self, dir_path: &Path, prefix: &str, found: &mut BTreeSet<String>) {
        match fs::read_dir(dir_path) {
            Ok(entries) => self.scan_entries(entries, prefix, found),
            Err(e) => {
                tracing::warn!(path = %dir_path.display(), error = %e, "Skipping unreadable directory");
            }
        }
    }

    fn scan_entries(&self, entries: fs::ReadDir, prefix: &str, found: &mut BTreeSet<String>) {
        for entry in entries.filter_map(Result::ok) {
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            let name = entry.file_name().to_string_lossy().into_owned();
            let relative = if prefix.is_empty() {
                name
            } else {
                format!("{prefix}/{name}")
            };
            let path = entry.path();

            // Symlinked directories are not followed.
            if file_type.is_dir() {
                if !self.patterns.prunes(&relative) {
                    self.scan_directory(&path, &relative, found);
                }
            } else if (file_type.is_file() || (file_type.is_symlink() && path.is_file()))
                && self.patterns.is_match(&relative)
            {
                found.insert(relative);
            }
        }
    }
}

struct Rule {
    pattern: Pattern,
    negated: bool,
}

/// Ordered include/exclude patterns.
struct PatternSet {
    rules: Vec<Rule>,
}

impl PatternSet {
    fn new(patterns: &[String]) -> Result<Self, BuildError> {
        let rules = patterns
            .iter()
            .map(|raw| {
                let (negated, text) = match raw.strip_prefix('!') {
                    Some(rest) => (true, rest),
                    None => (false, raw.as_str()),
                };
                let text = text.strip_prefix("./").unwrap_or(text);
                let pattern = Pattern::new(text).map_err(|source| BuildError::InvalidPattern {
                    pattern: raw.clone(),
                    source,
                })?;
                Ok(Rule { pattern, negated })
            })
            .collect::<Result<Vec<_>, BuildError>>()?;
        Ok(Self { rules })
    }

    /// Whether the file at `relative` is selected.
    fn is_match(&self, relative: &str) -> bool {
        let mut selected = false;
        for rule in &self.rules {
            if rule.negated {
                if selected && excludes(&rule.pattern, relative) {
                    selected = false;
                }
            } else if !selected && rule.pattern.matches_with(relative, MATCH_OPTIONS) {
                selected = true;
            }
        }
        selected
    }

    /// Whether nothing below the directory `relative` can be selected: an
    /// exclusion matches it and no inclusion follows that exclusion.
    fn prunes(&self, relative: &str) -> bool {
        self.rules
            .iter()
            .rposition(|rule| !rule.negated)
            .is_none_or(|last_include| {
                self.rules[last_include + 1..]
                    .iter()
                    .any(|rule| excludes(&rule.pattern, relative))
            })
    }
}

/// Whether an exclusion `pattern` matches `relative` or one of its ancestor
/// directories.
fn excludes(pattern: &Pattern, relative: &str) -> bool {
    pattern.matches_with(relative, MATCH_OPTIONS)
        || relative
            .match_indices('/')
            .any(|(index, _)| pattern.matches_with(&relative[..index], MATCH_OPTIONS))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::DEFAULT_PATTERNS;

    fn patterns(list: &[&str]) -> Vec<String> {
        list.iter().map(|p| (*p).to_owned()).collect()
    }

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "x").unwrap();
    }

    fn names(found: &BTreeSet<String>) -> Vec<&str> {
        found.iter().map(String::as_str).collect()
    }

    #[test]
    fn test_default_patterns() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.md");
        touch(temp.path(), "b.html");
        touch(temp.path(), "c.txt");
        touch(temp.path(), "_partials/x.html");
        touch(temp.path(), "docs/guide.markdown");
        touch(temp.path(), "docs/_draft.md");

        let found = discover(temp.path(), &patterns(&DEFAULT_PATTERNS)).unwrap();

        assert_eq!(names(&found), vec!["a.md", "b.html", "docs/guide.markdown"]);
    }

    #[test]
    fn test_single_star_does_not_cross_directories() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "hello.md");
        touch(temp.path(), "nested/deep.md");

        let found = discover(temp.path(), &patterns(&["*.md"])).unwrap();

        assert_eq!(names(&found), vec!["hello.md"]);
    }

    #[test]
    fn test_exclusion_of_directory_contents() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "hello.md");
        touch(temp.path(), "_templates/page.html");

        let found = discover(temp.path(), &patterns(&["**/*.html", "**/*.md", "!**/_*/*"])).unwrap();

        assert_eq!(names(&found), vec!["hello.md"]);
    }

    #[test]
    fn test_later_include_overrides_exclusion() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "_keep/a.md");
        touch(temp.path(), "_drop/b.md");

        let found =
            discover(temp.path(), &patterns(&["**/*.md", "!**/_*", "_keep/*.md"])).unwrap();

        assert_eq!(names(&found), vec!["_keep/a.md"]);
    }

    #[test]
    fn test_hidden_files_need_literal_dot() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".hidden.md");
        touch(temp.path(), ".git/notes.md");
        touch(temp.path(), "shown.md");

        let found = discover(temp.path(), &patterns(&["**/*.md"])).unwrap();
        assert_eq!(names(&found), vec!["shown.md"]);

        let found = discover(temp.path(), &patterns(&["**/*.md", ".hidden.md"])).unwrap();
        assert_eq!(names(&found), vec![".hidden.md", "shown.md"]);
    }

    #[test]
    fn test_duplicate_matches_collapse() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.md");

        let found = discover(temp.path(), &patterns(&["**/*.md", "*.md", "a.md"])).unwrap();

        assert_eq!(names(&found), vec!["a.md"]);
    }

    #[test]
    fn test_empty_patterns_select_nothing() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.md");

        assert!(discover(temp.path(), &[]).unwrap().is_empty());
    }

    #[test]
    fn test_missing_input_directory() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope");

        let err = discover(&missing, &patterns(&DEFAULT_PATTERNS)).unwrap_err();

        assert!(matches!(err, BuildError::BadInputDirectory(_)));
        assert!(err.to_string().starts_with("Bad input directory: "));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_input_is_a_file() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "a.md");

        let err = discover(&temp.path().join("a.md"), &patterns(&["*.md"])).unwrap_err();

        assert!(matches!(err, BuildError::BadInputDirectory(_)));
    }

    #[test]
    fn test_invalid_pattern() {
        let temp = TempDir::new().unwrap();

        let err = discover(temp.path(), &patterns(&["[z-a"])).unwrap_err();

        assert!(matches!(err, BuildError::InvalidPattern { .. }));
        assert!(err.to_string().contains("[z-a"));
    }

    #[test]
    fn test_prunes() {
        let set = PatternSet::new(&patterns(&DEFAULT_PATTERNS)).unwrap();
        assert!(set.prunes("_partials"));
        assert!(!set.prunes("docs"));

        let set = PatternSet::new(&patterns(&["**/*.md", "!**/_*", "_keep/*.md"])).unwrap();
        assert!(!set.prunes("_keep"));
    }
}
