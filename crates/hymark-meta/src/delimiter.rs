//! Front-matter block delimiter scanning.

/// Byte order mark tolerated before the opening marker.
const BOM: char = '\u{feff}';

/// Opening markers. The closing line repeats the opening marker or uses `...`.
const MARKERS: [&str; 2] = ["---", "= yaml ="];

/// Alternative closing marker.
const END_MARKER: &str = "...";

/// Split `source` into the raw YAML text of its front-matter block and the
/// body following the closing marker line.
///
/// Returns `None` when the document does not open with a marker line or the
/// block is never closed.
pub(crate) fn split_block(source: &str) -> Option<(&str, &str)> {
    let text = source.strip_prefix(BOM).unwrap_or(source);

    let mut lines = text.split_inclusive('\n');
    let first = lines.next()?;
    let marker = MARKERS
        .into_iter()
        .find(|m| trim_line_ending(first) == *m)?;

    let yaml_start = first.len();
    let mut offset = yaml_start;
    for line in lines {
        let content = trim_line_ending(line).trim_end();
        if content == marker || content == END_MARKER {
            let yaml = &text[yaml_start..offset];
            let body = &text[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }

    None
}

/// Strip a trailing `\n` or `\r\n`.
fn trim_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dashes() {
        let (yaml, body) = split_block("---\na: 1\n---\nbody\n").unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "body\n");
    }

    #[test]
    fn test_split_yaml_marker() {
        let (yaml, body) = split_block("= yaml =\na: 1\n= yaml =\nbody").unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_dots_close() {
        let (yaml, body) = split_block("---\na: 1\n...\nbody").unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_mismatched_markers_do_not_close() {
        assert!(split_block("---\na: 1\n= yaml =\nbody").is_none());
    }

    #[test]
    fn test_split_crlf() {
        let (yaml, body) = split_block("---\r\na: 1\r\n---\r\nbody\r\n").unwrap();
        assert_eq!(yaml, "a: 1\r\n");
        assert_eq!(body, "body\r\n");
    }

    #[test]
    fn test_split_with_bom() {
        let (yaml, body) = split_block("\u{feff}---\na: 1\n---\nbody").unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_closing_marker_at_eof() {
        let (yaml, body) = split_block("---\na: 1\n---").unwrap();
        assert_eq!(yaml, "a: 1\n");
        assert_eq!(body, "");
    }

    #[test]
    fn test_split_trailing_spaces_on_closing_marker() {
        let (_, body) = split_block("---\na: 1\n---   \nbody").unwrap();
        assert_eq!(body, "body");
    }

    #[test]
    fn test_split_requires_marker_on_first_line() {
        assert!(split_block("\n---\na: 1\n---\nbody").is_none());
        assert!(split_block("----\na: 1\n----\n").is_none());
        assert!(split_block("").is_none());
    }
}
