//! YAML front-matter extraction for hymark.
//!
//! A source document may start with a metadata block delimited by marker
//! lines:
//!
//! ```text
//! ---
//! title: Hello World
//! template: page.html
//! ---
//!
//! # hello
//! ```
//!
//! The opening marker is either `---` or `= yaml =`; the block is closed by
//! the same marker or by `...`. Everything after the closing line is the body,
//! byte for byte. Documents without a complete block have no attributes and
//! the whole text as body.

mod delimiter;

use serde_json::{Map, Value};

use delimiter::split_block;

/// Attribute mapping parsed from a front-matter block.
pub type Attributes = Map<String, Value>;

/// A document split into front-matter attributes and body text.
#[derive(Debug, Default, PartialEq)]
pub struct FrontMatter<'a> {
    /// Parsed attributes (empty when the document has no block).
    pub attributes: Attributes,
    /// Body text following the block.
    pub body: &'a str,
}

/// Error returned when a front-matter block cannot be parsed.
#[derive(Debug, thiserror::Error)]
pub enum FrontMatterError {
    /// The block is not valid YAML.
    #[error("Invalid YAML front-matter: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// The block parsed, but not to a key-value mapping.
    #[error("Front-matter must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Split `source` into attributes and body.
///
/// # Errors
///
/// Returns an error if a delimited block exists but its YAML is malformed or
/// is not a mapping.
pub fn parse(source: &str) -> Result<FrontMatter<'_>, FrontMatterError> {
    let Some((yaml, body)) = split_block(source) else {
        return Ok(FrontMatter {
            attributes: Attributes::new(),
            body: source,
        });
    };

    Ok(FrontMatter {
        attributes: parse_attributes(yaml)?,
        body,
    })
}

/// Parse the YAML text of a block into an attribute mapping.
///
/// Empty or null blocks yield an empty mapping.
fn parse_attributes(yaml: &str) -> Result<Attributes, FrontMatterError> {
    let trimmed = yaml.trim();
    if trimmed.is_empty() {
        return Ok(Attributes::new());
    }

    match serde_yaml::from_str::<Value>(trimmed)? {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Attributes::new()),
        Value::Bool(_) => Err(FrontMatterError::NotAMapping("a boolean")),
        Value::Number(_) => Err(FrontMatterError::NotAMapping("a number")),
        Value::String(_) => Err(FrontMatterError::NotAMapping("a string")),
        Value::Array(_) => Err(FrontMatterError::NotAMapping("a sequence")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_parse_attributes_and_body() {
        let source = "---\ntitle: Hello World\ntemplate: page.html\n---\n\n# hello\n";
        let parsed = parse(source).unwrap();
        assert_eq!(parsed.body, "\n# hello\n");
        assert_eq!(parsed.attributes.get("title"), Some(&json!("Hello World")));
        assert_eq!(parsed.attributes.get("template"), Some(&json!("page.html")));
    }

    #[test]
    fn test_parse_nested_values() {
        let source = "---\ntags:\n  - a\n  - b\nauthor:\n  name: Ann\nweight: 3\n---\nbody";
        let parsed = parse(source).unwrap();
        assert_eq!(parsed.attributes.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(
            parsed.attributes.get("author"),
            Some(&json!({ "name": "Ann" }))
        );
        assert_eq!(parsed.attributes.get("weight"), Some(&json!(3)));
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_parse_without_block() {
        let source = "# Just markdown\n\n---\n";
        let parsed = parse(source).unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, source);
    }

    #[test]
    fn test_parse_empty_block() {
        let parsed = parse("---\n---\ncontent\n").unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, "content\n");
    }

    #[test]
    fn test_parse_null_block() {
        let parsed = parse("---\n~\n---\ncontent").unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, "content");
    }

    #[test]
    fn test_parse_invalid_yaml() {
        let err = parse("---\ntitle: [invalid yaml\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::Yaml(_)));
    }

    #[test]
    fn test_parse_scalar_block_is_rejected() {
        let err = parse("---\njust a string\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("a string")));
        assert!(err.to_string().contains("mapping"));
    }

    #[test]
    fn test_parse_sequence_block_is_rejected() {
        let err = parse("---\n- a\n- b\n---\nbody").unwrap_err();
        assert!(matches!(err, FrontMatterError::NotAMapping("a sequence")));
    }

    #[test]
    fn test_parse_unterminated_block_is_body() {
        let source = "---\ntitle: Open\nno closing marker\n";
        let parsed = parse(source).unwrap();
        assert!(parsed.attributes.is_empty());
        assert_eq!(parsed.body, source);
    }
}
