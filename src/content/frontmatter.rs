//! Front-matter parsing

use serde::{Deserialize, Deserializer, Serialize};

/// Custom deserializer for loosely typed scalars: strings, numbers and
/// booleans are all read as text; null and empty strings are absent.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| scalar_to_string(&v)))
}

fn scalar_to_string(value: &serde_yaml::Value) -> Option<String> {
    let s = match value {
        serde_yaml::Value::String(s) => s.clone(),
        serde_yaml::Value::Number(n) => n.to_string(),
        serde_yaml::Value::Bool(b) => b.to_string(),
        serde_yaml::Value::Tagged(tagged) => return scalar_to_string(&tagged.value),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}

/// Custom deserializer that handles both a single string and a list of strings
fn string_or_vec<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_yaml::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_yaml::Value::Null) => None,
        Some(serde_yaml::Value::Sequence(items)) => {
            Some(items.iter().filter_map(scalar_to_string).collect())
        }
        Some(other) => scalar_to_string(&other).map(|s| vec![s]),
    })
}

/// Header fields embedded at the top of a post body.
///
/// Every field is independently present or absent; a present field
/// overrides the catalog's value for that post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    #[serde(deserialize_with = "loose_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "loose_string")]
    pub excerpt: Option<String>,
    #[serde(deserialize_with = "string_or_vec")]
    pub tags: Option<Vec<String>>,
    #[serde(rename = "coverImage", deserialize_with = "loose_string")]
    pub cover_image: Option<String>,
}

impl FrontMatter {
    /// Split a raw document into its header and body.
    ///
    /// Returns an empty header and `content` unchanged unless the document
    /// opens with a well-formed `---` delimited YAML block.
    pub fn parse(content: &str) -> (Self, &str) {
        let trimmed = content.trim_start();

        if let Some(rest) = trimmed.strip_prefix("---") {
            if let Some(parsed) = Self::parse_yaml(rest) {
                return parsed;
            }
        }

        (FrontMatter::default(), content)
    }

    /// `rest` is everything after the opening `---`
    fn parse_yaml(rest: &str) -> Option<(Self, &str)> {
        let rest = rest.trim_start_matches(['\n', '\r']);

        // Empty header: the closing delimiter directly follows the opening one
        if let Some(after) = rest.strip_prefix("---") {
            if after.is_empty() || after.starts_with(['\n', '\r']) {
                return Some((FrontMatter::default(), after.trim_start_matches(['\n', '\r'])));
            }
        }

        // No closing ---, treat as no front-matter
        let end_pos = rest.find("\n---")?;
        let yaml_content = &rest[..end_pos];
        let remaining = &rest[end_pos + 4..]; // Skip \n---
        let remaining = remaining.trim_start_matches(['\n', '\r']);

        if yaml_content.trim().is_empty() {
            return Some((FrontMatter::default(), remaining));
        }

        // A `---` pair around prose or a markdown list is a horizontal rule,
        // not a header. Require at least one `key: value` line.
        if !yaml_content.lines().any(looks_like_yaml_entry) {
            return None;
        }

        match serde_yaml::from_str::<FrontMatter>(yaml_content) {
            Ok(fm) => Some((fm, remaining)),
            Err(e) => {
                tracing::warn!(
                    "Failed to parse YAML front-matter, treating as content: {}",
                    e
                );
                None
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == FrontMatter::default()
    }
}

fn looks_like_yaml_entry(line: &str) -> bool {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return false;
    }

    let Some(colon_pos) = trimmed.find(':') else {
        return false;
    };
    let key = &trimmed[..colon_pos];

    // Keys are simple identifiers; `http:` and friends are URLs in prose
    let is_valid_key = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        && !matches!(key, "http" | "https" | "ftp");

    let after_colon = &trimmed[colon_pos + 1..];
    is_valid_key && (after_colon.is_empty() || after_colon.starts_with(' '))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_header() {
        let (fm, body) = FrontMatter::parse("---\ntitle: X\n---\nBODY");
        assert_eq!(
            fm,
            FrontMatter {
                title: Some("X".to_string()),
                ..Default::default()
            }
        );
        assert_eq!(body, "BODY");
    }

    #[test]
    fn test_parse_full_header() {
        let content = r#"---
title: Hello World
date: 2024-01-15 10:30:00
excerpt: A short intro
coverImage: /images/cover.png
tags:
  - rust
  - s3
---

This is the content.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("Hello World"));
        assert_eq!(fm.date.as_deref(), Some("2024-01-15 10:30:00"));
        assert_eq!(fm.excerpt.as_deref(), Some("A short intro"));
        assert_eq!(fm.cover_image.as_deref(), Some("/images/cover.png"));
        assert_eq!(fm.tags, Some(vec!["rust".to_string(), "s3".to_string()]));
        assert_eq!(body, "This is the content.\n");
    }

    #[test]
    fn test_no_delimiter_returns_original() {
        let content = "\n# Just markdown\n\nNo header here.";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_unclosed_header_returns_original() {
        let content = "---\ntitle: Never closed\n\nBody";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_header() {
        let (fm, body) = FrontMatter::parse("---\n---\nbody");
        assert!(fm.is_empty());
        assert_eq!(body, "body");
    }

    #[test]
    fn test_single_string_tags() {
        let (fm, _) = FrontMatter::parse("---\ntags: Notes\n---\nbody");
        assert_eq!(fm.tags, Some(vec!["Notes".to_string()]));
    }

    #[test]
    fn test_loose_scalars_and_nulls() {
        let content = "---\ntitle: 2024\nexcerpt:\ncoverImage: ''\ntags:\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert_eq!(fm.title.as_deref(), Some("2024"));
        assert_eq!(fm.excerpt, None);
        assert_eq!(fm.cover_image, None);
        assert_eq!(fm.tags, None);
        assert_eq!(body, "body");
    }

    #[test]
    fn test_empty_tag_list_is_present() {
        let (fm, _) = FrontMatter::parse("---\ntags: []\n---\nbody");
        assert_eq!(fm.tags, Some(Vec::new()));
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let (fm, body) = FrontMatter::parse("---\nlayout: post\ntitle: T\n---\nbody");
        assert_eq!(fm.title.as_deref(), Some("T"));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_markdown_separator_not_yaml() {
        let content = r#"
---

Some random text with markdown lists:
- Item 1
- Item 2

---
More content here.
"#;

        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_content_with_url_not_yaml() {
        let content = "---\nCheck out https://example.com/path\n---\nMore.";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_invalid_yaml_returns_original() {
        let content = "---\ntitle: [unclosed\n---\nbody";
        let (fm, body) = FrontMatter::parse(content);
        assert!(fm.is_empty());
        assert_eq!(body, content);
    }
}
