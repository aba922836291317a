//! Post models

use serde::{Deserialize, Deserializer, Serialize};

use super::FrontMatter;
use crate::helpers::display_date;

/// Treat JSON `null` like a missing field
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Catalog entry describing one post, as listed in `posts.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    /// Stable identifier used in URLs and storage keys
    pub slug: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,

    /// Publication date as written in the catalog
    #[serde(default, deserialize_with = "null_as_empty")]
    pub date: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    pub excerpt: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,

    /// Explicit storage key for the body, overriding `<content_path><slug>.md`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

/// A post as handed to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub slug: String,
    pub title: String,
    pub date: String,
    pub excerpt: String,

    /// Markdown body; empty in list views
    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

impl Post {
    /// A list-view post: catalog metadata without a body
    pub fn summary(metadata: PostMetadata) -> Self {
        Self::with_content(metadata, String::new())
    }

    /// Catalog metadata plus a resolved body
    pub fn with_content(metadata: PostMetadata, content: String) -> Self {
        Self {
            slug: metadata.slug,
            title: metadata.title,
            date: metadata.date,
            excerpt: metadata.excerpt,
            content,
            tags: metadata.tags,
            cover_image: metadata.cover_image,
        }
    }

    /// Apply header overrides field by field.
    ///
    /// Fields the header omits keep their current value. A header date is
    /// normalised to `date_format`.
    pub fn apply_front_matter(&mut self, fm: FrontMatter, date_format: &str) {
        if let Some(title) = fm.title {
            self.title = title;
        }
        if let Some(date) = fm.date {
            self.date = display_date(&date, date_format);
        }
        if let Some(excerpt) = fm.excerpt {
            self.excerpt = excerpt;
        }
        if let Some(tags) = fm.tags {
            self.tags = Some(tags);
        }
        if let Some(cover_image) = fm.cover_image {
            self.cover_image = Some(cover_image);
        }
    }

    /// First tag, shown next to the date in list views
    pub fn primary_tag(&self) -> Option<&str> {
        self.tags.as_ref()?.first().map(String::as_str)
    }
}
