use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Publication state of a post. Stored as an integer column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Draft,
    Published,
}

impl PostStatus {
    pub fn from_i32(value: i32) -> Option<Self> {
        match value {
            0 => Some(PostStatus::Draft),
            1 => Some(PostStatus::Published),
            _ => None,
        }
    }
}

impl From<PostStatus> for i32 {
    fn from(status: PostStatus) -> i32 {
        match status {
            PostStatus::Draft => 0,
            PostStatus::Published => 1,
        }
    }
}

impl Default for PostStatus {
    fn default() -> Self {
        PostStatus::Draft
    }
}

/// Post entity - a blog post.
///
/// `published_on` is a one-way latch: it is set the first time the post
/// transitions to `Published` and is never cleared or overwritten afterwards,
/// even if the post is reverted to `Draft` and published again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub slug: String,
    pub author_id: Uuid,
    pub content: String,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub status: PostStatus,
    pub created_on: DateTime<Utc>,
    pub updated_on: DateTime<Utc>,
    pub published_on: Option<DateTime<Utc>>,
}

impl Post {
    /// Create a new draft-or-published post record.
    ///
    /// Callers go through `PostManager::create`, which validates fields and
    /// applies the publish latch before the record is persisted.
    pub fn new(
        title: String,
        slug: String,
        author_id: Uuid,
        content: String,
        excerpt: String,
        featured_image: Option<String>,
        status: PostStatus,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title,
            slug,
            author_id,
            content,
            excerpt,
            featured_image,
            status,
            created_on: now,
            updated_on: now,
            published_on: None,
        }
    }
}

/// Derive a URL-safe slug from a title.
///
/// Lowercase ASCII alphanumerics separated by single hyphens; everything else
/// is dropped. Capped at 200 characters to match the slug column.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_separator = false;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    slug.truncate(200);
    if slug.ends_with('-') {
        slug.pop();
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_lowercases_and_hyphenates() {
        assert_eq!(slugify("Hello, World!"), "hello-world");
        assert_eq!(slugify("  My First Post  "), "my-first-post");
    }

    #[test]
    fn slugify_collapses_separator_runs() {
        assert_eq!(slugify("a -- b"), "a-b");
        assert_eq!(slugify("rust & actix & sea-orm"), "rust-actix-sea-orm");
    }

    #[test]
    fn slugify_drops_non_ascii() {
        assert_eq!(slugify("caf\u{e9} life"), "caf-life");
    }

    #[test]
    fn slugify_empty_when_no_alphanumerics() {
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn status_integer_mapping_round_trips() {
        assert_eq!(PostStatus::from_i32(0), Some(PostStatus::Draft));
        assert_eq!(PostStatus::from_i32(1), Some(PostStatus::Published));
        assert_eq!(PostStatus::from_i32(2), None);
        assert_eq!(i32::from(PostStatus::Published), 1);
    }
}
