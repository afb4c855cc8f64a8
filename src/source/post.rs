//! Post types exchanged with a content source.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::page::PageRequest;
use crate::model::RichText;

/// Publication stage of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Stage {
    /// Saved but not visible to readers.
    Draft,
    /// Visible to readers.
    Published,
}

/// The body of a post in every representation the content API serves.
///
/// Only `json` carries structure; the other forms are derived renderings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub json: Option<RichText>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub markdown: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html: Option<String>,
}

impl PostBody {
    /// Create a body from a structured document.
    pub fn from_document(doc: RichText) -> Self {
        Self {
            json: Some(doc),
            ..Default::default()
        }
    }

    /// The structured document, if the source provided one.
    pub fn document(&self) -> Option<&RichText> {
        self.json.as_ref()
    }
}

/// A full post including its body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
    #[serde(default)]
    pub body: PostBody,
}

impl Post {
    /// Whether the post has a publish date.
    pub fn is_published(&self) -> bool {
        self.published_at.is_some()
    }

    /// Summary view of this post.
    pub fn summary(&self) -> PostSummary {
        PostSummary::from(self)
    }
}

/// A post as it appears in a listing: everything but the body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub excerpt: String,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub published_at: Option<OffsetDateTime>,
}

impl From<&Post> for PostSummary {
    fn from(post: &Post) -> Self {
        Self {
            id: post.id.clone(),
            title: post.title.clone(),
            slug: post.slug.clone(),
            author: post.author.clone(),
            excerpt: post.excerpt.clone(),
            published_at: post.published_at,
        }
    }
}

/// One page of post summaries plus the total number of posts.
#[derive(Debug, Clone, PartialEq)]
pub struct PostPage {
    pub posts: Vec<PostSummary>,
    pub total: u64,
    pub request: PageRequest,
}

impl PostPage {
    /// Number of pages needed to show `total` posts.
    pub fn total_pages(&self) -> u32 {
        let per_page = u64::from(self.request.per_page());
        let pages = self.total.div_ceil(per_page);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Whether a page follows this one.
    pub fn has_next(&self) -> bool {
        self.request.page() < self.total_pages()
    }

    /// Whether a page precedes this one.
    pub fn has_previous(&self) -> bool {
        self.request.page() > 1
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}

/// Result of a create-and-publish call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishedPost {
    pub slug: String,
    pub stage: Stage,
}
