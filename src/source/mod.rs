//! Content sources: where posts and their documents come from.
//!
//! [`ContentSource`] is the contract the rest of the crate relies on. Two
//! implementations ship with the crate: [`InMemorySource`] for tests and
//! file-backed local use, and `GraphQlSource` (feature `http`) for the
//! managed content API.

#[cfg(feature = "async")]
mod async_source;
mod config;
mod draft;
#[cfg(feature = "http")]
mod graphql;
mod memory;
mod page;
mod post;
pub mod queries;
mod state;

#[cfg(feature = "async")]
pub use async_source::AsyncSource;
pub use config::{SourceConfig, DEFAULT_TIMEOUT, ENDPOINT_ENV, TOKEN_ENV};
pub use draft::{derive_slug, PostDraft, REQUIRED_FIELDS_MESSAGE};
#[cfg(feature = "http")]
pub use graphql::GraphQlSource;
pub use memory::InMemorySource;
pub use page::{PageRequest, DEFAULT_PER_PAGE};
pub use post::{Post, PostBody, PostPage, PostSummary, PublishedPost, Stage};
pub use state::LoadState;

use crate::error::Result;

/// Read and write access to blog posts.
pub trait ContentSource: Send + Sync {
    /// Fetch one post by slug. `Ok(None)` when no post has that slug.
    fn fetch_post(&self, slug: &str) -> Result<Option<Post>>;

    /// Fetch one page of summaries, newest first, with the total count.
    fn fetch_posts(&self, request: PageRequest) -> Result<PostPage>;

    /// Create a post from a draft and publish it.
    fn create_and_publish(&self, draft: &PostDraft) -> Result<PublishedPost>;
}

impl<S: ContentSource + ?Sized> ContentSource for Box<S> {
    fn fetch_post(&self, slug: &str) -> Result<Option<Post>> {
        (**self).fetch_post(slug)
    }

    fn fetch_posts(&self, request: PageRequest) -> Result<PostPage> {
        (**self).fetch_posts(request)
    }

    fn create_and_publish(&self, draft: &PostDraft) -> Result<PublishedPost> {
        (**self).create_and_publish(draft)
    }
}
