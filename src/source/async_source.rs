//! Async wrapper running a blocking content source on Tokio's blocking pool.

use std::sync::Arc;

use super::draft::PostDraft;
use super::page::PageRequest;
use super::post::{Post, PostPage, PublishedPost};
use super::ContentSource;
use crate::error::{Error, Result};

/// Async front end for any shared [`ContentSource`].
pub struct AsyncSource<S> {
    inner: Arc<S>,
}

impl<S> Clone for AsyncSource<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: ContentSource + 'static> AsyncSource<S> {
    pub fn new(source: S) -> Self {
        Self::from_arc(Arc::new(source))
    }

    pub fn from_arc(inner: Arc<S>) -> Self {
        Self { inner }
    }

    /// The wrapped source, for synchronous use.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub async fn fetch_post(&self, slug: &str) -> Result<Option<Post>> {
        let inner = Arc::clone(&self.inner);
        let slug = slug.to_string();
        run_blocking(move || inner.fetch_post(&slug)).await
    }

    pub async fn fetch_posts(&self, request: PageRequest) -> Result<PostPage> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.fetch_posts(request)).await
    }

    pub async fn create_and_publish(&self, draft: PostDraft) -> Result<PublishedPost> {
        let inner = Arc::clone(&self.inner);
        run_blocking(move || inner.create_and_publish(&draft)).await
    }
}

async fn run_blocking<T, F>(f: F) -> Result<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| Error::InvalidData(format!("blocking task failed: {}", e)))?
}
