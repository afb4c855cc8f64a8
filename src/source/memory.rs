//! In-process content source, optionally backed by a JSON file.

use std::cmp::Ordering;
use std::fs;
use std::path::Path;
use std::sync::{PoisonError, RwLock};

use time::OffsetDateTime;
use tracing::{debug, info};

use super::draft::PostDraft;
use super::page::PageRequest;
use super::post::{Post, PostBody, PostPage, PostSummary, PublishedPost, Stage};
use super::ContentSource;
use crate::error::{Error, Result};
use crate::render::{render_html, to_markdown, to_text, RenderOptions};

/// A thread-safe store of posts implementing [`ContentSource`].
#[derive(Debug, Default)]
pub struct InMemorySource {
    posts: RwLock<Vec<Post>>,
}

impl InMemorySource {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the given posts.
    pub fn with_posts(posts: Vec<Post>) -> Self {
        Self {
            posts: RwLock::new(posts),
        }
    }

    /// Load posts from a JSON array.
    pub fn from_json(json: &str) -> Result<Self> {
        let posts: Vec<Post> = serde_json::from_str(json)?;
        debug!("Loaded {} posts", posts.len());
        Ok(Self::with_posts(posts))
    }

    /// Load posts from a JSON file. A missing file yields an empty store.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            info!("Store {} does not exist, starting empty", path.display());
            return Ok(Self::new());
        }
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Write all posts to a JSON file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(&*self.read())?;
        fs::write(path, json)?;
        info!("Saved store to {}", path.display());
        Ok(())
    }

    /// Add a post, rejecting a slug that is already taken.
    pub fn insert(&self, post: Post) -> Result<()> {
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        if posts.iter().any(|p| p.slug == post.slug) {
            return Err(Error::DuplicateSlug(post.slug));
        }
        posts.push(post);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Post>> {
        self.posts.read().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Newest first, unpublished posts last.
fn by_publish_date(a: &Post, b: &Post) -> Ordering {
    match (a.published_at, b.published_at) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn body_for(draft: &PostDraft) -> PostBody {
    let options = RenderOptions::new().with_classes(false);
    PostBody {
        markdown: Some(to_markdown(&draft.body)),
        text: Some(to_text(&draft.body)),
        html: Some(render_html(&draft.body, &options)),
        json: Some(draft.body.clone()),
    }
}

impl ContentSource for InMemorySource {
    fn fetch_post(&self, slug: &str) -> Result<Option<Post>> {
        debug!("Looking up post {}", slug);
        Ok(self.read().iter().find(|p| p.slug == slug).cloned())
    }

    fn fetch_posts(&self, request: PageRequest) -> Result<PostPage> {
        let posts = self.read();
        let mut ordered: Vec<&Post> = posts.iter().collect();
        ordered.sort_by(|a, b| by_publish_date(a, b));

        let skip = usize::try_from(request.skip()).unwrap_or(usize::MAX);
        let page: Vec<PostSummary> = ordered
            .into_iter()
            .skip(skip)
            .take(request.per_page() as usize)
            .map(PostSummary::from)
            .collect();

        debug!("Page {} has {} posts", request.page(), page.len());
        Ok(PostPage {
            posts: page,
            total: posts.len() as u64,
            request,
        })
    }

    fn create_and_publish(&self, draft: &PostDraft) -> Result<PublishedPost> {
        let mut posts = self.posts.write().unwrap_or_else(PoisonError::into_inner);
        if posts.iter().any(|p| p.slug == draft.slug) {
            return Err(Error::DuplicateSlug(draft.slug.clone()));
        }

        let post = Post {
            id: next_id(&posts),
            title: draft.title.clone(),
            slug: draft.slug.clone(),
            author: draft.author.clone(),
            excerpt: draft.excerpt.clone(),
            published_at: Some(OffsetDateTime::now_utc()),
            body: body_for(draft),
        };
        posts.push(post);
        info!("Published {}", draft.slug);

        Ok(PublishedPost {
            slug: draft.slug.clone(),
            stage: Stage::Published,
        })
    }
}

/// First `post-N` id not already taken, counting from the store size.
fn next_id(posts: &[Post]) -> String {
    (posts.len() + 1..)
        .map(|n| format!("post-{}", n))
        .find(|id| posts.iter().all(|p| &p.id != id))
        .unwrap_or_default()
}
