//! Content source backed by a GraphQL HTTP endpoint.

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};
use ureq::Agent;

use super::config::SourceConfig;
use super::draft::PostDraft;
use super::page::PageRequest;
use super::post::{Post, PostPage, PublishedPost, Stage};
use super::queries::{
    CreatePostData, CreatePostVariables, GraphQlRequest, GraphQlResponse, PostCreateInput,
    PostData, PostVariables, PostsData, PostsVariables, SlugWhere, CREATE_POST, GET_POST,
    GET_POSTS,
};
use super::ContentSource;
use crate::error::{Error, Result};

/// GraphQL content API client.
pub struct GraphQlSource {
    agent: Agent,
    config: SourceConfig,
}

impl GraphQlSource {
    /// Create a client for the configured endpoint.
    pub fn new(config: SourceConfig) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(config.timeout()))
            .http_status_as_error(false)
            .build()
            .into();

        Self { agent, config }
    }

    /// Create a client from `RICHPOST_ENDPOINT` and `RICHPOST_TOKEN`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(SourceConfig::from_env()?))
    }

    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Send one operation and unwrap its response envelope.
    fn execute<V, T>(&self, operation: &str, query: &str, variables: V) -> Result<T>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let body = GraphQlRequest {
            query,
            operation_name: operation,
            variables,
        };

        debug!("Sending {} to {}", operation, self.config.endpoint());

        let mut request = self
            .agent
            .post(self.config.endpoint())
            .header("Accept", "application/json");
        if let Some(token) = self.config.token() {
            let auth_header = format!("Bearer {}", token);
            request = request.header("Authorization", &auth_header);
        }

        let response = request.send_json(&body)?;

        let status = response.status().as_u16();
        let mut body_reader = response.into_body();

        if status >= 400 {
            let error_body = body_reader
                .read_to_string()
                .unwrap_or_else(|_| "(unable to read error body)".to_string());
            warn!("{} failed with status {}", operation, status);
            return Err(Error::Http {
                status,
                body: error_body,
            });
        }

        let envelope: GraphQlResponse<T> = body_reader.read_json()?;
        envelope.into_result(operation).inspect_err(|e| {
            warn!("{} returned an error: {}", operation, e);
        })
    }
}

impl ContentSource for GraphQlSource {
    fn fetch_post(&self, slug: &str) -> Result<Option<Post>> {
        info!("Fetching post {}", slug);
        let data: PostData = self.execute("GetPostBySlug", GET_POST, PostVariables { slug })?;
        if data.post.is_none() {
            info!("No post with slug {}", slug);
        }
        Ok(data.post)
    }

    fn fetch_posts(&self, request: PageRequest) -> Result<PostPage> {
        info!(
            "Fetching page {} ({} per page)",
            request.page(),
            request.per_page()
        );
        let data: PostsData = self.execute(
            "GetPostsList",
            GET_POSTS,
            PostsVariables {
                first: request.per_page(),
                skip: request.skip(),
            },
        )?;
        let total = data.posts_connection.aggregate.count;
        info!("Fetched {} of {} posts", data.posts.len(), total);

        Ok(PostPage {
            posts: data.posts,
            total,
            request,
        })
    }

    fn create_and_publish(&self, draft: &PostDraft) -> Result<PublishedPost> {
        info!("Creating post {}", draft.slug);
        let variables = CreatePostVariables {
            data: PostCreateInput {
                title: &draft.title,
                slug: &draft.slug,
                author: &draft.author,
                excerpt: &draft.excerpt,
                body: &draft.body,
            },
            where_unique: SlugWhere { slug: &draft.slug },
            to: vec![Stage::Published],
        };
        let data: CreatePostData = self.execute("CreatePostMutation", CREATE_POST, variables)?;
        let published = data
            .publish_post
            .ok_or_else(|| Error::InvalidData(format!("post '{}' was not published", draft.slug)))?;
        info!("Published {} to {:?}", published.slug, published.stage);
        Ok(published)
    }
}
