//! GraphQL operations against the content API and their envelopes.

use serde::{Deserialize, Serialize};

use super::post::{Post, PostSummary, PublishedPost, Stage};
use crate::error::{Error, Result};
use crate::model::RichText;

/// Fetch one post with its body by slug.
pub const GET_POST: &str = r#"query GetPostBySlug($slug: String!) {
  post(where: { slug: $slug }) {
    author
    body {
      json
      markdown
      text
      html
    }
    excerpt
    id
    publishedAt
    slug
    title
  }
}"#;

/// Fetch one page of post summaries, newest first, and the total count.
pub const GET_POSTS: &str = r#"query GetPostsList($first: Int!, $skip: Int!) {
  posts(first: $first, skip: $skip, orderBy: publishedAt_DESC) {
    author
    excerpt
    id
    publishedAt
    slug
    title
  }
  postsConnection {
    aggregate {
      count
    }
  }
}"#;

/// Create a post and publish it in one request.
pub const CREATE_POST: &str = r#"mutation CreatePostMutation($data: PostCreateInput!, $where: PostWhereUniqueInput!, $to: [Stage!]!) {
  createPost(data: $data) {
    title
    slug
    excerpt
    author
    body {
      json
    }
  }
  publishPost(where: $where, to: $to) {
    slug
    stage
  }
}"#;

/// A GraphQL request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<'a, V> {
    pub query: &'a str,
    pub operation_name: &'a str,
    pub variables: V,
}

/// A GraphQL response envelope.
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

impl<T> GraphQlResponse<T> {
    /// Unwrap the envelope: errors win over data, and missing data is an error.
    pub fn into_result(self, operation: &str) -> Result<T> {
        if let Some(first) = self.errors.into_iter().next() {
            return Err(Error::GraphQl(first.message));
        }
        self.data
            .ok_or_else(|| Error::InvalidData(format!("{} returned no data", operation)))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PostVariables<'a> {
    pub slug: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostsVariables {
    pub first: u32,
    pub skip: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePostVariables<'a> {
    pub data: PostCreateInput<'a>,
    #[serde(rename = "where")]
    pub where_unique: SlugWhere<'a>,
    pub to: Vec<Stage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCreateInput<'a> {
    pub title: &'a str,
    pub slug: &'a str,
    pub author: &'a str,
    pub excerpt: &'a str,
    pub body: &'a RichText,
}

#[derive(Debug, Clone, Serialize)]
pub struct SlugWhere<'a> {
    pub slug: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct PostData {
    pub post: Option<Post>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostsData {
    pub posts: Vec<PostSummary>,
    pub posts_connection: Connection,
}

#[derive(Debug, Deserialize)]
pub struct Connection {
    pub aggregate: Aggregate,
}

#[derive(Debug, Deserialize)]
pub struct Aggregate {
    pub count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostData {
    pub publish_post: Option<PublishedPost>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = GraphQlRequest {
            query: GET_POSTS,
            operation_name: "GetPostsList",
            variables: PostsVariables { first: 5, skip: 10 },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["operationName"], "GetPostsList");
        assert_eq!(value["variables"]["first"], 5);
        assert_eq!(value["variables"]["skip"], 10);
        assert!(value["query"].as_str().unwrap().contains("publishedAt_DESC"));
    }

    #[test]
    fn test_create_variables_shape() {
        let body = RichText::from_plain_text("Hello");
        let vars = CreatePostVariables {
            data: PostCreateInput {
                title: "T",
                slug: "t",
                author: "A",
                excerpt: "E",
                body: &body,
            },
            where_unique: SlugWhere { slug: "t" },
            to: vec![Stage::Published],
        };
        let value = serde_json::to_value(&vars).unwrap();
        assert_eq!(value["where"]["slug"], "t");
        assert_eq!(value["to"][0], "PUBLISHED");
        assert_eq!(
            value["data"]["body"]["children"][0]["type"],
            "paragraph"
        );
        assert_eq!(
            value["data"]["body"]["children"][0]["children"][0]["text"],
            "Hello"
        );
    }

    #[test]
    fn test_envelope_data() {
        let json = r#"{"data": {"posts": [], "postsConnection": {"aggregate": {"count": 7}}}}"#;
        let response: GraphQlResponse<PostsData> = serde_json::from_str(json).unwrap();
        let data = response.into_result("GetPostsList").unwrap();
        assert_eq!(data.posts_connection.aggregate.count, 7);
    }

    #[test]
    fn test_envelope_first_error_wins() {
        let json = r#"{"data": null, "errors": [{"message": "not allowed"}, {"message": "second"}]}"#;
        let response: GraphQlResponse<PostData> = serde_json::from_str(json).unwrap();
        let err = response.into_result("GetPostBySlug").unwrap_err();
        assert!(matches!(err, Error::GraphQl(ref m) if m == "not allowed"));
    }

    #[test]
    fn test_envelope_missing_data() {
        let response: GraphQlResponse<PostData> = serde_json::from_str("{}").unwrap();
        let err = response.into_result("GetPostBySlug").unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_envelope_errors_without_data_field() {
        // None of the response types implement Default.
        let json = r#"{"errors": [{"message": "slug taken"}]}"#;
        let response: GraphQlResponse<CreatePostData> = serde_json::from_str(json).unwrap();
        assert!(response.data.is_none());
        let err = response.into_result("CreatePost").unwrap_err();
        assert!(matches!(err, Error::GraphQl(ref m) if m == "slug taken"));
    }

    #[test]
    fn test_missing_post_is_none() {
        let json = r#"{"data": {"post": null}}"#;
        let response: GraphQlResponse<PostData> = serde_json::from_str(json).unwrap();
        assert!(response.into_result("GetPostBySlug").unwrap().post.is_none());
    }
}
