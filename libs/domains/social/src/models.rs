use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user node. Timestamps are whatever the store sends; they are passed
/// through unexamined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct User {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub email: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub created_at: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub updated_at: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    pub id: String,
    pub content: String,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub created_at: serde_json::Value,
    #[serde(default)]
    #[schema(value_type = Object)]
    pub updated_at: serde_json::Value,
}

// Inputs

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserInput {
    pub name: String,
    pub age: u32,
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateFollowInput {
    pub follower_id: String,
    pub followed_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostInput {
    pub user_id: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostEmbeddingInput {
    pub post_id: String,
    pub vector: Vec<f64>,
    pub content: String,
}

/// Input for every per-user lookup (posts, followers, following).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserIdInput {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SearchPostEmbeddingsInput {
    pub vector: Vec<f64>,
    /// Number of posts to return, at least 1
    #[schema(minimum = 1)]
    pub k: i64,
}

// Store responses, keyed by each operation's result field

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateUserResponse {
    pub user: User,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreatePostResponse {
    pub post: Post,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostsResponse {
    pub posts: Vec<Post>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowersResponse {
    pub followers: Vec<User>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FollowingResponse {
    pub following: Vec<User>,
}
