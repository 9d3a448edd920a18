//! In-process store answering the same operations, with the same result
//! fields, as the real graph/vector store.
//!
//! Used by tests, the demo workflow and `SOCIAL_STORE=memory`. It is not a
//! database: nothing is persisted and nothing is indexed.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use std::cmp::Ordering;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::client::StoreClient;
use crate::error::{GatewayError, GatewayResult};
use crate::value::BoundParameters;

#[derive(Debug, Clone)]
struct UserNode {
    id: String,
    name: String,
    age: i64,
    email: String,
    created_at: String,
}

#[derive(Debug, Clone)]
struct PostNode {
    id: String,
    author_id: String,
    content: String,
    created_at: String,
}

#[derive(Debug, Clone)]
struct FollowEdge {
    id: String,
    follower_id: String,
    followed_id: String,
}

#[derive(Debug, Clone)]
struct Embedding {
    post_id: String,
    vector: Vec<f64>,
}

/// Insertion order is preserved everywhere; list results and search ties
/// come back in creation order.
#[derive(Debug, Default)]
struct Graph {
    users: Vec<UserNode>,
    posts: Vec<PostNode>,
    follows: Vec<FollowEdge>,
    embeddings: Vec<Embedding>,
}

impl Graph {
    fn user(&self, id: &str) -> GatewayResult<&UserNode> {
        self.users
            .iter()
            .find(|u| u.id == id)
            .ok_or_else(|| GatewayError::Store(format!("User node not found: {}", id)))
    }

    fn post(&self, id: &str) -> GatewayResult<&PostNode> {
        self.posts
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| GatewayError::Store(format!("Post node not found: {}", id)))
    }

    fn posts_by(&self, user_id: &str) -> Vec<Value> {
        self.posts
            .iter()
            .filter(|p| p.author_id == user_id)
            .map(post_json)
            .collect()
    }
}

#[derive(Clone, Default)]
pub struct InMemoryStore {
    graph: Arc<RwLock<Graph>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn create_user(&self, params: &BoundParameters) -> GatewayResult<Value> {
        let user = UserNode {
            id: Uuid::new_v4().to_string(),
            name: required_str(params, "name")?.to_string(),
            age: required_integer(params, "age")?,
            email: required_str(params, "email")?.to_string(),
            created_at: now(),
        };

        let body = json!({ "user": user_json(&user) });
        self.graph.write().await.users.push(user);
        Ok(body)
    }

    async fn create_follow(&self, params: &BoundParameters) -> GatewayResult<Value> {
        let follower_id = required_str(params, "follower_id")?;
        let followed_id = required_str(params, "followed_id")?;

        let mut graph = self.graph.write().await;
        graph.user(follower_id)?;
        graph.user(followed_id)?;

        let edge = FollowEdge {
            id: Uuid::new_v4().to_string(),
            follower_id: follower_id.to_string(),
            followed_id: followed_id.to_string(),
        };
        let body = json!({
            "follow": {
                "id": edge.id,
                "from_node": edge.follower_id,
                "to_node": edge.followed_id,
                "label": "Follows",
            }
        });
        graph.follows.push(edge);
        Ok(body)
    }

    async fn create_post(&self, params: &BoundParameters) -> GatewayResult<Value> {
        let user_id = required_str(params, "user_id")?;

        let mut graph = self.graph.write().await;
        graph.user(user_id)?;

        let post = PostNode {
            id: Uuid::new_v4().to_string(),
            author_id: user_id.to_string(),
            content: required_str(params, "content")?.to_string(),
            created_at: now(),
        };
        let body = json!({ "post": post_json(&post) });
        graph.posts.push(post);
        Ok(body)
    }

    async fn create_post_embedding(&self, params: &BoundParameters) -> GatewayResult<Value> {
        let post_id = required_str(params, "post_id")?;
        let vector = required_vector(params, "vector")?;
        let content = required_str(params, "content")?;

        let mut graph = self.graph.write().await;
        graph.post(post_id)?;
        if let Some(existing) = graph.embeddings.first() {
            check_dimension(existing.vector.len(), vector.len())?;
        }

        let embedding_id = Uuid::new_v4().to_string();
        graph.embeddings.push(Embedding {
            post_id: post_id.to_string(),
            vector: vector.to_vec(),
        });
        Ok(json!({
            "embedding": {
                "id": embedding_id,
                "post_id": post_id,
                "content": content,
                "dimensions": vector.len(),
            }
        }))
    }

    async fn search_post_embeddings(&self, params: &BoundParameters) -> GatewayResult<Value> {
        let query = required_vector(params, "vector")?;
        let k = required_integer(params, "k")?;
        if k < 1 {
            return Err(GatewayError::Store("k must be at least 1".to_string()));
        }

        let graph = self.graph.read().await;
        // every stored embedding shares the first one's dimension
        if let Some(existing) = graph.embeddings.first() {
            check_dimension(existing.vector.len(), query.len())?;
        }

        let mut scored: Vec<(f64, &Embedding)> = graph
            .embeddings
            .iter()
            .map(|e| (cosine_similarity(query, &e.vector), e))
            .collect();
        // stable sort keeps insertion order for equal scores
        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let limit = usize::try_from(k).unwrap_or(usize::MAX);
        let posts = scored
            .into_iter()
            .take(limit)
            .map(|(_, e)| graph.post(&e.post_id).map(post_json))
            .collect::<GatewayResult<Vec<_>>>()?;

        Ok(json!({ "posts": posts }))
    }
}

#[async_trait]
impl StoreClient for InMemoryStore {
    async fn execute(&self, operation: &str, params: &BoundParameters) -> GatewayResult<Value> {
        tracing::debug!(operation, "In-memory store executing");

        match operation {
            "createUser" => self.create_user(params).await,
            "createFollow" => self.create_follow(params).await,
            "createPost" => self.create_post(params).await,
            "createPostEmbedding" => self.create_post_embedding(params).await,
            "getUsers" => {
                let graph = self.graph.read().await;
                let users: Vec<_> = graph.users.iter().map(user_json).collect();
                Ok(json!({ "users": users }))
            }
            "getPosts" => {
                let graph = self.graph.read().await;
                let posts: Vec<_> = graph.posts.iter().map(post_json).collect();
                Ok(json!({ "posts": posts }))
            }
            "getPostsByUser" | "getUserPosts" => {
                let user_id = required_str(params, "user_id")?;
                let graph = self.graph.read().await;
                Ok(json!({ "posts": graph.posts_by(user_id) }))
            }
            "getFollowers" => {
                let user_id = required_str(params, "user_id")?;
                let graph = self.graph.read().await;
                let followers = graph
                    .follows
                    .iter()
                    .filter(|f| f.followed_id == user_id)
                    .map(|f| graph.user(&f.follower_id).map(user_json))
                    .collect::<GatewayResult<Vec<_>>>()?;
                Ok(json!({ "followers": followers }))
            }
            "getFollowing" => {
                let user_id = required_str(params, "user_id")?;
                let graph = self.graph.read().await;
                let following = graph
                    .follows
                    .iter()
                    .filter(|f| f.follower_id == user_id)
                    .map(|f| graph.user(&f.followed_id).map(user_json))
                    .collect::<GatewayResult<Vec<_>>>()?;
                Ok(json!({ "following": following }))
            }
            "searchPostEmbeddings" => self.search_post_embeddings(params).await,
            other => Err(GatewayError::Store(format!("Couldn't find query '{}'", other))),
        }
    }

    async fn ping(&self) -> GatewayResult<()> {
        Ok(())
    }
}

/// Cosine similarity; a zero-length vector scores 0 against everything.
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

fn check_dimension(expected: usize, got: usize) -> GatewayResult<()> {
    if expected == got {
        Ok(())
    } else {
        Err(GatewayError::Store(format!(
            "Vector dimension mismatch: expected {}, got {}",
            expected, got
        )))
    }
}

fn now() -> String {
    Utc::now().to_rfc3339()
}

fn user_json(user: &UserNode) -> Value {
    json!({
        "id": user.id,
        "name": user.name,
        "age": user.age,
        "email": user.email,
        "created_at": user.created_at,
        "updated_at": user.created_at,
    })
}

fn post_json(post: &PostNode) -> Value {
    json!({
        "id": post.id,
        "content": post.content,
        "created_at": post.created_at,
        "updated_at": post.created_at,
    })
}

fn required_str<'a>(params: &'a BoundParameters, key: &str) -> GatewayResult<&'a str> {
    params.get_str(key).ok_or_else(|| missing(key))
}

fn required_integer(params: &BoundParameters, key: &str) -> GatewayResult<i64> {
    params.get_integer(key).ok_or_else(|| missing(key))
}

fn required_vector<'a>(params: &'a BoundParameters, key: &str) -> GatewayResult<&'a [f64]> {
    params.get_vector(key).ok_or_else(|| missing(key))
}

fn missing(key: &str) -> GatewayError {
    GatewayError::Store(format!("Missing or mistyped parameter: {}", key))
}
