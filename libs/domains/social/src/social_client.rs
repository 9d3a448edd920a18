//! Typed facade: one async method per operation.
//!
//! Inputs go through the same schema binding as HTTP bodies, so a value the
//! HTTP surface would reject is rejected here too. Results are decoded into
//! the typed destinations keyed by each operation's result field.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::binder::{BindError, bind_for};
use crate::catalog::{self, Operation};
use crate::client::decode;
use crate::error::{GatewayError, GatewayResult};
use crate::models::{
    CreateFollowInput, CreatePostEmbeddingInput, CreatePostInput, CreatePostResponse,
    CreateUserInput, CreateUserResponse, FollowersResponse, FollowingResponse, Post,
    PostsResponse, SearchPostEmbeddingsInput, User, UserIdInput, UsersResponse,
};
use crate::service::SocialService;

#[derive(Clone)]
pub struct SocialClient {
    service: SocialService,
}

impl SocialClient {
    pub fn new(service: SocialService) -> Self {
        Self { service }
    }

    async fn call<I, O>(&self, operation: &'static Operation, input: &I) -> GatewayResult<O>
    where
        I: Serialize + ?Sized,
        O: DeserializeOwned,
    {
        let raw = match serde_json::to_value(input)? {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            _ => return Err(GatewayError::Bind(BindError::NotAnObject)),
        };
        let params = bind_for(operation, &raw)?;
        let result = self.service.execute(operation, &params).await?;
        decode(Value::Object(result))
    }

    pub async fn create_user(&self, input: &CreateUserInput) -> GatewayResult<User> {
        let response: CreateUserResponse = self.call(&catalog::CREATE_USER, input).await?;
        Ok(response.user)
    }

    /// Returns the store's follow result as-is.
    pub async fn create_follow(
        &self,
        input: &CreateFollowInput,
    ) -> GatewayResult<Map<String, Value>> {
        self.call(&catalog::CREATE_FOLLOW, input).await
    }

    pub async fn create_post(&self, input: &CreatePostInput) -> GatewayResult<Post> {
        let response: CreatePostResponse = self.call(&catalog::CREATE_POST, input).await?;
        Ok(response.post)
    }

    /// Returns the store's embedding result as-is.
    pub async fn create_post_embedding(
        &self,
        input: &CreatePostEmbeddingInput,
    ) -> GatewayResult<Map<String, Value>> {
        self.call(&catalog::CREATE_POST_EMBEDDING, input).await
    }

    pub async fn get_users(&self) -> GatewayResult<Vec<User>> {
        let response: UsersResponse = self.call(&catalog::GET_USERS, &()).await?;
        Ok(response.users)
    }

    pub async fn get_posts(&self) -> GatewayResult<Vec<Post>> {
        let response: PostsResponse = self.call(&catalog::GET_POSTS, &()).await?;
        Ok(response.posts)
    }

    pub async fn get_posts_by_user(&self, input: &UserIdInput) -> GatewayResult<Vec<Post>> {
        let response: PostsResponse = self.call(&catalog::GET_POSTS_BY_USER, input).await?;
        Ok(response.posts)
    }

    pub async fn get_user_posts(&self, input: &UserIdInput) -> GatewayResult<Vec<Post>> {
        let response: PostsResponse = self.call(&catalog::GET_USER_POSTS, input).await?;
        Ok(response.posts)
    }

    pub async fn get_followers(&self, input: &UserIdInput) -> GatewayResult<Vec<User>> {
        let response: FollowersResponse = self.call(&catalog::GET_FOLLOWERS, input).await?;
        Ok(response.followers)
    }

    pub async fn get_following(&self, input: &UserIdInput) -> GatewayResult<Vec<User>> {
        let response: FollowingResponse = self.call(&catalog::GET_FOLLOWING, input).await?;
        Ok(response.following)
    }

    pub async fn search_post_embeddings(
        &self,
        input: &SearchPostEmbeddingsInput,
    ) -> GatewayResult<Vec<Post>> {
        let response: PostsResponse = self.call(&catalog::SEARCH_POST_EMBEDDINGS, input).await?;
        Ok(response.posts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryStore;
    use std::sync::Arc;
    use std::time::Duration;

    fn client() -> SocialClient {
        let service = SocialService::new(Arc::new(InMemoryStore::new()), Duration::from_secs(5));
        SocialClient::new(service)
    }

    #[tokio::test]
    async fn test_create_user_round_trip() {
        let client = client();
        let created = client
            .create_user(&CreateUserInput {
                name: "Alice".to_string(),
                age: 25,
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();

        let users = client.get_users().await.unwrap();
        assert_eq!(users, vec![created.clone()]);
        assert_eq!(created.age, 25);
    }

    #[tokio::test]
    async fn test_search_rejects_zero_k_before_store() {
        let err = client()
            .search_post_embeddings(&SearchPostEmbeddingsInput {
                vector: vec![0.1],
                k: 0,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Bind(BindError::OutOfRange { .. })));
    }

    #[tokio::test]
    async fn test_posts_by_user() {
        let client = client();
        let alice = client
            .create_user(&CreateUserInput {
                name: "Alice".to_string(),
                age: 25,
                email: "alice@example.com".to_string(),
            })
            .await
            .unwrap();
        let post = client
            .create_post(&CreatePostInput {
                user_id: alice.id.clone(),
                content: "hello".to_string(),
            })
            .await
            .unwrap();

        let by_user = UserIdInput { user_id: alice.id };
        assert_eq!(client.get_posts_by_user(&by_user).await.unwrap(), vec![post.clone()]);
        assert_eq!(client.get_user_posts(&by_user).await.unwrap(), vec![post]);
    }
}
