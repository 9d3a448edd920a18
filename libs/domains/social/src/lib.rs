//! Social Domain
//!
//! Named-operation gateway in front of a graph-plus-vector store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← one POST route per operation, /health
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← parse → bind → execute (deadline) → shape
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ StoreClient │  ← HelixClient over HTTP, or InMemoryStore
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Catalog    │  ← static operations, schemas, wrap flags
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use domain_social::{InMemoryStore, SocialService, handlers};
//!
//! let service = SocialService::new(Arc::new(InMemoryStore::new()), Duration::from_secs(30));
//! let router = handlers::router(service);
//! ```

pub mod binder;
pub mod catalog;
pub mod client;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod service;
pub mod shaper;
pub mod social_client;
pub mod value;

pub use binder::{BindError, bind, bind_for, parse_body};
pub use catalog::{CATALOG, Operation, ParamKind, ResultShape, find_operation};
pub use client::{HelixClient, StoreClient, decode, decode_for};
pub use error::{GatewayError, GatewayResult};
pub use memory::InMemoryStore;
pub use models::{
    CreateFollowInput, CreatePostEmbeddingInput, CreatePostInput, CreateUserInput, Post,
    SearchPostEmbeddingsInput, User, UserIdInput,
};
pub use service::SocialService;
pub use shaper::{Envelope, shape};
pub use social_client::SocialClient;
pub use value::{BoundParameters, Value};
