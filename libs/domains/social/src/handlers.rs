use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{MethodRouter, on},
};
use axum_helpers::errors::handlers::method_not_allowed;
use axum_helpers::errors::responses::{
    BadRequestResponse, MethodNotAllowedResponse, StoreErrorResponse,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa::openapi::path::{HttpMethod as DocMethod, OperationBuilder, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::schema::{ArrayBuilder, ObjectBuilder, Schema};
use utoipa::openapi::{ContentBuilder, PathsBuilder, Ref, RefOr, Required, ResponseBuilder};

use crate::catalog::{CATALOG, HttpMethod, Operation, ResultShape};
use crate::error::GatewayResult;
use crate::models::{
    CreateFollowInput, CreatePostEmbeddingInput, CreatePostInput, CreatePostResponse,
    CreateUserInput, CreateUserResponse, FollowersResponse, FollowingResponse, Post,
    PostsResponse, SearchPostEmbeddingsInput, User, UserIdInput, UsersResponse,
};
use crate::service::SocialService;
use crate::shaper::Envelope;

pub const TAG: &str = "social";

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(
            User,
            Post,
            CreateUserInput,
            CreateFollowInput,
            CreatePostInput,
            CreatePostEmbeddingInput,
            UserIdInput,
            SearchPostEmbeddingsInput,
            CreateUserResponse,
            CreatePostResponse,
            UsersResponse,
            PostsResponse,
            FollowersResponse,
            FollowingResponse,
        ),
        responses(BadRequestResponse, MethodNotAllowedResponse, StoreErrorResponse)
    ),
    tags(
        (name = TAG, description = "Named social graph operations")
    )
)]
struct Components;

/// OpenAPI documentation for the operation surface.
///
/// Paths are generated from the catalog so the document cannot drift from
/// the routes.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = Components::openapi();

        let paths = CATALOG.iter().fold(PathsBuilder::new(), |paths, op| {
            let method = match op.method {
                HttpMethod::Get => DocMethod::Get,
                HttpMethod::Post => DocMethod::Post,
            };
            paths.path(op.path(), PathItem::new(method, operation_doc(op)))
        });
        doc.paths = paths.build();
        doc
    }
}

fn operation_doc(op: &Operation) -> utoipa::openapi::path::Operation {
    let mut builder = OperationBuilder::new()
        .tag(TAG)
        .operation_id(Some(op.name))
        .summary(Some(op.summary))
        .response(
            "200",
            ResponseBuilder::new()
                .description(if op.wrap {
                    "Store result wrapped in a one-element list"
                } else {
                    "Store result"
                })
                .content(
                    "application/json",
                    ContentBuilder::new().schema(Some(result_schema(op))).build(),
                )
                .build(),
        )
        .response("400", Ref::from_response_name("BadRequestResponse"))
        .response("405", Ref::from_response_name("MethodNotAllowedResponse"))
        .response("500", Ref::from_response_name("StoreErrorResponse"));

    if let Some(schema) = input_schema_name(op) {
        builder = builder.request_body(Some(
            RequestBodyBuilder::new()
                .content(
                    "application/json",
                    ContentBuilder::new()
                        .schema(Some(Ref::from_schema_name(schema)))
                        .build(),
                )
                .required(Some(Required::True))
                .build(),
        ));
    }

    builder.build()
}

fn input_schema_name(op: &Operation) -> Option<&'static str> {
    match op.name {
        "createUser" => Some("CreateUserInput"),
        "createFollow" => Some("CreateFollowInput"),
        "createPost" => Some("CreatePostInput"),
        "createPostEmbedding" => Some("CreatePostEmbeddingInput"),
        "searchPostEmbeddings" => Some("SearchPostEmbeddingsInput"),
        _ if op.param("user_id").is_some() => Some("UserIdInput"),
        _ => None,
    }
}

fn result_schema(op: &Operation) -> RefOr<Schema> {
    let object: RefOr<Schema> = match op.result {
        ResultShape::Entity("user") => Ref::from_schema_name("CreateUserResponse").into(),
        ResultShape::Entity("post") => Ref::from_schema_name("CreatePostResponse").into(),
        ResultShape::List("users") => Ref::from_schema_name("UsersResponse").into(),
        ResultShape::List("posts") => Ref::from_schema_name("PostsResponse").into(),
        ResultShape::List("followers") => Ref::from_schema_name("FollowersResponse").into(),
        ResultShape::List("following") => Ref::from_schema_name("FollowingResponse").into(),
        _ => RefOr::T(Schema::Object(ObjectBuilder::new().build())),
    };

    if op.wrap {
        RefOr::T(Schema::Array(
            ArrayBuilder::new()
                .items(object)
                .min_items(Some(1))
                .max_items(Some(1))
                .build(),
        ))
    } else {
        object
    }
}

/// Create the router with one route per catalog operation.
///
/// Any other method on an operation path gets a JSON 405 and never reaches
/// the store.
pub fn router(service: SocialService) -> Router {
    let shared_service = Arc::new(service);

    CATALOG
        .iter()
        .copied()
        .fold(Router::new(), |router, op| {
            router.route(&op.path(), operation_route(op))
        })
        .with_state(shared_service)
}

fn operation_route(op: &'static Operation) -> MethodRouter<Arc<SocialService>> {
    on(
        op.method.filter(),
        move |State(service): State<Arc<SocialService>>, body: Bytes| async move {
            dispatch(&service, op, &body).await
        },
    )
    .fallback(method_not_allowed)
}

async fn dispatch(
    service: &SocialService,
    op: &'static Operation,
    body: &[u8],
) -> GatewayResult<Json<Envelope>> {
    service.dispatch(op, body).await.map(Json)
}
