//! Static declarations of every operation the gateway exposes.
//!
//! Nothing here is discovered at runtime. Each [`Operation`] fixes its
//! parameter schema, the shape of the store's answer and whether the answer is
//! wrapped in a one-element list before it reaches the front-end.

use axum::routing::MethodFilter;

/// HTTP method an operation is served on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn filter(self) -> MethodFilter {
        match self {
            HttpMethod::Get => MethodFilter::GET,
            HttpMethod::Post => MethodFilter::POST,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

/// Accepted kind of a declared parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    String,
    /// Integer in `0..=u32::MAX`.
    U32,
    /// Integer no smaller than `min`.
    Integer { min: i64 },
    /// Float; integers are widened.
    Float,
    /// Ordered floats; integers are widened, length unconstrained.
    Vector,
}

impl ParamKind {
    pub fn describe(self) -> String {
        match self {
            ParamKind::String => "a string".to_string(),
            ParamKind::U32 => format!("an integer in 0..={}", u32::MAX),
            ParamKind::Integer { min } => format!("an integer >= {}", min),
            ParamKind::Float => "a number".to_string(),
            ParamKind::Vector => "an array of numbers".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
}

const fn param(name: &'static str, kind: ParamKind) -> ParamSpec {
    ParamSpec { name, kind }
}

/// What the store answers with, keyed by the result field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultShape {
    /// `{ "<field>": { ... } }`
    Entity(&'static str),
    /// `{ "<field>": [ ... ] }`
    List(&'static str),
    /// Any JSON object.
    Dynamic,
}

impl ResultShape {
    pub fn field(self) -> Option<&'static str> {
        match self {
            ResultShape::Entity(field) | ResultShape::List(field) => Some(field),
            ResultShape::Dynamic => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Operation {
    pub name: &'static str,
    pub method: HttpMethod,
    pub params: &'static [ParamSpec],
    pub result: ResultShape,
    /// Wrap the result object in a one-element list.
    pub wrap: bool,
    pub summary: &'static str,
}

impl Operation {
    pub fn path(&self) -> String {
        format!("/{}", self.name)
    }

    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    pub fn takes_params(&self) -> bool {
        !self.params.is_empty()
    }
}

const USER_ID: &[ParamSpec] = &[param("user_id", ParamKind::String)];

pub static CREATE_USER: Operation = Operation {
    name: "createUser",
    method: HttpMethod::Post,
    params: &[
        param("name", ParamKind::String),
        param("age", ParamKind::U32),
        param("email", ParamKind::String),
    ],
    result: ResultShape::Entity("user"),
    wrap: true,
    summary: "Create a user",
};

pub static CREATE_FOLLOW: Operation = Operation {
    name: "createFollow",
    method: HttpMethod::Post,
    params: &[
        param("follower_id", ParamKind::String),
        param("followed_id", ParamKind::String),
    ],
    result: ResultShape::Dynamic,
    wrap: true,
    summary: "Make one user follow another",
};

pub static CREATE_POST: Operation = Operation {
    name: "createPost",
    method: HttpMethod::Post,
    params: &[
        param("user_id", ParamKind::String),
        param("content", ParamKind::String),
    ],
    result: ResultShape::Entity("post"),
    wrap: true,
    summary: "Create a post authored by a user",
};

pub static CREATE_POST_EMBEDDING: Operation = Operation {
    name: "createPostEmbedding",
    method: HttpMethod::Post,
    params: &[
        param("post_id", ParamKind::String),
        param("vector", ParamKind::Vector),
        param("content", ParamKind::String),
    ],
    result: ResultShape::Dynamic,
    wrap: true,
    summary: "Attach an embedding vector to a post",
};

pub static GET_USERS: Operation = Operation {
    name: "getUsers",
    method: HttpMethod::Post,
    params: &[],
    result: ResultShape::List("users"),
    wrap: true,
    summary: "List all users",
};

pub static GET_POSTS: Operation = Operation {
    name: "getPosts",
    method: HttpMethod::Post,
    params: &[],
    result: ResultShape::List("posts"),
    wrap: true,
    summary: "List all posts",
};

pub static GET_POSTS_BY_USER: Operation = Operation {
    name: "getPostsByUser",
    method: HttpMethod::Post,
    params: USER_ID,
    result: ResultShape::List("posts"),
    wrap: false,
    summary: "List the posts a user authored",
};

pub static GET_FOLLOWERS: Operation = Operation {
    name: "getFollowers",
    method: HttpMethod::Post,
    params: USER_ID,
    result: ResultShape::List("followers"),
    wrap: false,
    summary: "List users who follow a user",
};

pub static GET_FOLLOWING: Operation = Operation {
    name: "getFollowing",
    method: HttpMethod::Post,
    params: USER_ID,
    result: ResultShape::List("following"),
    wrap: false,
    summary: "List users a user follows",
};

pub static GET_USER_POSTS: Operation = Operation {
    name: "getUserPosts",
    method: HttpMethod::Post,
    params: USER_ID,
    result: ResultShape::List("posts"),
    wrap: true,
    summary: "List a user's posts (wrapped for list views)",
};

pub static SEARCH_POST_EMBEDDINGS: Operation = Operation {
    name: "searchPostEmbeddings",
    method: HttpMethod::Post,
    params: &[
        param("vector", ParamKind::Vector),
        param("k", ParamKind::Integer { min: 1 }),
    ],
    result: ResultShape::List("posts"),
    wrap: false,
    summary: "Find the k posts most similar to a vector",
};

pub static CATALOG: [&Operation; 11] = [
    &CREATE_USER,
    &CREATE_FOLLOW,
    &CREATE_POST,
    &CREATE_POST_EMBEDDING,
    &GET_USERS,
    &GET_POSTS,
    &GET_POSTS_BY_USER,
    &GET_FOLLOWERS,
    &GET_FOLLOWING,
    &GET_USER_POSTS,
    &SEARCH_POST_EMBEDDINGS,
];

pub fn find_operation(name: &str) -> Option<&'static Operation> {
    CATALOG.iter().copied().find(|op| op.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<_> = CATALOG.iter().map(|op| op.name).collect();
        assert_eq!(names.len(), CATALOG.len());
    }

    #[test]
    fn test_every_data_operation_is_post() {
        assert!(CATALOG.iter().all(|op| op.method == HttpMethod::Post));
    }

    #[test]
    fn test_wrap_flags() {
        let wrapped: Vec<_> = CATALOG.iter().filter(|op| op.wrap).map(|op| op.name).collect();
        assert_eq!(
            wrapped,
            vec![
                "createUser",
                "createFollow",
                "createPost",
                "createPostEmbedding",
                "getUsers",
                "getPosts",
                "getUserPosts",
            ]
        );
    }

    #[test]
    fn test_find_operation() {
        assert_eq!(find_operation("getFollowing"), Some(&GET_FOLLOWING));
        assert!(find_operation("dropDatabase").is_none());
        assert!(find_operation("").is_none());
    }

    #[test]
    fn test_parameterless_operations() {
        assert!(!GET_USERS.takes_params());
        assert!(!GET_POSTS.takes_params());
        assert_eq!(
            SEARCH_POST_EMBEDDINGS.param("k").map(|p| p.kind),
            Some(ParamKind::Integer { min: 1 })
        );
    }

    #[test]
    fn test_result_fields() {
        assert_eq!(CREATE_USER.result.field(), Some("user"));
        assert_eq!(GET_FOLLOWERS.result.field(), Some("followers"));
        assert_eq!(CREATE_FOLLOW.result.field(), None);
    }
}
