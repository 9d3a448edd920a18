use axum::{Router, middleware, routing::get};
use axum_helpers::health_router;
use domain_social::handlers::{self, ApiDoc};
use observability::{metrics_handler, metrics_middleware};

use crate::state::AppState;

pub mod health;

/// One route per catalog operation, mounted at the root.
pub fn routes(state: &AppState) -> Router {
    handlers::router(state.service.clone())
}

/// `/ready` (store probe) and `/metrics`.
///
/// Has state applied so it can be merged with the stateless app router.
pub fn ops_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Full HTTP surface: operations, docs, health, readiness and metrics.
pub async fn app(state: AppState) -> eyre::Result<Router> {
    let router = axum_helpers::create_router::<ApiDoc>(routes(&state)).await?;

    Ok(router
        .merge(health_router(state.config.app))
        .merge(ops_router(state))
        .layer(middleware::from_fn(metrics_middleware)))
}
