use axum::{
    http::Method,
    routing::get,
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod state;
pub mod error;
pub mod middleware;
pub mod areas;
pub mod calendar;
pub mod reservations;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Every v1 route runs with an explicit session.
    let v1 = Router::new()
        .merge(areas::routes())
        .merge(calendar::routes())
        .merge(reservations::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_middleware,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(v1)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
