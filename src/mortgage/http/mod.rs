use axum::{routing::post, Router};

mod handlers;
pub mod reps;

/// Routes for the calculator.
///
/// `POST /` is the only endpoint. Every other method and path falls back to a
/// 404 response.
pub fn routes() -> Router {
    Router::new()
        .route(
            "/",
            post(handlers::calculate_payment).fallback(handlers::unknown_endpoint),
        )
        .fallback(handlers::unknown_endpoint)
}
