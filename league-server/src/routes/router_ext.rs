//! Router extension for oneshot calls
//!
//! Runs a request through the fully layered application without going
//! through the network stack. Used by the integration tests.

use axum::body::Body;
use http::{Request, Response};
use tower::ServiceExt;

use crate::core::ServerState;
use crate::routes::build_app;

/// Process a single request against a fresh app built from `state`
///
/// # Example
///
/// ```ignore
/// let request = Request::builder().uri("/health").body(Body::empty())?;
/// let response = oneshot(&state, request).await;
/// ```
pub async fn oneshot(state: &ServerState, request: Request<Body>) -> Response<Body> {
    let app = build_app(state).with_state(state.clone());
    match app.oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    }
}
