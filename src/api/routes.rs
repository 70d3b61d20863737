/*
 * Responsibility
 * - Every method and path goes to the check handler: the proxy forwards the
 *   original request line, so there are no reserved paths (a "/health"
 *   route would let that path through unauthenticated)
 */
use axum::Router;

use crate::api::handlers::check::check;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().fallback(check)
}
