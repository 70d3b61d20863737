/*
 * Responsibility
 * - HTTP surface of the filter (routes() re-export)
 */
pub mod extractors;
pub mod handlers;
mod routes;

pub use routes::routes;
