/*
 * Responsibility
 * - HTTP 層 (routes / handlers / DTO / extractor / owner-match policy)
 * - routes() の re-export
 */
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod policy;
mod routes;

pub use routes::routes;
