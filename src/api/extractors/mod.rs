/*
 * Responsibility
 * - handler が使う extractor の re-export
 */
pub mod auth_ctx;
pub mod json_body;
pub mod params;
pub mod public_id;

pub use auth_ctx::{AuthCtx, AuthCtxExtractor};
pub use json_body::JsonBody;
pub use params::{PathParam, QueryParams};
