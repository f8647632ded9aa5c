//! post
//!
//! Post data orchestration: turning request properties or an update
//! operation into the `{path, properties}` record the endpoint stores.
//!
//! # Modules
//!
//! - `errors`: [`PostDataError`] and its HTTP status mapping
//! - `post_data`: the [`PostData`] orchestrator

mod errors;
mod post_data;

pub use errors::{ErrorKind, PostDataError};
pub use post_data::PostData;
