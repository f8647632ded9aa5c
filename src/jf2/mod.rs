//! jf2
//!
//! Seams for the collaborators that shape JF2 properties before paths are
//! rendered.
//!
//! # Design
//!
//! Deciding what properties a post has is upstream work. The orchestrator
//! only needs two answers from it, expressed as traits so the endpoint
//! layer can supply its own:
//!
//! - [`Normaliser`]: tidy incoming properties (must be idempotent)
//! - [`PostTypeDiscovery`]: name the post type of a property bag
//!
//! [`Jf2Normaliser`] and [`DiscoveredPostType`] are the default
//! implementations.

mod normalise;
mod post_type;

pub use normalise::Jf2Normaliser;
pub use post_type::DiscoveredPostType;

use thiserror::Error;

use crate::core::config::Publication;
use crate::core::types::PropertyBag;
use crate::date::{Clock, DateError};

/// Errors from property normalisation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NormaliseError {
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("invalid property '{property}': {message}")]
    InvalidProperty { property: String, message: String },
}

/// Normalise JF2 properties for a publication.
///
/// Implementations must be idempotent: normalising an already normalised
/// bag returns it unchanged.
pub trait Normaliser: Send + Sync {
    fn normalise(
        &self,
        publication: &Publication,
        properties: PropertyBag,
        clock: &dyn Clock,
    ) -> Result<PropertyBag, NormaliseError>;
}

/// Determine the post type of a property bag.
///
/// Must be deterministic for a given bag.
pub trait PostTypeDiscovery: Send + Sync {
    fn post_type(&self, properties: &PropertyBag) -> String;
}
