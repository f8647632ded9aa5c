//! store
//!
//! Access to persisted posts.
//!
//! # Modules
//!
//! - `traits`: the `PostStore` trait, `PostQuery` and `StoreError`
//! - [`memory`]: in-memory implementation with failure injection

pub mod memory;
mod traits;

pub use memory::MemoryStore;
pub use traits::*;
