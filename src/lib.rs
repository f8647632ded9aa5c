//! postdata - storage paths, permalinks and updates for JF2 posts
//!
//! A Micropub endpoint receives a post as a JF2 property bag. This crate
//! decides where that post lives: it renders the storage path and public
//! URL from per-post-type templates, resolves the permalink against the
//! publication root, and applies Micropub update operations to stored
//! posts.
//!
//! # Architecture
//!
//! - [`core`] - Property bag types, publication configuration, slug helpers
//! - [`date`] - Date formatting and time zone handling with an injectable clock
//! - [`template`] - `{token}` path/URL templates and the resolver chain
//! - [`permalink`] - Joining rendered URLs onto the publication root
//! - [`update`] - add, replace, delete-properties and delete-entries
//! - [`jf2`] - Normalisation and post type discovery seams
//! - [`store`] - Post store seam and an in-memory store
//! - [`post`] - The [`PostData`](post::PostData) orchestrator
//!
//! # Invariants
//!
//! 1. Rendering is pure given its inputs and the clock
//! 2. Unresolved template tokens stay in the output verbatim
//! 3. Update operations never mutate their input; a new bag is returned
//! 4. The orchestrator reads from the store but never writes to it

pub mod core;
pub mod date;
pub mod jf2;
pub mod permalink;
pub mod post;
pub mod store;
pub mod template;
pub mod update;
