//! core
//!
//! Core domain types and configuration.
//!
//! # Modules
//!
//! - [`types`] - Property bag, property values and post records
//! - [`config`] - Publication configuration schema and loading
//! - [`naming`] - Slug derivation
//!
//! # Design Principles
//!
//! - Property shapes are explicit variants, never probed at runtime
//! - Configuration is strict: unknown keys are rejected

pub mod config;
pub mod naming;
pub mod types;
