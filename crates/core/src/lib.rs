//! Bizniz Core - Shared types library.
//!
//! This crate provides common types used across all Bizniz components:
//! - `client` - The data synchronization layer talking to the remote API
//! - `cli` - Operator command-line tools
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Entities, drafts, and newtype wrappers for type-safe IDs

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
