//! Cuppa Core - Shared types library.
//!
//! This crate provides common types used across all Cuppa components:
//! - `web` - The public café directory site
//! - `cli` - Command-line tools for schema setup and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access, no HTTP.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, prices, and seat buckets

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
