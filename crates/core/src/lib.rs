//! Casita Azul Core - Shared types library.
//!
//! This crate provides common types used across all Casita Azul components:
//! - `client` - Typed REST client for the listing API
//! - `admin` - Page controllers for the admin workflows
//! - `cli` - Command-line front-end
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and roles
//! - [`models`] - Wire models for listings, catalogs, agents, and users

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;

pub use models::*;
pub use types::*;
