//! Casita Azul Admin - page controllers for the staff workflows.
//!
//! The browser front-end this replaces bound five pages to the listing API:
//! login, dashboard, property administration, user management, and agent
//! management. This crate carries those page flows as plain async state
//! machines over [`casita_azul_client`], so any front-end (the bundled CLI,
//! a TUI, tests) can drive them:
//!
//! - [`guards`] - navigation guards (authenticated-only, admin-only)
//! - [`forms`] - form drafts, validation, and the empty-string → `null`
//!   normalization pass applied before every write
//! - [`pages`] - one controller per page; the property editor in
//!   [`pages::properties`] is the most involved (scratch-copy editing,
//!   staged image uploads with a concurrent fan-out, principal-image rules)
//!
//! Pages hold their own scratch state; the only cross-page shared mutable
//! state is the injected [`casita_azul_client::SessionStore`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod error;
pub mod format;
pub mod forms;
pub mod guards;
pub mod pages;

pub use error::PageError;
pub use guards::{GuardDecision, Route, check_route};
