//! # Moderator Bootstrap
//!
//! Bulk-imports CSV comment datasets into a moderation platform through its
//! publisher API: one article per dataset, one comment per data row.
//!
//! ## Architecture
//!
//! - **models**: Dataset descriptors and request payloads
//! - **client**: Publisher API trait, HTTP and dry-run implementations
//! - **import**: Sequential import driver and run reports
//! - **config**: Environment-driven configuration

pub mod client;
pub mod config;
pub mod import;
pub mod models;

pub use models::*;
