//! # edublog Core
//!
//! Shared logic for the edublog content service: text normalization,
//! query routing, the post store abstraction, search execution, and the
//! rule-based content analysis pipeline.
//!
//! This crate contains no tokio, sqlx, filesystem I/O, or other
//! native-only dependencies. Timeouts, persistence and transport live in
//! the `edublog` app crate.

pub mod analysis;
pub mod error;
pub mod models;
pub mod normalize;
pub mod query;
pub mod search;
pub mod similarity;
pub mod store;

pub use error::{Error, Result};
pub use models::{Audience, PostRecord, PostStatus};
