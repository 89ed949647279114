//! # edublog
//!
//! Content search and rule-based analysis for an educational blog.
//!
//! Students and professors search posts through separate routes: students
//! only ever see active posts and need a closer match, professors search
//! every post with a looser threshold. Short queries fall back to
//! accent-insensitive substring matching. A deterministic analysis
//! pipeline tags, summarizes, classifies and moderates post text.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌──────────────┐   ┌─────────────┐
//! │ JSON posts │──▶│   import     │──▶│   SQLite    │
//! └────────────┘   └──────────────┘   │   (posts)   │
//!                                     └──────┬──────┘
//!                                            │ PostStore
//!                      ┌─────────────────────┤
//!                      ▼                     ▼
//!                 ┌──────────┐         ┌──────────┐
//!                 │   CLI    │         │   HTTP   │
//!                 │(edublog) │         │  (axum)  │
//!                 └──────────┘         └──────────┘
//! ```
//!
//! Search and analysis logic lives in `edublog-core`; this crate adds
//! configuration, persistence, timeouts and transport.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`db`] | Database connection |
//! | [`migrate`] | Schema migrations |
//! | [`sqlite_store`] | SQLite `PostStore` backend |
//! | [`import`] | Bulk post import |
//! | [`search`] | Time-bounded search entry point |
//! | [`analyze`] | Analysis CLI commands |
//! | [`server`] | HTTP server |

pub mod analyze;
pub mod config;
pub mod db;
pub mod import;
pub mod migrate;
pub mod search;
pub mod server;
pub mod sqlite_store;
