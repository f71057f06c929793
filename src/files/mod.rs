//! Static file lookup.
//!
//! `resolve` turns a request URI into a path confined to the document root;
//! `classify` probes that path and sorts the outcome into the status
//! taxonomy.

pub mod classify;
pub mod resolve;

pub use classify::{ResolvedResource, ResourceKind, classify};
pub use resolve::resolve;
