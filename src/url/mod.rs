//! URL handling module for llms-txt-gen
//!
//! This module provides seed URL validation and canonicalization, link
//! resolution, host comparison, and the path filters used by the follow policy.

mod domain;
mod matcher;
mod normalize;

// Re-export main functions
pub use domain::{extract_host, host_key, same_host};
pub use matcher::{has_asset_extension, matches_excluded_prefix, STATIC_ASSET_EXTENSIONS};
pub use normalize::{canonicalize_seed, resolve_link};
