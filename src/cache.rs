//! Cache-key derivation for the host build cache
//!
//! The host owns the persistent cache; the filter's only contribution is a
//! stable key. The key is a pure function of (file content, relative path,
//! resolved options): identical triples always produce identical keys, and
//! changing any one component changes the key.
//!
//! Cache key: blake3(content || NUL || relative path || NUL || options hash)

use crate::filter::FilterOptions;
use std::path::Path;

/// Compute the blake3 hash of file content.
pub fn hash_content(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

/// Compute the hash of the resolved filter options.
///
/// Options are serialized to JSON first, so only data-bearing fields
/// participate; a caller-supplied generator function has no serialized form
/// and therefore never perturbs the key.
pub fn hash_options(options: &FilterOptions) -> String {
    let options_json = serde_json::to_string(options).unwrap_or_default();
    blake3::hash(options_json.as_bytes()).to_hex().to_string()
}

/// Derive the persistent-cache key for one file.
///
/// NUL separators keep the (content, path, options) concatenation
/// unambiguous; collision avoidance beyond that belongs to blake3.
pub fn cache_key(content: &str, relative_path: &Path, options: &FilterOptions) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(content.as_bytes());
    hasher.update(&[0]);
    hasher.update(relative_path.to_string_lossy().as_bytes());
    hasher.update(&[0]);
    hasher.update(hash_options(options).as_bytes());
    hasher.finalize().to_hex().to_string()
}
