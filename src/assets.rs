//! Asset catalog and load tracking.
//!
//! The catalog resolves asset paths against an optional CDN prefix and
//! stores host-created image handles and JSON data by key — the host does
//! all fetching and decoding. Load *progress* is a stage concern: a loader
//! component tracks a fixed set of paths, fires `Progress` as the host
//! reports each one (failed fetches report too, as completions), and fires
//! `Complete` exactly once when every path has reported.

#[cfg(test)]
#[path = "assets_test.rs"]
mod assets_test;

use std::collections::HashMap;

/// Opaque token for a host-decoded image resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ImageHandle(pub u64);

/// Path resolution and keyed storage for host-loaded assets.
#[derive(Default)]
pub struct AssetCatalog {
    cdn: String,
    images: HashMap<String, ImageHandle>,
    data: HashMap<String, serde_json::Value>,
}

impl AssetCatalog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the CDN prefix applied by [`AssetCatalog::resolve`].
    pub fn set_cdn(&mut self, cdn: impl Into<String>) {
        self.cdn = cdn.into();
    }

    /// Resolve a path to a fetchable URL.
    ///
    /// Absolute URLs (anything containing `//`) pass through unchanged; other
    /// paths get the CDN prefix, applied at most once.
    #[must_use]
    pub fn resolve(&self, path: &str) -> String {
        if path.contains("//") {
            return path.to_owned();
        }
        if !self.cdn.is_empty() && !path.contains(&self.cdn) {
            return format!("{}{path}", self.cdn);
        }
        path.to_owned()
    }

    /// Store a host-decoded image under its path.
    pub fn store_image(&mut self, path: impl Into<String>, handle: ImageHandle) {
        self.images.insert(path.into(), handle);
    }

    /// Previously stored image for `path`, if any.
    #[must_use]
    pub fn image(&self, path: &str) -> Option<ImageHandle> {
        self.images.get(path).copied()
    }

    /// Store JSON data under a name.
    pub fn store_data(&mut self, name: impl Into<String>, data: serde_json::Value) {
        self.data.insert(name.into(), data);
    }

    /// Previously stored data for `name`, if any.
    #[must_use]
    pub fn data(&self, name: &str) -> Option<&serde_json::Value> {
        self.data.get(name)
    }
}

/// Progress state for one loader component.
pub(crate) struct LoaderState {
    /// Tracked paths paired with whether the host has reported them.
    paths: Vec<(String, bool)>,
    loaded: usize,
}

impl LoaderState {
    pub fn new(paths: Vec<String>) -> Self {
        let paths = paths.into_iter().map(|p| (p, false)).collect();
        Self { paths, loaded: 0 }
    }

    /// Record one completed fetch.
    ///
    /// Returns the new percentage, or `None` when the path is unknown or
    /// already reported (both no-ops).
    #[allow(clippy::cast_precision_loss)]
    pub fn mark_loaded(&mut self, path: &str) -> Option<f64> {
        let entry = self.paths.iter_mut().find(|(p, _)| p == path)?;
        if entry.1 {
            return None;
        }
        entry.1 = true;
        self.loaded += 1;
        Some(self.loaded as f64 / self.paths.len() as f64 * 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.loaded == self.paths.len()
    }
}
