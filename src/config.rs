//! Tilesegy global configuration options.

use std::sync::{OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Global configuration options for the tilesegy crate.
///
/// Retrieve the global [`Config`] with [`global_config`] and modify it with [`global_config_mut`].
///
/// # Indexing Configuration Options
///
/// ## Bounding Box Fallback
///  > default: [`true`]
///
/// If enabled, a set of positions that is strictly monotonic but irregularly spaced (e.g. the per-axis positions of a strided trace range over a grid) is read as its enclosing contiguous range, and the requested positions are selected from the read.
/// Otherwise, resolving such a set fails with a [`NonRepresentableRangeError`](crate::index_errors::NonRepresentableRangeError).
///
/// This option is the default for [`IndexOptions`](crate::index::IndexOptions), which can override it for any resolution.
///
/// ```rust
/// # use tilesegy::config::{global_config, global_config_mut};
/// global_config_mut().set_bounding_box_fallback(false);
/// assert!(!global_config().bounding_box_fallback());
/// ```
#[derive(Debug)]
pub struct Config {
    bounding_box_fallback: bool,
}

#[allow(clippy::derivable_impls)]
impl Default for Config {
    fn default() -> Self {
        Config {
            bounding_box_fallback: true,
        }
    }
}

impl Config {
    /// Get the [bounding box fallback](#bounding-box-fallback) configuration.
    #[must_use]
    pub fn bounding_box_fallback(&self) -> bool {
        self.bounding_box_fallback
    }

    /// Set the [bounding box fallback](#bounding-box-fallback) configuration.
    pub fn set_bounding_box_fallback(&mut self, bounding_box_fallback: bool) {
        self.bounding_box_fallback = bounding_box_fallback;
    }
}

static CONFIG: OnceLock<RwLock<Config>> = OnceLock::new();

/// Returns a reference to the global tilesegy configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config() -> RwLockReadGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .read()
        .unwrap()
}

/// Returns a mutable reference to the global tilesegy configuration.
///
/// # Panics
/// This function panics if the underlying lock has been poisoned and might panic if the global config is already held by the current thread.
pub fn global_config_mut() -> RwLockWriteGuard<'static, Config> {
    CONFIG
        .get_or_init(|| RwLock::new(Config::default()))
        .write()
        .unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_bounding_box_fallback() {
        assert!(Config::default().bounding_box_fallback());
        let mut config = Config::default();
        config.set_bounding_box_fallback(false);
        assert!(!config.bounding_box_fallback());
        assert!(global_config().bounding_box_fallback());
    }
}
