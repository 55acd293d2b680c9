use crate::config::global_config;

/// Options for resolving logical indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexOptions {
    bounding_box_fallback: bool,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            bounding_box_fallback: global_config().bounding_box_fallback(),
        }
    }
}

impl IndexOptions {
    /// Return the bounding box fallback option.
    ///
    /// See the [bounding box fallback](crate::config::Config#bounding-box-fallback) configuration.
    #[must_use]
    pub fn bounding_box_fallback(&self) -> bool {
        self.bounding_box_fallback
    }

    /// Set the bounding box fallback option.
    pub fn set_bounding_box_fallback(&mut self, bounding_box_fallback: bool) {
        self.bounding_box_fallback = bounding_box_fallback;
    }

    /// Return the options with the bounding box fallback option set.
    #[must_use]
    pub fn with_bounding_box_fallback(mut self, bounding_box_fallback: bool) -> Self {
        self.bounding_box_fallback = bounding_box_fallback;
        self
    }
}
