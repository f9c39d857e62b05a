use serde::{Deserialize, Serialize};

/// Depth used by the original detector: full resolution plus four halvings.
pub const DEFAULT_PYRAMID_LEVELS: usize = 5;

/// Options controlling pyramid construction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PyramidOptions {
    /// Number of pyramid levels (>= 1) when the pyramid is enabled.
    pub levels: usize,
    /// When false only level 0 is produced.
    pub enabled: bool,
}

impl Default for PyramidOptions {
    fn default() -> Self {
        Self::new(DEFAULT_PYRAMID_LEVELS)
    }
}

impl PyramidOptions {
    pub fn new(levels: usize) -> Self {
        Self {
            levels,
            enabled: true,
        }
    }

    /// Level-0-only pyramid.
    pub fn disabled() -> Self {
        Self {
            levels: 1,
            enabled: false,
        }
    }

    /// Number of levels actually built.
    pub fn effective_levels(&self) -> usize {
        if self.enabled {
            self.levels.max(1)
        } else {
            1
        }
    }
}
