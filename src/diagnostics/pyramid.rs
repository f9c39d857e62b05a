use crate::image::ImageView;
use crate::pyramid::{LevelScaling, Pyramid};
use serde::{Deserialize, Serialize};

/// Statistics for a single level of the image pyramid.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidLevelReport {
    pub level_index: usize,
    pub width: usize,
    pub height: usize,
    pub mean_intensity: f32,
    /// Factors mapping this level back to level 0.
    pub scaling: LevelScaling,
}

/// Pyramid construction details captured by the driver.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PyramidStage {
    pub elapsed_ms: f64,
    pub levels: Vec<PyramidLevelReport>,
}

impl PyramidStage {
    pub fn from_pyramid(pyramid: &Pyramid, elapsed_ms: f64) -> Self {
        let levels = (0..pyramid.len())
            .filter_map(|index| {
                let lvl = pyramid.level(index)?;
                Some(PyramidLevelReport {
                    level_index: index,
                    width: lvl.width(),
                    height: lvl.height(),
                    mean_intensity: lvl.mean_intensity(),
                    scaling: pyramid.scaling(index)?,
                })
            })
            .collect();
        Self { elapsed_ms, levels }
    }
}
