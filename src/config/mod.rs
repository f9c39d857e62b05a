//! JSON configuration for detector runs.
//!
//! Two shapes are accepted: a bare [`DetectionParams`] object (see
//! [`load_params`]) or a [`RunConfig`] that also names the clusterer
//! settings and optional report outputs (see [`load_config`]). Missing
//! fields fall back to their defaults; the parameters are validated after
//! parsing.

use crate::detector::{DetectionParams, OverlapClusterer};
use crate::diagnostics::DetectionReport;
use crate::error::ConfigError;
use crate::image::io::{save_gray_png, write_json_file};
use crate::image::ImageView;
use crate::pyramid::Pyramid;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Where to write the JSON `DetectionReport`.
    pub json_out: Option<PathBuf>,
    /// Directory for pyramid level dumps.
    pub debug_dir: Option<PathBuf>,
}

impl OutputConfig {
    /// Write `report` to `json_out` and every non-empty level of `pyramid`
    /// to `debug_dir/level_<i>.png`. Unset targets are skipped.
    pub fn write(&self, report: &DetectionReport, pyramid: &Pyramid) -> Result<(), ConfigError> {
        if let Some(path) = &self.json_out {
            write_json_file(path, report)?;
            debug!("report written to {}", path.display());
        }
        if let Some(dir) = &self.debug_dir {
            for (index, level) in pyramid.levels.iter().enumerate() {
                if level.is_empty() {
                    continue;
                }
                save_gray_png(level, &dir.join(format!("level_{index}.png")))?;
            }
            debug!("pyramid levels written to {}", dir.display());
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub params: DetectionParams,
    pub clustering: OverlapClusterer,
    pub output: OutputConfig,
}

/// Read and validate detection parameters from a JSON file.
pub fn load_params(path: &Path) -> Result<DetectionParams, ConfigError> {
    let contents = read(path)?;
    let params: DetectionParams = parse(path, &contents)?;
    params.validate()?;
    Ok(params)
}

/// Read and validate a full run configuration from a JSON file.
pub fn load_config(path: &Path) -> Result<RunConfig, ConfigError> {
    let contents = read(path)?;
    let config: RunConfig = parse(path, &contents)?;
    config.params.validate()?;
    Ok(config)
}

/// Parse parameters from an in-memory JSON document.
pub fn params_from_str(contents: &str) -> Result<DetectionParams, ConfigError> {
    let params: DetectionParams = parse(Path::new("<inline>"), contents)?;
    params.validate()?;
    Ok(params)
}

fn read(path: &Path) -> Result<String, ConfigError> {
    fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })
}

fn parse<T: for<'de> Deserialize<'de>>(path: &Path, contents: &str) -> Result<T, ConfigError> {
    serde_json::from_str(contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}
