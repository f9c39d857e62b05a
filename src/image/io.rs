//! Output helpers for reports.
//!
//! - `write_json_file`: pretty-print a serializable value to disk.
//! - `save_gray_png`: dump a grayscale buffer (e.g. a pyramid level) as PNG.
use super::{GrayImageU8, ImageView};
use crate::error::ConfigError;
use image::{GrayImage, ImageFormat};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        message: format!("JSON serialization failed: {e}"),
    })?;
    fs::write(path, json).map_err(|e| ConfigError::Write {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

/// Save an 8-bit grayscale buffer as PNG.
pub fn save_gray_png(buffer: &GrayImageU8, path: &Path) -> Result<(), ConfigError> {
    ensure_parent_dir(path)?;
    let mut packed = Vec::with_capacity(buffer.width() * buffer.height());
    for row in buffer.rows() {
        packed.extend_from_slice(row);
    }
    let image = GrayImage::from_raw(buffer.width() as u32, buffer.height() as u32, packed)
        .ok_or_else(|| ConfigError::Write {
            path: path.to_path_buf(),
            message: "failed to create image buffer".to_string(),
        })?;
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
}

fn ensure_parent_dir(path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }
    }
    Ok(())
}
