// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation detection configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DrehwerkError, Result};

/// Default confidence threshold. A dominant angle must hold strictly more than
/// this share of all counted symbols before a rotation is proposed.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Line-level markers emitted by Tesseract for `ocr_line` spans, in both
/// quoting styles found in the wild.
pub const DEFAULT_LINE_MARKERS: [&str; 2] = ["<span class='ocr_line'", "<span class=\"ocr_line\""];

/// Settings for the content-based orientation detector.
///
/// Immutable once handed to a detector; every page processed by that detector
/// sees the same values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationConfig {
    /// Exclusive confidence bar in (0, 1).
    pub threshold: f64,
    /// Substrings that mark a report line as a candidate OCR text line.
    pub line_markers: Vec<String>,
}

impl Default for OrientationConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            line_markers: DEFAULT_LINE_MARKERS.iter().map(|m| m.to_string()).collect(),
        }
    }
}

impl OrientationConfig {
    /// Default markers with a custom threshold.
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Load a config from a JSON file. Missing fields fall back to defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject thresholds outside (0, 1) and empty marker sets.
    pub fn validate(&self) -> Result<()> {
        if !(self.threshold > 0.0 && self.threshold < 1.0) {
            return Err(DrehwerkError::InvalidConfig(format!(
                "threshold {} outside (0, 1)",
                self.threshold
            )));
        }
        if self.line_markers.is_empty() {
            return Err(DrehwerkError::InvalidConfig(
                "at least one line marker is required".to_string(),
            ));
        }
        if self.line_markers.iter().any(|m| m.is_empty()) {
            return Err(DrehwerkError::InvalidConfig(
                "line markers must not be empty strings".to_string(),
            ));
        }
        Ok(())
    }
}
