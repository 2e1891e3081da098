// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for page orientation decisions.

use serde::{Deserialize, Serialize};

/// Largest rotation value a decision may carry.
pub const MAX_ROTATION: i32 = 360;

/// Outcome of analysing one page's hOCR report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PageOrientationResult {
    /// No candidate line contributed a single symbol.
    NoReadableText,
    /// Either no angle cleared the threshold, or the winner already matches
    /// the page's rotation.
    Unchanged,
    /// The page should be given a new rotation.
    Rotate {
        /// Winning angle in degrees, clamped to [0, 360].
        angle: i32,
        /// Share of all symbols held by the winning angle, in (0, 1].
        confidence: f64,
    },
}

impl PageOrientationResult {
    /// The proposed rotation, if any.
    pub fn rotation(&self) -> Option<i32> {
        match self {
            Self::Rotate { angle, .. } => Some(*angle),
            _ => None,
        }
    }

    pub fn is_rotate(&self) -> bool {
        matches!(self, Self::Rotate { .. })
    }
}

/// Clamp an OCR-reported angle into [0, 360].
///
/// Angles are not snapped to multiples of 90; whatever the OCR engine
/// reported passes through as long as it is in range.
pub fn clamp_rotation(angle: i32) -> i32 {
    angle.clamp(0, MAX_ROTATION)
}

/// Normalise an arbitrary rotation (e.g. a PDF `/Rotate` of -90) into [0, 360).
pub fn normalize_rotation(rotation: i64) -> i32 {
    rotation.rem_euclid(360) as i32
}

/// The correction a reader would apply to undo `rotation`.
///
/// Only used to phrase log messages. Stored and returned rotations are never
/// passed through this.
pub fn display_correction(rotation: i32) -> i32 {
    (360 - rotation).rem_euclid(360)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_keeps_in_range_angles() {
        assert_eq!(clamp_rotation(0), 0);
        assert_eq!(clamp_rotation(90), 90);
        assert_eq!(clamp_rotation(45), 45);
        assert_eq!(clamp_rotation(360), 360);
    }

    #[test]
    fn clamp_bounds_out_of_range_angles() {
        assert_eq!(clamp_rotation(-10), 0);
        assert_eq!(clamp_rotation(720), 360);
        assert_eq!(clamp_rotation(i32::MAX), 360);
    }

    #[test]
    fn normalize_wraps_negative_and_large_values() {
        assert_eq!(normalize_rotation(-90), 270);
        assert_eq!(normalize_rotation(450), 90);
        assert_eq!(normalize_rotation(360), 0);
        assert_eq!(normalize_rotation(0), 0);
    }

    #[test]
    fn display_correction_mirrors_rotation() {
        assert_eq!(display_correction(0), 0);
        assert_eq!(display_correction(90), 270);
        assert_eq!(display_correction(180), 180);
        assert_eq!(display_correction(270), 90);
        assert_eq!(display_correction(360), 0);
    }

    #[test]
    fn rotation_accessor() {
        let rotate = PageOrientationResult::Rotate {
            angle: 90,
            confidence: 0.6,
        };
        assert_eq!(rotate.rotation(), Some(90));
        assert!(rotate.is_rotate());
        assert_eq!(PageOrientationResult::Unchanged.rotation(), None);
        assert!(!PageOrientationResult::NoReadableText.is_rotate());
    }

    #[test]
    fn result_serializes_with_variant_name() {
        let json = serde_json::to_string(&PageOrientationResult::Rotate {
            angle: 180,
            confidence: 1.0,
        })
        .expect("serialize");
        assert_eq!(json, r#"{"Rotate":{"angle":180,"confidence":1.0}}"#);
    }
}
