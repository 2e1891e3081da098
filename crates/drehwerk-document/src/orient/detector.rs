// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Content-based orientation detection.
//
// Every OCR line in an hOCR report carries an optional `textangle` hint. The
// detector weighs each hint by the number of letters recognised on its line
// and, when one angle holds a clear majority of all letters on the page,
// proposes that angle as the page's new rotation.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use drehwerk_core::OrientationConfig;
use drehwerk_core::error::Result;
use drehwerk_core::types::{PageOrientationResult, clamp_rotation, display_correction};
use tracing::{debug, info, instrument, warn};

use super::context::PageContext;
use crate::hocr::{LineRecord, SymbolTally};

/// What a single pass over a report found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageAnalysis {
    /// Symbols per angle, in first-observed order.
    pub tally: SymbolTally,
    /// Lines matching a line marker, whether or not they held any symbols.
    pub candidate_lines: usize,
}

impl PageAnalysis {
    pub fn total_symbols(&self) -> u64 {
        self.tally.total()
    }

    /// The prevalent angle and its share of all symbols.
    ///
    /// `None` only when nothing was counted, so the division is always by a
    /// positive total.
    pub fn prevalent(&self) -> Option<(i32, f64)> {
        self.tally
            .prevalent()
            .map(|(angle, count)| (angle, count as f64 / self.tally.total() as f64))
    }
}

/// Decides page rotations from hOCR reports.
///
/// Holds only the immutable [`OrientationConfig`]; all per-page state lives
/// on the stack of a single call, so one detector can be shared by threads
/// working on different pages.
#[derive(Debug, Clone)]
pub struct OrientationDetector {
    config: OrientationConfig,
}

impl OrientationDetector {
    /// Create a detector after validating `config`.
    pub fn new(config: OrientationConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Threshold 0.5 and the standard Tesseract line markers.
    pub fn with_defaults() -> Self {
        Self {
            config: OrientationConfig::default(),
        }
    }

    pub fn config(&self) -> &OrientationConfig {
        &self.config
    }

    fn is_candidate(&self, line: &str) -> bool {
        self.config
            .line_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    // -- Scan -----------------------------------------------------------------

    /// Read a report to the end and tally symbols per angle.
    ///
    /// # Errors
    ///
    /// Returns [`DrehwerkError::Io`](drehwerk_core::DrehwerkError::Io) if the
    /// reader fails or the report is not valid UTF-8.
    pub fn analyze<R: BufRead>(&self, reader: R) -> Result<PageAnalysis> {
        let mut analysis = PageAnalysis::default();

        for (line_number, line) in reader.lines().enumerate() {
            let line = line?;
            if !self.is_candidate(&line) {
                continue;
            }
            analysis.candidate_lines += 1;

            let record = LineRecord::parse(&line);
            if record.angle_hints > 1 {
                warn!(
                    line = line_number + 1,
                    hints = record.angle_hints,
                    "Found more than 1 textangle value in an hOCR line. The hOCR file might be damaged."
                );
            }

            analysis.tally.add(record.angle, record.symbol_count());
        }

        debug!(
            candidate_lines = analysis.candidate_lines,
            angles = analysis.tally.len(),
            symbols = analysis.total_symbols(),
            "hOCR scan complete"
        );
        Ok(analysis)
    }

    // -- Decision -------------------------------------------------------------

    /// Turn an analysis into a decision for the page at `page_index`.
    ///
    /// Pure apart from logging; the caller applies the result.
    pub fn decide(
        &self,
        analysis: &PageAnalysis,
        page_index: usize,
        existing_rotation: i32,
    ) -> PageOrientationResult {
        let page_num = page_index + 1;

        let Some((angle, ratio)) = analysis.prevalent() else {
            info!("{page_num:4}: page seems not to have any readable text");
            return PageOrientationResult::NoReadableText;
        };

        if ratio <= self.config.threshold {
            debug!(
                page = page_num,
                angle,
                ratio,
                threshold = self.config.threshold,
                "Prevalent angle below confidence threshold"
            );
            return PageOrientationResult::Unchanged;
        }

        let rotation = clamp_rotation(angle);
        if rotation == existing_rotation {
            debug!(page = page_num, rotation, ratio, "Content agrees with existing rotation");
            return PageOrientationResult::Unchanged;
        }

        info!(
            "{page_num:4}: existing page rotation is {}°, content based rotation detected {}° (p={ratio:.2}), will change orientation",
            display_correction(existing_rotation),
            display_correction(rotation),
        );

        PageOrientationResult::Rotate {
            angle: rotation,
            confidence: ratio,
        }
    }

    // -- Full pass ------------------------------------------------------------

    /// Analyse a report, decide, and record a post-rotation in `context` when
    /// the page should turn.
    #[instrument(skip_all, fields(page = page_index + 1))]
    pub fn orient_page<R, C>(
        &self,
        reader: R,
        page_index: usize,
        context: &C,
    ) -> Result<PageOrientationResult>
    where
        R: BufRead,
        C: PageContext + ?Sized,
    {
        let analysis = self.analyze(reader)?;
        let existing_rotation = context.rotation(page_index);
        let result = self.decide(&analysis, page_index, existing_rotation);

        if let PageOrientationResult::Rotate { angle, .. } = result {
            context.set_post_rotation(page_index, angle);
        }

        Ok(result)
    }

    /// [`orient_page`](Self::orient_page) on an hOCR file. The file is closed
    /// on every return path.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn orient_page_file<C>(
        &self,
        path: impl AsRef<Path>,
        page_index: usize,
        context: &C,
    ) -> Result<PageOrientationResult>
    where
        C: PageContext + ?Sized,
    {
        let file = File::open(path.as_ref())?;
        self.orient_page(BufReader::new(file), page_index, context)
    }
}

impl Default for OrientationDetector {
    fn default() -> Self {
        Self::with_defaults()
    }
}
