// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// drehwerk-document — Content-based page orientation for OCR'd documents.
//
// Parses hOCR reports line by line, weighs each line's `textangle` hint by the
// letters recognised on it, and decides whether a page's rotation should be
// overridden. Page rotation state comes from a `PageContext`: an in-memory one
// or one read from an existing PDF.

pub mod hocr;
pub mod orient;
pub mod pdf;

// Re-export the primary structs so callers can use `drehwerk_document::OrientationDetector` etc.
pub use hocr::{LineRecord, SymbolTally};
pub use orient::{InMemoryPageContext, OrientationDetector, PageAnalysis, PageContext};
pub use pdf::PdfPageContext;
