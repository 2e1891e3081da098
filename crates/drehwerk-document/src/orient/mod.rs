// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Orientation module — the detector and the page context it reports to.

pub mod context;
pub mod detector;

pub use context::{InMemoryPageContext, PageContext};
pub use detector::{OrientationDetector, PageAnalysis};
