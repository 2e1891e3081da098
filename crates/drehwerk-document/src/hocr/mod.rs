// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// hOCR module — per-line parsing and the per-angle symbol tally.

pub mod line;
pub mod tally;

pub use line::LineRecord;
pub use tally::SymbolTally;
