// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page rotation state read from existing PDFs.

pub mod page_context;

pub use page_context::PdfPageContext;
