// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF page context — existing page rotations read from a PDF with `lopdf`,
// post-rotation overrides kept in memory for the caller to apply.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::{Mutex, PoisonError};

use drehwerk_core::error::DrehwerkError;
use drehwerk_core::types::normalize_rotation;
use lopdf::{Document, Object, ObjectId};
use tracing::{debug, info, instrument, warn};

use crate::orient::PageContext;

/// Page trees deeper than this are treated as broken.
const MAX_PAGE_TREE_DEPTH: usize = 64;

/// A [`PageContext`] whose existing rotations come from a PDF's `/Rotate`
/// entries.
///
/// The PDF is only read. Overrides set by the detector are recorded here and
/// can be fetched with [`post_rotations`](Self::post_rotations) by whatever
/// writes the final document.
#[derive(Debug)]
pub struct PdfPageContext {
    /// Effective rotation per zero-based page, normalised into [0, 360).
    rotations: Vec<i32>,
    post_rotations: Mutex<BTreeMap<usize, i32>>,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfPageContext {
    // -- Construction ---------------------------------------------------------

    /// Read page rotations from a PDF on disk.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, DrehwerkError> {
        let path_ref = path.as_ref();
        info!("Reading page rotations from PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            DrehwerkError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        let mut context = Self::from_document(&document);
        context.source_path = Some(path_ref.display().to_string());
        Ok(context)
    }

    /// Read page rotations from PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, DrehwerkError> {
        let document = Document::load_mem(data).map_err(|err| {
            DrehwerkError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        Ok(Self::from_document(&document))
    }

    /// Read page rotations from an already loaded document.
    pub fn from_document(document: &Document) -> Self {
        // lopdf keys pages by 1-indexed page number; BTreeMap keeps them sorted.
        let rotations: Vec<i32> = document
            .get_pages()
            .values()
            .map(|&page_id| normalize_rotation(effective_rotation(document, page_id)))
            .collect();

        debug!(pages = rotations.len(), "Page rotations loaded");

        Self {
            rotations,
            post_rotations: Mutex::new(BTreeMap::new()),
            source_path: None,
        }
    }

    // -- Inspection -----------------------------------------------------------

    pub fn page_count(&self) -> usize {
        self.rotations.len()
    }

    /// Return the source path if the context was created via [`PdfPageContext::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    pub fn post_rotation(&self, page_index: usize) -> Option<i32> {
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&page_index)
            .copied()
    }

    /// Every override recorded so far, keyed by zero-based page index.
    pub fn post_rotations(&self) -> BTreeMap<usize, i32> {
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PageContext for PdfPageContext {
    fn rotation(&self, page_index: usize) -> i32 {
        match self.rotations.get(page_index) {
            Some(rotation) => *rotation,
            None => {
                warn!(
                    page_index,
                    pages = self.rotations.len(),
                    "Page index beyond document, assuming no rotation"
                );
                0
            }
        }
    }

    fn set_post_rotation(&self, page_index: usize, rotation: i32) {
        // A panic elsewhere while holding the lock leaves the map intact.
        self.post_rotations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(page_index, rotation);
    }
}

// -- Helpers ------------------------------------------------------------------

/// `/Rotate` of a page, inherited from the nearest page-tree ancestor that
/// sets it. 0 when nobody does.
fn effective_rotation(document: &Document, page_id: ObjectId) -> i64 {
    let mut current = Some(page_id);

    for _ in 0..MAX_PAGE_TREE_DEPTH {
        let Some(node_id) = current else {
            return 0;
        };
        let Ok(node) = document.get_dictionary(node_id) else {
            return 0;
        };

        if let Some(rotation) = node
            .get(b"Rotate")
            .ok()
            .and_then(|value| rotate_value(document, value))
        {
            return rotation;
        }

        current = node
            .get(b"Parent")
            .ok()
            .and_then(|parent| parent.as_reference().ok());
    }

    warn!(?page_id, "Page tree too deep while resolving /Rotate, assuming 0");
    0
}

/// Numeric value of a `/Rotate` entry, following one level of indirection.
fn rotate_value(document: &Document, value: &Object) -> Option<i64> {
    match value {
        Object::Integer(rotation) => Some(*rotation),
        Object::Real(rotation) => Some(*rotation as i64),
        Object::Reference(id) => match document.get_object(*id) {
            Ok(Object::Integer(rotation)) => Some(*rotation),
            Ok(Object::Real(rotation)) => Some(*rotation as i64),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::Dictionary;

    /// A document with one `/Pages` node holding the given page dictionaries.
    fn document_with_pages(
        tree_rotate: Option<i64>,
        page_rotates: &[Option<Object>],
    ) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids = Vec::new();
        for rotate in page_rotates {
            let mut page = Dictionary::new();
            page.set("Type", Object::Name(b"Page".to_vec()));
            page.set("Parent", Object::Reference(pages_id));
            if let Some(rotate) = rotate {
                page.set("Rotate", rotate.clone());
            }
            kids.push(Object::Reference(doc.add_object(page)));
        }

        let mut pages = Dictionary::new();
        pages.set("Type", Object::Name(b"Pages".to_vec()));
        pages.set("Count", Object::Integer(kids.len() as i64));
        pages.set("Kids", Object::Array(kids));
        if let Some(rotate) = tree_rotate {
            pages.set("Rotate", Object::Integer(rotate));
        }
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let mut catalog = Dictionary::new();
        catalog.set("Type", Object::Name(b"Catalog".to_vec()));
        catalog.set("Pages", Object::Reference(pages_id));
        let catalog_id = doc.add_object(catalog);
        doc.trailer.set("Root", Object::Reference(catalog_id));

        doc
    }

    #[test]
    fn reads_explicit_and_default_rotations() {
        let doc = document_with_pages(
            None,
            &[None, Some(Object::Integer(90)), Some(Object::Integer(180))],
        );
        let context = PdfPageContext::from_document(&doc);

        assert_eq!(context.page_count(), 3);
        assert_eq!(context.rotation(0), 0);
        assert_eq!(context.rotation(1), 90);
        assert_eq!(context.rotation(2), 180);
    }

    #[test]
    fn inherits_rotation_from_page_tree() {
        let doc = document_with_pages(Some(270), &[None, Some(Object::Integer(0))]);
        let context = PdfPageContext::from_document(&doc);

        assert_eq!(context.rotation(0), 270);
        assert_eq!(context.rotation(1), 0, "page-level value overrides the tree");
    }

    #[test]
    fn normalises_negative_and_oversized_rotations() {
        let doc = document_with_pages(
            None,
            &[Some(Object::Integer(-90)), Some(Object::Integer(450))],
        );
        let context = PdfPageContext::from_document(&doc);

        assert_eq!(context.rotation(0), 270);
        assert_eq!(context.rotation(1), 90);
    }

    #[test]
    fn follows_indirect_rotate() {
        let mut doc = document_with_pages(None, &[None]);
        let rotate_id = doc.add_object(Object::Integer(180));
        let page_id = *doc.get_pages().values().next().expect("one page");
        if let Ok(Object::Dictionary(page)) = doc.get_object_mut(page_id) {
            page.set("Rotate", Object::Reference(rotate_id));
        }

        let context = PdfPageContext::from_document(&doc);
        assert_eq!(context.rotation(0), 180);
    }

    #[test]
    fn out_of_range_page_reports_zero() {
        let doc = document_with_pages(None, &[Some(Object::Integer(90))]);
        let context = PdfPageContext::from_document(&doc);
        assert_eq!(context.rotation(5), 0);
    }

    #[test]
    fn records_post_rotations_without_touching_existing() {
        let doc = document_with_pages(None, &[Some(Object::Integer(90)), None]);
        let context = PdfPageContext::from_document(&doc);

        context.set_post_rotation(0, 0);
        assert_eq!(context.rotation(0), 90);
        assert_eq!(context.post_rotation(0), Some(0));
        assert_eq!(context.post_rotation(1), None);
        assert_eq!(context.post_rotations(), BTreeMap::from([(0, 0)]));
    }

    #[test]
    fn garbage_bytes_are_a_pdf_error() {
        let result = PdfPageContext::from_bytes(b"definitely not a pdf");
        assert!(matches!(result, Err(DrehwerkError::PdfError(_))));
    }

    #[test]
    fn poisoned_lock_still_records_post_rotation() {
        let doc = document_with_pages(None, &[Some(Object::Integer(90))]);
        let context = PdfPageContext::from_document(&doc);

        let poisoned: std::thread::Result<()> =
            std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                let _guard = context.post_rotations.lock().expect("first lock");
                panic!("worker died holding the lock");
            }));
        assert!(poisoned.is_err());
        assert!(context.post_rotations.is_poisoned());

        context.set_post_rotation(0, 0);
        assert_eq!(context.post_rotation(0), Some(0));
        assert_eq!(context.post_rotations(), BTreeMap::from([(0, 0)]));
    }
}
