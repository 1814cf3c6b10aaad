// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page-level merge of whole PDF documents.
//
// Each input is renumbered into a disjoint object-id range, its pages are
// collected in page order, and a fresh page tree and catalog are built over
// all of them. Inputs may carry a bookmark title that becomes a top-level
// outline entry pointing at the input's first page.

use std::collections::BTreeMap;

use binder_core::error::{BinderError, Result};
use lopdf::{Bookmark, Dictionary, Document, Object, ObjectId, dictionary};
use tracing::{debug, info, instrument, warn};

/// Attributes a page may inherit from its ancestors in the page tree.
const INHERITABLE: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Guards against malformed, cyclic /Parent chains.
const MAX_TREE_DEPTH: usize = 64;

/// One document to append, optionally bookmarked.
pub struct MergeInput {
    pub document: Document,
    pub bookmark: Option<String>,
}

impl MergeInput {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            bookmark: None,
        }
    }

    pub fn bookmarked(document: Document, title: impl Into<String>) -> Self {
        Self {
            document,
            bookmark: Some(title.into()),
        }
    }
}

/// Concatenate `inputs` page by page, preserving input order and each
/// input's page order.
#[instrument(skip_all, fields(inputs = inputs.len()))]
pub fn merge_documents(inputs: Vec<MergeInput>) -> Result<Document> {
    if inputs.is_empty() {
        return Err(BinderError::PdfError("nothing to merge".into()));
    }

    let mut merged = Document::with_version("1.7");
    let mut max_id = 1;
    let mut pages: Vec<(ObjectId, Dictionary)> = Vec::new();
    let mut objects: BTreeMap<ObjectId, Object> = BTreeMap::new();

    for (index, input) in inputs.into_iter().enumerate() {
        let MergeInput {
            document: mut doc,
            bookmark,
        } = input;

        doc.renumber_objects_with(max_id);
        max_id = doc.max_id + 1;

        let doc_pages = doc.get_pages();
        debug!(input = index, pages = doc_pages.len(), "collecting pages");

        for (page_index, page_id) in doc_pages.into_values().enumerate() {
            if page_index == 0
                && let Some(title) = &bookmark
            {
                merged.add_bookmark(Bookmark::new(title.clone(), [0.0, 0.0, 0.0], 0, page_id), None);
            }
            let page = flatten_page(&doc, page_id)?;
            pages.push((page_id, page));
        }

        objects.extend(doc.objects);
    }

    // Source page trees, catalogs and outlines are replaced; pages are
    // re-inserted below under the new tree.
    for (object_id, object) in objects {
        match type_of(&object) {
            Some(b"Catalog" | b"Pages" | b"Page" | b"Outlines" | b"Outline") => {}
            _ => {
                merged.objects.insert(object_id, object);
            }
        }
    }
    merged.max_id = max_id;

    let pages_id = merged.new_object_id();
    let catalog_id = merged.new_object_id();

    let page_count = pages.len();
    let mut kids = Vec::with_capacity(page_count);
    for (page_id, mut page) in pages {
        page.set("Parent", pages_id);
        merged.objects.insert(page_id, Object::Dictionary(page));
        kids.push(Object::Reference(page_id));
    }

    merged.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Count" => page_count as i64,
            "Kids" => kids,
        }),
    );

    let mut catalog = dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    };
    if let Some(outline_id) = merged.build_outline() {
        catalog.set("Outlines", outline_id);
        catalog.set("PageMode", "UseOutlines");
    }
    merged.objects.insert(catalog_id, Object::Dictionary(catalog));
    merged.trailer.set("Root", catalog_id);

    merged.compress();

    info!(pages = page_count, "documents merged");
    Ok(merged)
}

/// Merge and serialise in one step.
pub fn merge_to_bytes(inputs: Vec<MergeInput>) -> Result<Vec<u8>> {
    let mut merged = merge_documents(inputs)?;
    save_to_bytes(&mut merged)
}

/// Serialise a document into memory.
pub fn save_to_bytes(document: &mut Document) -> Result<Vec<u8>> {
    let mut output = Vec::new();
    document.save_to(&mut output).map_err(|err| {
        BinderError::PdfError(format!("failed to serialise merged PDF: {}", err))
    })?;
    Ok(output)
}

/// The /Type name of a dictionary or stream object.
fn type_of(object: &Object) -> Option<&[u8]> {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &stream.dict,
        _ => return None,
    };
    dict.get(b"Type").and_then(Object::as_name).ok()
}

/// Copy the page dictionary, pulling in any attributes it inherits from the
/// page tree so it survives being re-parented.
fn flatten_page(doc: &Document, page_id: ObjectId) -> Result<Dictionary> {
    let mut page = doc
        .get_dictionary(page_id)
        .map_err(|err| {
            BinderError::PdfError(format!("cannot read page object {:?}: {}", page_id, err))
        })?
        .clone();

    let mut parent = page.get(b"Parent").and_then(Object::as_reference).ok();
    let mut depth = 0;
    while let Some(parent_id) = parent {
        depth += 1;
        if depth > MAX_TREE_DEPTH {
            warn!(?page_id, "page tree too deep, stopping attribute inheritance");
            break;
        }
        let Ok(node) = doc.get_dictionary(parent_id) else {
            break;
        };
        for key in INHERITABLE {
            if !page.has(key)
                && let Ok(value) = node.get(key)
            {
                page.set(key.to_vec(), value.clone());
            }
        }
        parent = node.get(b"Parent").and_then(Object::as_reference).ok();
    }

    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{page_widths, simple_pdf};

    fn load(bytes: &[u8]) -> Document {
        Document::load_mem(bytes).unwrap()
    }

    #[test]
    fn concatenates_in_input_order() {
        let inputs = vec![
            MergeInput::new(load(&simple_pdf(1, 100.0))),
            MergeInput::new(load(&simple_pdf(2, 150.0))),
            MergeInput::new(load(&simple_pdf(1, 200.0))),
        ];
        let bytes = merge_to_bytes(inputs).unwrap();
        let merged = load(&bytes);

        assert_eq!(merged.get_pages().len(), 4);
        let widths = page_widths(&merged);
        assert_eq!(widths.len(), 4);
        assert!(widths[0] < widths[1]);
        assert!((widths[1] - widths[2]).abs() < 0.5);
        assert!(widths[2] < widths[3]);
    }

    #[test]
    fn bookmarks_build_an_outline() {
        let inputs = vec![
            MergeInput::bookmarked(load(&simple_pdf(1, 100.0)), "Cover Letter"),
            MergeInput::new(load(&simple_pdf(1, 120.0))),
            MergeInput::bookmarked(load(&simple_pdf(1, 140.0)), "Spec Section 054000"),
        ];
        let bytes = merge_to_bytes(inputs).unwrap();
        let merged = load(&bytes);

        let catalog = merged.catalog().unwrap();
        assert!(catalog.get(b"Outlines").is_ok());
        assert_eq!(merged.get_pages().len(), 3);
    }

    #[test]
    fn inherited_media_box_survives() {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let content_id = doc.add_object(lopdf::Stream::new(Dictionary::new(), Vec::new()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(300),
                    Object::Integer(400),
                ],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();

        let merged = load(&merge_to_bytes(vec![MergeInput::new(load(&bytes))]).unwrap());
        let widths = page_widths(&merged);
        assert_eq!(widths, vec![300.0]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(merge_documents(Vec::new()), Err(BinderError::PdfError(_))));
    }
}
