// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — open and inspect existing PDF documents using the `lopdf` crate.

use std::path::Path;

use binder_core::Attachment;
use binder_core::error::{BinderError, Result};
use lopdf::Document;
use tracing::{debug, info, instrument};

/// Reads existing PDF files.
///
/// Wraps `lopdf::Document`; used to validate uploads and to feed the merge.
pub struct PdfReader {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

impl PdfReader {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            BinderError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create a reader from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            BinderError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the reader was created via [`PdfReader::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    /// Hand the parsed document over, e.g. to the merge.
    pub fn into_document(self) -> Document {
        self.document
    }
}

/// Check an uploaded file is a PDF with at least one page; returns the page
/// count.
pub fn validate_attachment(attachment: &Attachment) -> Result<usize> {
    let invalid = |detail: String| BinderError::InvalidAttachment {
        name: attachment.name.clone(),
        detail,
    };

    let reader = PdfReader::from_bytes(&attachment.data).map_err(|err| invalid(err.to_string()))?;
    match reader.page_count() {
        0 => Err(invalid("document has no pages".into())),
        pages => Ok(pages),
    }
}
