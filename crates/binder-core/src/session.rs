// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Per-session state: the pool of uploaded PDFs and the ordered section list
// with its confirm-before-clear flag.

use tracing::{debug, info};

use crate::error::{BinderError, Result};
use crate::types::{Attachment, BinderMetadata, SectionEntry};

/// Uploaded PDFs available for selection into sections.
#[derive(Debug, Clone, Default)]
pub struct UploadPool {
    files: Vec<Attachment>,
}

impl UploadPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an upload. A file with the same name replaces the earlier bytes
    /// in place, keeping its position.
    pub fn insert(&mut self, attachment: Attachment) {
        match self.files.iter_mut().find(|f| f.name == attachment.name) {
            Some(existing) => {
                debug!(name = %attachment.name, "replacing uploaded file");
                *existing = attachment;
            }
            None => self.files.push(attachment),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Attachment> {
        self.files.iter().find(|f| f.name == name)
    }

    /// Copy the named uploads, in pool order, for a new section.
    pub fn select(&self, names: &[String]) -> Vec<Attachment> {
        self.files
            .iter()
            .filter(|f| names.iter().any(|n| n == &f.name))
            .cloned()
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attachment> {
        self.files.iter()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// Ordered section entries. Insertion order is binder order.
#[derive(Debug, Clone, Default)]
pub struct SectionList {
    entries: Vec<SectionEntry>,
    confirm_clear: bool,
}

impl SectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section built from the form fields.
    pub fn add(&mut self, spec_label: &str, product_name: &str, attachments: Vec<Attachment>) {
        let entry = SectionEntry::new(spec_label, product_name, attachments);
        info!(
            spec = %entry.spec_label,
            product = %entry.product_name,
            files = entry.attachments.len(),
            "section added"
        );
        self.entries.push(entry);
    }

    /// Ask for confirmation before clearing.
    pub fn request_clear(&mut self) {
        self.confirm_clear = true;
    }

    pub fn cancel_clear(&mut self) {
        self.confirm_clear = false;
    }

    /// Whether a clear is waiting for confirmation.
    pub fn clear_pending(&self) -> bool {
        self.confirm_clear
    }

    /// Empty the list if a clear was requested. Returns whether it cleared.
    pub fn confirm_clear(&mut self) -> bool {
        if !self.confirm_clear {
            return false;
        }
        info!(removed = self.entries.len(), "all sections cleared");
        self.entries.clear();
        self.confirm_clear = false;
        true
    }

    pub fn entries(&self) -> &[SectionEntry] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &SectionEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Everything still blocking generation, in display order.
    pub fn readiness_issues(&self, metadata: &BinderMetadata) -> Vec<String> {
        readiness_issues(metadata, &self.entries)
    }
}

/// Reasons the binder cannot be generated yet; empty when ready.
pub fn readiness_issues(metadata: &BinderMetadata, sections: &[SectionEntry]) -> Vec<String> {
    let mut issues = Vec::new();
    if sections.is_empty() {
        issues.push("Add at least one Spec Section in step 3".to_string());
    }
    issues.extend(metadata.missing_fields());
    issues
}

/// Fail with [`BinderError::NotReady`] unless the binder can be generated.
pub fn ensure_ready(metadata: &BinderMetadata, sections: &[SectionEntry]) -> Result<()> {
    let issues = readiness_issues(metadata, sections);
    if issues.is_empty() {
        Ok(())
    } else {
        Err(BinderError::NotReady(issues))
    }
}
