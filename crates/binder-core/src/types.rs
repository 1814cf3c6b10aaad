// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the binder builder.

use chrono::{Local, NaiveDate};
use uuid::Uuid;

/// Unique identifier for a section entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SectionId(pub Uuid);

impl SectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded product PDF: the original file name plus its raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub name: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn new(name: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }
}

/// One spec section of the binder: a divider page followed by its attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionEntry {
    pub id: SectionId,
    /// Spec section label, e.g. "054000 Cold Formed Metal Framing".
    pub spec_label: String,
    /// Product name shown on the divider page.
    pub product_name: String,
    /// Attached PDFs in upload order.
    pub attachments: Vec<Attachment>,
}

impl SectionEntry {
    /// Create an entry, trimming the label and product name.
    pub fn new(spec_label: &str, product_name: &str, attachments: Vec<Attachment>) -> Self {
        Self {
            id: SectionId::new(),
            spec_label: spec_label.trim().to_string(),
            product_name: product_name.trim().to_string(),
            attachments,
        }
    }

    /// Title used for the section's bookmark in the finished binder.
    pub fn bookmark_title(&self) -> String {
        match (self.spec_label.is_empty(), self.product_name.is_empty()) {
            (false, _) => format!("Spec Section {}", self.spec_label),
            (true, false) => self.product_name.clone(),
            (true, true) => "Spec Section".to_string(),
        }
    }
}

/// Sender / recipient / project fields for one generation request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BinderMetadata {
    /// Project name, printed as the bold "Re:" line.
    pub project: String,
    /// Name printed under the signature line.
    pub submitter_name: String,
    /// Free-form date text; today's date is used when blank.
    pub date: Option<String>,
    pub to_name: String,
    pub to_company: String,
    pub to_street: String,
    pub to_city_state_zip: String,
}

impl BinderMetadata {
    /// The date line for the cover letter.
    pub fn date_line(&self) -> String {
        match self.date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => text.to_string(),
            _ => format_letter_date(Local::now().date_naive()),
        }
    }

    /// Recipient block lines, trimmed, with blank fields skipped.
    pub fn recipient_lines(&self) -> Vec<&str> {
        [
            self.to_name.as_str(),
            self.to_company.as_str(),
            self.to_street.as_str(),
            self.to_city_state_zip.as_str(),
        ]
        .into_iter()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
    }

    /// Required cover fields that are still blank, as user-facing reasons.
    pub fn missing_fields(&self) -> Vec<String> {
        let mut missing = Vec::new();
        if self.project.trim().is_empty() {
            missing.push("Project (step 1)".to_string());
        }
        if self.to_name.trim().is_empty() {
            missing.push("To: Name (step 1)".to_string());
        }
        missing
    }
}

/// Format a date as `M/D/YYYY` without zero padding.
pub fn format_letter_date(date: NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}
