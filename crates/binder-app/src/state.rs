// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use std::collections::BTreeMap;

use binder_core::human_errors::HumanError;
use binder_core::{BinderConfig, BinderMetadata, SectionList, UploadPool, format_letter_date};
use binder_document::AssembledBinder;

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Cover letter fields (step 1).
    pub metadata: BinderMetadata,
    /// Uploaded PDFs available to sections (step 2).
    pub uploads: UploadPool,
    /// Page count of each upload, keyed by file name.
    pub upload_pages: BTreeMap<String, usize>,
    /// Sections in binder order (step 3).
    pub sections: SectionList,
    /// Output file name as typed; sanitised when saving.
    pub output_name: String,
    /// Application settings being edited.
    pub config: BinderConfig,
    /// Status message for user feedback.
    pub status_message: Option<String>,
    /// The most recently generated binder, ready to save.
    pub binder: Option<AssembledBinder>,
    /// Why the last generation or upload failed.
    pub last_error: Option<HumanError>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        let config = svc.config();
        let metadata = BinderMetadata {
            date: Some(format_letter_date(chrono::Local::now().date_naive())),
            ..Default::default()
        };

        Self {
            metadata,
            uploads: UploadPool::new(),
            upload_pages: BTreeMap::new(),
            sections: SectionList::new(),
            output_name: config.default_filename.clone(),
            config,
            status_message: None,
            binder: None,
            last_error: None,
        }
    }

    /// Drop any generated binder; called whenever the inputs change.
    pub fn invalidate(&mut self) {
        self.binder = None;
    }
}
