// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// binder-document — PDF generation and assembly for the submittal binder.
//
// Draws the cover letter and section divider pages with `printpdf`, reads and
// merges PDFs with `lopdf`, and stages everything through a temporary
// directory that is removed once the binder is assembled.

pub mod assemble;
pub mod assets;
pub mod pdf;

// Re-export the primary structs so callers can use `binder_document::BinderAssembler` etc.
pub use assemble::{AssembledBinder, BinderAssembler};
pub use assets::BinderAssets;
pub use pdf::reader::{PdfReader, validate_attachment};
