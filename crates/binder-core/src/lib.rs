// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Submittal binder — core types, errors, and session state shared across crates.

pub mod config;
pub mod error;
pub mod filename;
pub mod human_errors;
pub mod session;
pub mod types;

pub use config::BinderConfig;
pub use error::BinderError;
pub use filename::{DEFAULT_FILENAME, sanitize_filename};
pub use session::{SectionList, UploadPool, ensure_ready, readiness_issues};
pub use types::*;
