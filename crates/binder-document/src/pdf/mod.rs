// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page drawing, autofit text, generated pages, reading and merging.

pub mod autofit;
pub mod canvas;
pub mod cover;
pub mod divider;
pub mod encoding;
pub mod merge;
pub mod metrics;
pub mod reader;
pub mod wrap;

pub use canvas::{PageCanvas, RenderedPdf};
pub use cover::CoverLetter;
pub use divider::render_divider;
pub use reader::PdfReader;
