// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Autofit — pick the largest font size at which a text block fits a box.
//
// Sizes are tried from largest to smallest. At each size the text is wrapped
// at an estimated character count, then checked against three constraints:
// line count, total height, and the measured width of every line. The first
// size passing all three wins. When none does, the minimum size is used and
// the layout is flagged as overflowing rather than failing.

use tracing::debug;

use crate::pdf::canvas::PageCanvas;
use crate::pdf::metrics::{FontWeight, text_width};
use crate::pdf::wrap::{estimated_chars, wrap_text};

/// Fraction of the font size by which a glyph's cap height sits above the
/// baseline, used to centre lines optically.
const CAP_HEIGHT_EM: f32 = 0.7;

/// Box a text block is fitted into, described by its centre point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitBox {
    pub center_x: f32,
    pub center_y: f32,
    pub width: f32,
    pub height: f32,
}

/// Size search parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutofitParams {
    pub max_size: f32,
    pub min_size: f32,
    /// Decrement between candidate sizes.
    pub step: f32,
    /// Largest acceptable number of wrapped lines.
    pub max_lines: usize,
    /// Line height as a multiple of the font size.
    pub leading: f32,
}

impl Default for AutofitParams {
    fn default() -> Self {
        Self {
            max_size: 48.0,
            min_size: 12.0,
            step: 1.0,
            max_lines: 2,
            leading: 1.2,
        }
    }
}

/// The chosen size and wrapped lines for a text block.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLayout {
    pub size: f32,
    /// Baseline-to-baseline distance in points.
    pub line_height: f32,
    pub lines: Vec<String>,
    /// False when the minimum size was used without satisfying every limit.
    pub fits: bool,
}

impl TextLayout {
    /// Total height of the wrapped block.
    pub fn height(&self) -> f32 {
        self.lines.len() as f32 * self.line_height
    }

    /// Widest wrapped line at the chosen size.
    pub fn widest_line(&self, weight: FontWeight) -> f32 {
        self.lines
            .iter()
            .map(|line| text_width(line, weight, self.size))
            .fold(0.0, f32::max)
    }
}

/// Candidate sizes from `max_size` down to `min_size` inclusive.
fn candidate_sizes(params: &AutofitParams) -> Vec<f32> {
    let step = if params.step > 0.0 { params.step } else { 1.0 };
    let min = params.min_size.max(0.1);
    let mut sizes = Vec::new();
    let mut size = params.max_size;
    while size >= min - 1e-3 {
        sizes.push(size);
        size -= step;
    }
    if sizes.last().is_none_or(|last| (last - min).abs() > 1e-3) {
        sizes.push(min);
    }
    sizes
}

fn layout_at(text: &str, width: f32, size: f32, leading: f32) -> TextLayout {
    TextLayout {
        size,
        line_height: size * leading,
        lines: wrap_text(text, estimated_chars(width, size)),
        fits: true,
    }
}

/// Choose a size and line breaks for `text` inside `bounds`.
pub fn fit_text(text: &str, bounds: &FitBox, weight: FontWeight, params: &AutofitParams) -> TextLayout {
    let sizes = candidate_sizes(params);

    for &size in &sizes {
        let layout = layout_at(text, bounds.width, size, params.leading);
        if layout.lines.len() <= params.max_lines
            && layout.height() <= bounds.height
            && layout.widest_line(weight) <= bounds.width
        {
            debug!(size, lines = layout.lines.len(), "autofit accepted size");
            return layout;
        }
    }

    let min = sizes.last().copied().unwrap_or(params.min_size);
    let mut fallback = layout_at(text, bounds.width, min, params.leading);
    fallback.fits = false;
    debug!(size = min, lines = fallback.lines.len(), "autofit fell back to minimum size");
    fallback
}

/// Start point of each line's baseline when `layout` is centred
/// horizontally on the box centre and vertically within the box.
pub fn line_origins(layout: &TextLayout, bounds: &FitBox, weight: FontWeight) -> Vec<(f32, f32)> {
    let top = bounds.center_y + layout.height() / 2.0;
    layout
        .lines
        .iter()
        .enumerate()
        .map(|(index, line)| {
            let slot_middle = top - layout.line_height * (index as f32 + 0.5);
            let baseline = slot_middle - layout.size * CAP_HEIGHT_EM / 2.0;
            let x = bounds.center_x - text_width(line, weight, layout.size) / 2.0;
            (x, baseline)
        })
        .collect()
}

/// Draw a fitted layout at the positions given by [`line_origins`].
pub fn draw_layout(canvas: &mut PageCanvas, layout: &TextLayout, bounds: &FitBox, weight: FontWeight) {
    let origins = line_origins(layout, bounds, weight);
    for (line, (x, baseline)) in layout.lines.iter().zip(origins) {
        canvas.draw_string(x, baseline, line, weight, layout.size);
    }
}
