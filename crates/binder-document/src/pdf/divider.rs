// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Section divider — one page introducing each spec section.

use binder_core::{BinderConfig, SectionEntry};
use tracing::{debug, instrument, warn};

use crate::assets::BinderAssets;
use crate::pdf::autofit::{AutofitParams, FitBox, TextLayout, draw_layout, fit_text};
use crate::pdf::canvas::{INCH, LETTER_HEIGHT, LETTER_WIDTH, PageCanvas, RenderedPdf};
use crate::pdf::cover::draw_footer;
use crate::pdf::metrics::FontWeight;

const BOX_WIDTH: f32 = LETTER_WIDTH - 2.0 * INCH;

/// Upper box holding the spec section label.
pub const LABEL_BOX: FitBox = FitBox {
    center_x: LETTER_WIDTH / 2.0,
    center_y: LETTER_HEIGHT / 2.0 + 80.0,
    width: BOX_WIDTH,
    height: 140.0,
};

/// Lower box holding the product name.
pub const PRODUCT_BOX: FitBox = FitBox {
    center_x: LETTER_WIDTH / 2.0,
    center_y: LETTER_HEIGHT / 2.0 - 90.0,
    width: BOX_WIDTH,
    height: 160.0,
};

pub const LABEL_PARAMS: AutofitParams = AutofitParams {
    max_size: 48.0,
    min_size: 18.0,
    step: 1.0,
    max_lines: 2,
    leading: 1.2,
};

pub const PRODUCT_PARAMS: AutofitParams = AutofitParams {
    max_size: 32.0,
    min_size: 14.0,
    step: 1.0,
    max_lines: 3,
    leading: 1.2,
};

/// Fitted text blocks for a divider. A blank field has no layout.
#[derive(Debug, Clone, PartialEq)]
pub struct DividerLayout {
    pub label: Option<TextLayout>,
    pub product: Option<TextLayout>,
}

/// Fit the section's label and product name into their boxes.
pub fn layout_divider(section: &SectionEntry) -> DividerLayout {
    let fit = |text: &str, bounds: &FitBox, params: &AutofitParams| {
        let text = text.trim();
        (!text.is_empty()).then(|| fit_text(text, bounds, FontWeight::Bold, params))
    };

    DividerLayout {
        label: fit(&section.spec_label, &LABEL_BOX, &LABEL_PARAMS),
        product: fit(&section.product_name, &PRODUCT_BOX, &PRODUCT_PARAMS),
    }
}

/// Render the divider page for `section`.
#[instrument(skip_all, fields(label = %section.spec_label))]
pub fn render_divider(
    section: &SectionEntry,
    config: &BinderConfig,
    assets: &BinderAssets,
) -> RenderedPdf {
    let layout = layout_divider(section);
    let mut canvas = PageCanvas::letter("Section Divider", assets);

    for (text_layout, bounds) in [(&layout.label, &LABEL_BOX), (&layout.product, &PRODUCT_BOX)] {
        let Some(text_layout) = text_layout else {
            continue;
        };
        if !text_layout.fits {
            warn!(size = text_layout.size, "divider text overflows its box at minimum size");
        }
        draw_layout(&mut canvas, text_layout, bounds, FontWeight::Bold);
    }

    draw_footer(&mut canvas, &config.footer_text);
    let rendered = canvas.finish();
    debug!(bytes = rendered.bytes.len(), "divider rendered");
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;

    #[test]
    fn short_label_gets_full_size() {
        let section = SectionEntry::new("054000", "Metal Studs", Vec::new());
        let layout = layout_divider(&section);
        let label = layout.label.unwrap();
        assert_eq!(label.size, 48.0);
        assert_eq!(label.lines, ["054000"]);
        assert_eq!(layout.product.unwrap().size, 32.0);
    }

    #[test]
    fn long_product_name_wraps_within_line_limit() {
        let section = SectionEntry::new(
            "092216",
            "Non-Structural Metal Framing with Slotted Deflection Track and Bridging Clips",
            Vec::new(),
        );
        let product = layout_divider(&section).product.unwrap();
        assert!(product.fits);
        assert!(product.lines.len() > 1);
        assert!(product.lines.len() <= PRODUCT_PARAMS.max_lines);
        assert!(product.widest_line(FontWeight::Bold) <= PRODUCT_BOX.width);
    }

    #[test]
    fn blank_fields_are_skipped() {
        let section = SectionEntry::new("", "   ", Vec::new());
        let layout = layout_divider(&section);
        assert!(layout.label.is_none());
        assert!(layout.product.is_none());
    }

    #[test]
    fn renders_a_single_page() {
        let section = SectionEntry::new("092900", "Gypsum Board", Vec::new());
        let rendered = render_divider(&section, &BinderConfig::default(), &BinderAssets::builtin());
        assert_eq!(rendered.page_count, 1);
        assert_eq!(PdfReader::from_bytes(&rendered.bytes).unwrap().page_count(), 1);
    }
}
