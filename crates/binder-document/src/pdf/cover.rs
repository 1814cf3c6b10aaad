// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cover letter — the first page(s) of the binder.
//
// Letter-style layout: logo between two full-width rules, date, recipient
// block, "Re:" line, approval sentence, one bullet per spec section, then the
// signature block. The bullet list paginates by hand; every page carries the
// footer.

use binder_core::{BinderConfig, BinderMetadata, SectionEntry};
use tracing::{debug, info, instrument, warn};

use crate::assets::BinderAssets;
use crate::pdf::canvas::{INCH, LETTER_HEIGHT, LETTER_WIDTH, PageCanvas, RenderedPdf};
use crate::pdf::metrics::FontWeight;
use crate::pdf::wrap::{estimated_chars, wrap_text};

pub const MARGIN: f32 = 0.9 * INCH;
pub const LOGO_MAX_WIDTH: f32 = 1.6 * INCH;
pub const LOGO_MAX_HEIGHT: f32 = 0.75 * INCH;
/// Distance of each header rule from the logo's top and bottom edges.
const RULE_GAP: f32 = 0.2 * INCH;
const BODY_GAP: f32 = 0.25 * INCH;

const BODY_SIZE: f32 = 12.0;
const BODY_LEADING: f32 = 16.0;
const RECIPIENT_STEP: f32 = 18.0;
const BULLET_INDENT: f32 = 18.0;
const BULLET_SPACING: f32 = 2.0;
const SIGNATURE_GAP: f32 = 40.0;
const SIGNATURE_NAME_DROP: f32 = 36.0;

/// A bullet that leaves the cursor below this starts a new page.
pub const PAGE_BREAK_Y: f32 = 120.0;
/// Lowest baseline the signature may use before it moves to a new page.
const SIGNATURE_FLOOR: f32 = INCH;

pub const FOOTER_SIZE: f32 = 10.0;
pub const FOOTER_Y: f32 = 0.5 * INCH;

/// Vertical positions of the cover header.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeaderLayout {
    pub top_rule_y: f32,
    /// Logo bottom-left corner and drawn size, when there is a logo.
    pub logo: Option<(f32, f32, f32, f32)>,
    pub bottom_rule_y: f32,
    /// Baseline of the date line.
    pub body_top_y: f32,
}

/// Place the header for a logo of `logo_size` points, or none. A missing
/// logo takes no vertical space.
pub fn header_layout(logo_size: Option<(f32, f32)>) -> HeaderLayout {
    let top = LETTER_HEIGHT - MARGIN;
    let logo_height = logo_size.map_or(0.0, |(_, h)| h);
    let bottom_rule_y = top - logo_height - RULE_GAP;

    HeaderLayout {
        top_rule_y: top + RULE_GAP,
        logo: logo_size.map(|(w, h)| (MARGIN, top - h, w, h)),
        bottom_rule_y,
        body_top_y: bottom_rule_y - BODY_GAP,
    }
}

/// Draw the footer string centred near the bottom of the current page.
pub fn draw_footer(canvas: &mut PageCanvas, footer: &str) {
    let center_x = canvas.width() / 2.0;
    canvas.draw_centred_string(center_x, FOOTER_Y, footer.trim(), FontWeight::Regular, FOOTER_SIZE);
}

/// The cover letter for one binder.
pub struct CoverLetter<'a> {
    metadata: &'a BinderMetadata,
    sections: &'a [SectionEntry],
    config: &'a BinderConfig,
    assets: &'a BinderAssets,
}

impl<'a> CoverLetter<'a> {
    pub fn new(
        metadata: &'a BinderMetadata,
        sections: &'a [SectionEntry],
        config: &'a BinderConfig,
        assets: &'a BinderAssets,
    ) -> Self {
        Self {
            metadata,
            sections,
            config,
            assets,
        }
    }

    /// Bullet text for every section with a label, in section order.
    /// Sections without a label are left off the cover.
    pub fn bullet_entries(&self) -> Vec<String> {
        self.sections
            .iter()
            .filter(|section| !section.spec_label.is_empty())
            .map(|section| format!("\u{2022}  Spec Section {}", section.spec_label))
            .collect()
    }

    /// Render the cover to PDF bytes.
    #[instrument(skip_all, fields(sections = self.sections.len()))]
    pub fn render(&self) -> RenderedPdf {
        let mut canvas = PageCanvas::letter("Submittal Binder Cover", self.assets);
        let text_width = LETTER_WIDTH - 2.0 * MARGIN;
        let right = LETTER_WIDTH - MARGIN;
        let footer = self.config.footer_text.as_str();

        // -- Header -----------------------------------------------------------

        let logo = self.assets.logo();
        if logo.is_none() {
            warn!("no logo available, cover header drawn without one");
        }
        let header = header_layout(logo.map(|l| l.fit_within(LOGO_MAX_WIDTH, LOGO_MAX_HEIGHT)));

        canvas.line(MARGIN, header.top_rule_y, right, header.top_rule_y, 1.0);
        if let (Some(image), Some((x, y, w, h))) = (logo, header.logo) {
            canvas.draw_logo(image, x, y, w, h);
        }
        canvas.line(MARGIN, header.bottom_rule_y, right, header.bottom_rule_y, 1.0);

        // -- Letter body ------------------------------------------------------

        let mut y = header.body_top_y;
        canvas.draw_string(MARGIN, y, &self.metadata.date_line(), FontWeight::Regular, BODY_SIZE);
        y -= 28.0;

        for line in self.metadata.recipient_lines() {
            canvas.draw_string(MARGIN, y, line, FontWeight::Regular, BODY_SIZE);
            y -= RECIPIENT_STEP;
        }
        y -= 10.0;

        let re_line = format!("Re: {}", self.metadata.project.trim());
        canvas.draw_string(MARGIN, y, &re_line, FontWeight::Bold, BODY_SIZE);
        y -= 28.0;

        let chars = estimated_chars(text_width, BODY_SIZE);
        for line in wrap_text(&self.config.approval_sentence, chars) {
            canvas.draw_string(MARGIN, y, &line, FontWeight::Regular, BODY_SIZE);
            y -= BODY_LEADING;
        }
        y -= 10.0;

        // -- Section bullets --------------------------------------------------

        for entry in self.bullet_entries() {
            for (index, line) in wrap_text(&entry, chars).iter().enumerate() {
                let indent = if index == 0 { 0.0 } else { BULLET_INDENT };
                canvas.draw_string(MARGIN + indent, y, line, FontWeight::Regular, BODY_SIZE);
                y -= BODY_LEADING;
            }
            y -= BULLET_SPACING;

            if y < PAGE_BREAK_Y {
                draw_footer(&mut canvas, footer);
                canvas.show_page();
                y = LETTER_HEIGHT - MARGIN;
                debug!(page = canvas.closed_pages() + 1, "cover bullet list continued");
            }
        }

        // -- Signature --------------------------------------------------------

        y -= SIGNATURE_GAP;
        if y - SIGNATURE_NAME_DROP < SIGNATURE_FLOOR {
            draw_footer(&mut canvas, footer);
            canvas.show_page();
            y = LETTER_HEIGHT - MARGIN;
        }
        canvas.draw_string(MARGIN, y, "Respectfully Submitted,", FontWeight::Regular, BODY_SIZE);
        y -= SIGNATURE_NAME_DROP;
        canvas.draw_string(MARGIN, y, self.metadata.submitter_name.trim(), FontWeight::Regular, BODY_SIZE);

        draw_footer(&mut canvas, footer);
        let rendered = canvas.finish();

        info!(pages = rendered.page_count, "cover letter rendered");
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use crate::test_support::png_bytes;

    fn metadata() -> BinderMetadata {
        BinderMetadata {
            project: "Riverside Clinic Renovation".into(),
            submitter_name: "Dana Whitfield".into(),
            date: Some("3/14/2026".into()),
            to_name: "Pat Alvarez".into(),
            to_company: "Alvarez Architects".into(),
            to_street: "500 Main Street".into(),
            to_city_state_zip: "Tulsa, OK 74103".into(),
        }
    }

    fn sections(count: usize) -> Vec<SectionEntry> {
        (0..count)
            .map(|i| SectionEntry::new(&format!("{:06}", 50000 + i * 100), "Product", Vec::new()))
            .collect()
    }

    #[test]
    fn missing_logo_takes_no_space() {
        let header = header_layout(None);
        let top = LETTER_HEIGHT - MARGIN;
        assert!(header.logo.is_none());
        assert!((header.bottom_rule_y - (top - RULE_GAP)).abs() < 1e-3);
        assert!((header.top_rule_y - (top + RULE_GAP)).abs() < 1e-3);
    }

    #[test]
    fn logo_pushes_body_down() {
        let without = header_layout(None);
        let with = header_layout(Some((115.2, 28.8)));
        assert!((without.body_top_y - with.body_top_y - 28.8).abs() < 1e-3);
        let (x, y, _, h) = with.logo.unwrap();
        assert_eq!(x, MARGIN);
        assert!((y + h - (LETTER_HEIGHT - MARGIN)).abs() < 1e-3);
    }

    #[test]
    fn bullets_follow_section_order_and_skip_blank_labels() {
        let meta = metadata();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let list = vec![
            SectionEntry::new("054000", "Metal Studs", Vec::new()),
            SectionEntry::new("  ", "Unlabelled Sealant", Vec::new()),
            SectionEntry::new("092900", "Gypsum Board", Vec::new()),
        ];
        let cover = CoverLetter::new(&meta, &list, &config, &assets);
        assert_eq!(
            cover.bullet_entries(),
            ["\u{2022}  Spec Section 054000", "\u{2022}  Spec Section 092900"]
        );
    }

    #[test]
    fn cover_text_reads_back_in_section_order() {
        let meta = metadata();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let list = vec![
            SectionEntry::new("054000", "Metal Studs", Vec::new()),
            SectionEntry::new("092900", "Gypsum Board", Vec::new()),
        ];
        let rendered = CoverLetter::new(&meta, &list, &config, &assets).render();

        let document = lopdf::Document::load_mem(&rendered.bytes).unwrap();
        let text = document.extract_text(&[1]).unwrap();
        let first = text.find("\u{2022}  Spec Section 054000").expect("first bullet");
        let second = text.find("\u{2022}  Spec Section 092900").expect("second bullet");
        assert!(first < second);
        assert!(text.contains("architect\u{2019}s"), "{text:?}");
        assert!(text.contains("Re: Riverside Clinic Renovation"));
        assert!(!text.contains("\u{e2}\u{20ac}"), "{text:?}");
    }

    #[test]
    fn short_list_fits_on_one_page() {
        let meta = metadata();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let list = sections(2);
        let rendered = CoverLetter::new(&meta, &list, &config, &assets).render();
        assert_eq!(rendered.page_count, 1);
        assert_eq!(PdfReader::from_bytes(&rendered.bytes).unwrap().page_count(), 1);
    }

    #[test]
    fn long_list_overflows_onto_more_pages() {
        let meta = metadata();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let list = sections(60);
        let rendered = CoverLetter::new(&meta, &list, &config, &assets).render();
        assert!(rendered.page_count > 1);
        assert_eq!(
            PdfReader::from_bytes(&rendered.bytes).unwrap().page_count(),
            rendered.page_count
        );
    }

    #[test]
    fn renders_with_logo() {
        let meta = metadata();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin().with_logo_bytes(&png_bytes(200, 80)).unwrap();
        let list = sections(3);
        let rendered = CoverLetter::new(&meta, &list, &config, &assets).render();
        assert_eq!(rendered.page_count, 1);
        assert!(PdfReader::from_bytes(&rendered.bytes).is_ok());
    }
}
