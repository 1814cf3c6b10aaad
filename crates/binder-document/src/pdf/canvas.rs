// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page canvas — a thin drawing surface over `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. The canvas collects ops for the current page and
// closes it on `show_page`, so page generators can paginate by hand.
//
// Builtin-font strings are written as WinAnsi bytes through a raw `Tj`
// operator, because printpdf would otherwise emit their UTF-8 bytes under
// the font's /WinAnsiEncoding. The raw operator is only serialised with
// `secure: false`.

use printpdf::{
    BuiltinFont, Color, DictItem, FontId, Line, LinePoint, Mm, Op, PdfDocument, PdfPage,
    PdfSaveOptions, PdfWarnMsg, Point, Pt, Rgb, TextItem, XObjectId, XObjectTransform,
};
use tracing::debug;

use crate::assets::{BinderAssets, LogoImage};
use crate::pdf::encoding::encode_win_ansi;
use crate::pdf::metrics::{FontWeight, text_width};

/// US Letter width in points.
pub const LETTER_WIDTH: f32 = 612.0;
/// US Letter height in points.
pub const LETTER_HEIGHT: f32 = 792.0;
/// Points per inch.
pub const INCH: f32 = 72.0;

/// Serialised PDF bytes plus the number of pages they contain.
#[derive(Debug, Clone)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// A font usable on this canvas's document.
#[derive(Debug, Clone)]
enum FontHandle {
    Builtin(BuiltinFont),
    Embedded(FontId),
}

/// Drawing surface for one generated document. Coordinates are in points
/// with the origin at the bottom-left of the page.
pub struct PageCanvas {
    doc: PdfDocument,
    regular: FontHandle,
    bold: FontHandle,
    logo: Option<XObjectId>,
    width: f32,
    height: f32,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
}

impl PageCanvas {
    /// Create a US Letter canvas. Bundled fonts are embedded when the assets
    /// provide them; otherwise the builtin Times faces are used.
    pub fn letter(title: &str, assets: &BinderAssets) -> Self {
        let mut doc = PdfDocument::new(title);

        let (regular, bold) = match assets.fonts() {
            Some((regular_font, bold_font)) => (
                FontHandle::Embedded(doc.add_font(regular_font)),
                FontHandle::Embedded(doc.add_font(bold_font)),
            ),
            None => (
                FontHandle::Builtin(BuiltinFont::TimesRoman),
                FontHandle::Builtin(BuiltinFont::TimesBold),
            ),
        };

        Self {
            doc,
            regular,
            bold,
            logo: None,
            width: LETTER_WIDTH,
            height: LETTER_HEIGHT,
            pages: Vec::new(),
            ops: Vec::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Pages closed so far, not counting the one being drawn.
    pub fn closed_pages(&self) -> usize {
        self.pages.len()
    }

    // -- Text -----------------------------------------------------------------

    /// Draw `text` with its baseline starting at (`x`, `y`).
    pub fn draw_string(&mut self, x: f32, y: f32, text: &str, weight: FontWeight, size: f32) {
        if text.is_empty() {
            return;
        }
        let font = match weight {
            FontWeight::Regular => self.regular.clone(),
            FontWeight::Bold => self.bold.clone(),
        };

        self.ops.push(Op::StartTextSection);
        self.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        match font {
            FontHandle::Builtin(font) => {
                self.ops.push(Op::SetFontSizeBuiltinFont {
                    size: Pt(size),
                    font: font.clone(),
                });
                // An empty write emits nothing but adds the font to the
                // document's resources.
                self.ops.push(Op::WriteTextBuiltinFont {
                    items: Vec::new(),
                    font,
                });
                self.ops.push(Op::Unknown {
                    key: "Tj".into(),
                    value: vec![DictItem::String {
                        data: encode_win_ansi(text),
                        literal: false,
                    }],
                });
            }
            FontHandle::Embedded(font) => {
                self.ops.push(Op::SetFontSize {
                    size: Pt(size),
                    font: font.clone(),
                });
                self.ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.to_string())],
                    font,
                });
            }
        }
        self.ops.push(Op::EndTextSection);
    }

    /// Draw `text` horizontally centred on `center_x`.
    pub fn draw_centred_string(
        &mut self,
        center_x: f32,
        y: f32,
        text: &str,
        weight: FontWeight,
        size: f32,
    ) {
        let width = text_width(text, weight, size);
        self.draw_string(center_x - width / 2.0, y, text, weight, size);
    }

    // -- Graphics -------------------------------------------------------------

    /// Stroke a black straight line.
    pub fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32, thickness: f32) {
        self.ops.push(Op::SaveGraphicsState);
        self.ops.push(Op::SetOutlineColor {
            col: Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)),
        });
        self.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        self.ops.push(Op::DrawLine {
            line: Line {
                points: vec![
                    LinePoint {
                        p: Point { x: Pt(x1), y: Pt(y1) },
                        bezier: false,
                    },
                    LinePoint {
                        p: Point { x: Pt(x2), y: Pt(y2) },
                        bezier: false,
                    },
                ],
                is_closed: false,
            },
        });
        self.ops.push(Op::RestoreGraphicsState);
    }

    /// Place the logo with its bottom-left corner at (`x`, `y`), scaled to
    /// `width` × `height` points. The image is embedded once per document.
    pub fn draw_logo(&mut self, logo: &LogoImage, x: f32, y: f32, width: f32, height: f32) {
        let id = match &self.logo {
            Some(id) => id.clone(),
            None => {
                let id = self.doc.add_image(logo.raw());
                self.logo = Some(id.clone());
                id
            }
        };

        // At 72 dpi one pixel is one point, so the scale maps pixels to the
        // requested size directly.
        let scale_x = width / logo.width_px() as f32;
        let scale_y = height / logo.height_px() as f32;

        self.ops.push(Op::UseXobject {
            id,
            transform: XObjectTransform {
                translate_x: Some(Pt(x)),
                translate_y: Some(Pt(y)),
                scale_x: Some(scale_x),
                scale_y: Some(scale_y),
                dpi: Some(INCH),
                rotate: None,
            },
        });
    }

    // -- Pages ----------------------------------------------------------------

    /// Close the current page and start a new blank one.
    pub fn show_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            Mm::from(Pt(self.width)),
            Mm::from(Pt(self.height)),
            ops,
        ));
    }

    /// Close any page still being drawn and serialise the document.
    pub fn finish(mut self) -> RenderedPdf {
        if !self.ops.is_empty() || self.pages.is_empty() {
            self.show_page();
        }
        let page_count = self.pages.len();
        self.doc.with_pages(self.pages);

        let options = PdfSaveOptions {
            secure: false,
            ..Default::default()
        };
        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let bytes = self.doc.save(&options, &mut warnings);

        debug!(
            page_count,
            bytes = bytes.len(),
            warnings = warnings.len(),
            "canvas serialised"
        );

        RenderedPdf { bytes, page_count }
    }
}
