// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Binder assembly — cover, then for each section its divider followed by the
// section's attachments, merged into one PDF.
//
// Every piece is written to a private staging directory first and merged
// from there. The directory is removed when assembly ends, whether it
// succeeded or not.

use std::path::{Path, PathBuf};

use binder_core::error::{BinderError, Result};
use binder_core::{BinderConfig, BinderMetadata, SectionEntry, ensure_ready};
use lopdf::Document;
use tempfile::TempDir;
use tracing::{debug, info, instrument, warn};

use crate::assets::BinderAssets;
use crate::pdf::cover::CoverLetter;
use crate::pdf::divider::render_divider;
use crate::pdf::merge::{MergeInput, merge_documents, save_to_bytes};

/// Bookmark title of the cover letter.
pub const COVER_BOOKMARK: &str = "Cover Letter";

/// A finished binder held in memory.
#[derive(Debug, Clone)]
pub struct AssembledBinder {
    pub bytes: Vec<u8>,
    pub page_count: usize,
    /// Pages taken by the cover letter.
    pub cover_pages: usize,
}

/// Builds binders with one configuration and asset set.
#[derive(Debug)]
pub struct BinderAssembler<'a> {
    config: &'a BinderConfig,
    assets: &'a BinderAssets,
    /// Parent of the staging directory; the system temp dir when `None`.
    staging_root: Option<PathBuf>,
}

impl<'a> BinderAssembler<'a> {
    pub fn new(config: &'a BinderConfig, assets: &'a BinderAssets) -> Self {
        Self {
            config,
            assets,
            staging_root: None,
        }
    }

    /// Create staging directories under `root` instead of the system temp dir.
    pub fn with_staging_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.staging_root = Some(root.into());
        self
    }

    /// Build the binder for `metadata` and `sections`, in section order.
    #[instrument(skip_all, fields(project = %metadata.project, sections = sections.len()))]
    pub fn assemble(
        &self,
        metadata: &BinderMetadata,
        sections: &[SectionEntry],
    ) -> Result<AssembledBinder> {
        ensure_ready(metadata, sections)?;

        let staging = self.staging_dir()?;
        debug!(dir = %staging.path().display(), "staging directory created");

        let result = self.assemble_in(staging.path(), metadata, sections);

        if let Err(err) = staging.close() {
            warn!(error = %err, "failed to remove staging directory");
        }

        let binder = result?;
        info!(
            pages = binder.page_count,
            cover_pages = binder.cover_pages,
            bytes = binder.bytes.len(),
            "binder assembled"
        );
        Ok(binder)
    }

    fn staging_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("submittal-binder-");
        let dir = match &self.staging_root {
            Some(root) => builder.tempdir_in(root)?,
            None => builder.tempdir()?,
        };
        Ok(dir)
    }

    fn assemble_in(
        &self,
        staging: &Path,
        metadata: &BinderMetadata,
        sections: &[SectionEntry],
    ) -> Result<AssembledBinder> {
        let mut inputs = Vec::new();

        let cover = CoverLetter::new(metadata, sections, self.config, self.assets).render();
        let cover_pages = cover.page_count;
        let path = stage(staging, "000-cover.pdf", &cover.bytes)?;
        inputs.push(MergeInput::bookmarked(load_generated(&path)?, COVER_BOOKMARK));

        for (index, section) in sections.iter().enumerate() {
            let number = index + 1;

            let divider = render_divider(section, self.config, self.assets);
            let path = stage(staging, &format!("{number:03}-divider.pdf"), &divider.bytes)?;
            inputs.push(MergeInput::bookmarked(
                load_generated(&path)?,
                section.bookmark_title(),
            ));

            for (attachment_index, attachment) in section.attachments.iter().enumerate() {
                let file_name = format!("{number:03}-{:02}-attachment.pdf", attachment_index + 1);
                let path = stage(staging, &file_name, &attachment.data)?;
                let document =
                    Document::load(&path).map_err(|err| BinderError::InvalidAttachment {
                        name: attachment.name.clone(),
                        detail: err.to_string(),
                    })?;
                inputs.push(MergeInput::new(document));
            }
        }

        debug!(documents = inputs.len(), "merging staged documents");
        let mut merged = merge_documents(inputs)?;
        let page_count = merged.get_pages().len();
        let bytes = save_to_bytes(&mut merged)?;

        Ok(AssembledBinder {
            bytes,
            page_count,
            cover_pages,
        })
    }
}

fn stage(dir: &Path, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
    let path = dir.join(file_name);
    std::fs::write(&path, bytes)?;
    Ok(path)
}

fn load_generated(path: &Path) -> Result<Document> {
    Document::load(path).map_err(|err| {
        BinderError::PdfError(format!("cannot reload {}: {}", path.display(), err))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::reader::PdfReader;
    use crate::test_support::{page_widths, simple_pdf};
    use binder_core::Attachment;

    fn metadata() -> BinderMetadata {
        BinderMetadata {
            project: "Riverside Clinic Renovation".into(),
            submitter_name: "Dana Whitfield".into(),
            date: None,
            to_name: "Pat Alvarez".into(),
            to_company: "Alvarez Architects".into(),
            ..Default::default()
        }
    }

    fn is_empty_dir(path: &Path) -> bool {
        std::fs::read_dir(path).unwrap().next().is_none()
    }

    #[test]
    fn two_sections_without_attachments_make_three_pages() {
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![
            SectionEntry::new("054000", "Metal Studs", Vec::new()),
            SectionEntry::new("092900", "Gypsum Board", Vec::new()),
        ];

        let binder = BinderAssembler::new(&config, &assets)
            .assemble(&metadata(), &sections)
            .unwrap();

        assert_eq!(binder.cover_pages, 1);
        assert_eq!(binder.page_count, 3);
        assert_eq!(PdfReader::from_bytes(&binder.bytes).unwrap().page_count(), 3);
    }

    #[test]
    fn attachments_follow_their_divider_in_order() {
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![
            SectionEntry::new(
                "054000",
                "Metal Studs",
                vec![
                    Attachment::new("studs.pdf", simple_pdf(2, 100.0)),
                    Attachment::new("track.pdf", simple_pdf(1, 120.0)),
                ],
            ),
            SectionEntry::new(
                "092900",
                "Gypsum Board",
                vec![Attachment::new("board.pdf", simple_pdf(3, 140.0))],
            ),
        ];

        let binder = BinderAssembler::new(&config, &assets)
            .assemble(&metadata(), &sections)
            .unwrap();

        // cover + (divider + 2 + 1) + (divider + 3)
        assert_eq!(binder.page_count, 1 + 4 + 4);

        let document = Document::load_mem(&binder.bytes).unwrap();
        let letter = 612.0;
        let widths: Vec<f32> = page_widths(&document);
        let expected_mm = [0.0, 0.0, 100.0, 100.0, 120.0, 0.0, 140.0, 140.0, 140.0];
        assert_eq!(widths.len(), expected_mm.len());
        for (width, mm) in widths.iter().zip(expected_mm) {
            let expected = if mm == 0.0 { letter } else { mm * 72.0 / 25.4 };
            assert!((width - expected).abs() < 0.5, "{width} vs {expected}");
        }
    }

    #[test]
    fn cover_bullets_survive_the_merge() {
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![
            SectionEntry::new("054000", "Metal Studs", Vec::new()),
            SectionEntry::new("092900", "Gypsum Board", Vec::new()),
        ];
        let binder = BinderAssembler::new(&config, &assets)
            .assemble(&metadata(), &sections)
            .unwrap();

        let document = Document::load_mem(&binder.bytes).unwrap();
        let cover = document.extract_text(&[1]).unwrap();
        let first = cover.find("\u{2022}  Spec Section 054000").expect("first bullet");
        let second = cover.find("\u{2022}  Spec Section 092900").expect("second bullet");
        assert!(first < second);

        let divider = document.extract_text(&[3]).unwrap();
        assert!(divider.contains("092900"), "{divider:?}");
        assert!(divider.contains("Gypsum Board"), "{divider:?}");
    }

    #[test]
    fn outline_is_written() {
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![SectionEntry::new("054000", "Metal Studs", Vec::new())];
        let binder = BinderAssembler::new(&config, &assets)
            .assemble(&metadata(), &sections)
            .unwrap();

        let document = Document::load_mem(&binder.bytes).unwrap();
        assert!(document.catalog().unwrap().get(b"Outlines").is_ok());
    }

    #[test]
    fn not_ready_fails_before_staging() {
        let root = tempfile::tempdir().unwrap();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();

        let result = BinderAssembler::new(&config, &assets)
            .with_staging_root(root.path())
            .assemble(&metadata(), &[]);

        match result {
            Err(BinderError::NotReady(reasons)) => {
                assert_eq!(reasons, ["Add at least one Spec Section in step 3"]);
            }
            other => panic!("expected NotReady, got {other:?}"),
        }
        assert!(is_empty_dir(root.path()));
    }

    #[test]
    fn staging_is_removed_after_success() {
        let root = tempfile::tempdir().unwrap();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![SectionEntry::new(
            "054000",
            "Metal Studs",
            vec![Attachment::new("studs.pdf", simple_pdf(1, 100.0))],
        )];

        BinderAssembler::new(&config, &assets)
            .with_staging_root(root.path())
            .assemble(&metadata(), &sections)
            .unwrap();

        assert!(is_empty_dir(root.path()));
    }

    #[test]
    fn staging_is_removed_after_failure() {
        let root = tempfile::tempdir().unwrap();
        let config = BinderConfig::default();
        let assets = BinderAssets::builtin();
        let sections = vec![SectionEntry::new(
            "054000",
            "Metal Studs",
            vec![Attachment::new("broken.pdf", b"%PDF-1.7 truncated".to_vec())],
        )];

        let result = BinderAssembler::new(&config, &assets)
            .with_staging_root(root.path())
            .assemble(&metadata(), &sections);

        match result {
            Err(BinderError::InvalidAttachment { name, .. }) => assert_eq!(name, "broken.pdf"),
            other => panic!("expected InvalidAttachment, got {other:?}"),
        }
        assert!(is_empty_dir(root.path()));
    }
}
