// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bundled assets: optional serif fonts and the company logo.
//
// Every asset is optional. A missing or unreadable file is logged and the
// default is used instead (builtin Times fonts, no logo).

use std::path::{Path, PathBuf};

use binder_core::BinderConfig;
use binder_core::error::{BinderError, Result};
use printpdf::{ParsedFont, RawImage, RawImageData, RawImageFormat};
use tracing::{debug, info, warn};

/// Font files looked up inside the asset directory.
pub const REGULAR_FONT_FILE: &str = "fonts/LiberationSerif-Regular.ttf";
pub const BOLD_FONT_FILE: &str = "fonts/LiberationSerif-Bold.ttf";

/// A decoded logo ready to embed, flattened onto white.
pub struct LogoImage {
    raw: RawImage,
    width_px: u32,
    height_px: u32,
}

impl LogoImage {
    /// Decode PNG/JPEG/etc. bytes into an RGB image.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let dynamic_image = ::image::load_from_memory(bytes).map_err(|err| {
            BinderError::ImageError(format!("failed to decode logo: {}", err))
        })?;

        let (width_px, height_px) = (dynamic_image.width(), dynamic_image.height());
        if width_px == 0 || height_px == 0 {
            return Err(BinderError::ImageError("logo has zero size".into()));
        }

        // Composite transparent pixels onto a white page background.
        let rgba = dynamic_image.to_rgba8();
        let mut pixels = Vec::with_capacity(width_px as usize * height_px as usize * 3);
        for pixel in rgba.pixels() {
            let [r, g, b, a] = pixel.0;
            let alpha = u32::from(a);
            for channel in [r, g, b] {
                let blended = (u32::from(channel) * alpha + 255 * (255 - alpha)) / 255;
                pixels.push(blended as u8);
            }
        }

        let raw = RawImage {
            pixels: RawImageData::U8(pixels),
            width: width_px as usize,
            height: height_px as usize,
            data_format: RawImageFormat::RGB8,
            tag: Vec::new(),
        };

        Ok(Self {
            raw,
            width_px,
            height_px,
        })
    }

    pub fn raw(&self) -> &RawImage {
        &self.raw
    }

    pub fn width_px(&self) -> u32 {
        self.width_px
    }

    pub fn height_px(&self) -> u32 {
        self.height_px
    }

    /// Size (width, height) in points that fits a `max_w` × `max_h` box
    /// while preserving the aspect ratio.
    pub fn fit_within(&self, max_w: f32, max_h: f32) -> (f32, f32) {
        let (w, h) = (self.width_px as f32, self.height_px as f32);
        let scale = (max_w / w).min(max_h / h);
        (w * scale, h * scale)
    }
}

/// Fonts and logo shared by every generated page.
pub struct BinderAssets {
    fonts: Option<(ParsedFont, ParsedFont)>,
    logo: Option<LogoImage>,
    dir: Option<PathBuf>,
}

impl std::fmt::Debug for BinderAssets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BinderAssets")
            .field("embedded_fonts", &self.fonts.is_some())
            .field("logo", &self.logo.as_ref().map(|l| (l.width_px, l.height_px)))
            .field("dir", &self.dir)
            .finish()
    }
}

impl BinderAssets {
    /// No bundled assets: builtin Times fonts and no logo.
    pub fn builtin() -> Self {
        Self {
            fonts: None,
            logo: None,
            dir: None,
        }
    }

    /// Load assets from the directory the configuration points at.
    pub fn load(config: &BinderConfig) -> Self {
        let dir = resolve_asset_dir(config);
        Self::load_from_dir(&dir, &config.logo_file)
    }

    /// Load whatever assets exist in `dir`. Never fails.
    pub fn load_from_dir(dir: &Path, logo_file: &str) -> Self {
        info!(dir = %dir.display(), "loading bundled assets");

        let fonts = match (
            load_font(&dir.join(REGULAR_FONT_FILE)),
            load_font(&dir.join(BOLD_FONT_FILE)),
        ) {
            (Ok(regular), Ok(bold)) => Some((regular, bold)),
            (Err(err), _) | (_, Err(err)) => {
                warn!(error = %err, "bundled serif fonts unavailable, using Times");
                None
            }
        };

        let logo = if logo_file.trim().is_empty() {
            None
        } else {
            let path = dir.join(logo_file.trim());
            match std::fs::read(&path) {
                Ok(bytes) => match LogoImage::decode(&bytes) {
                    Ok(logo) => Some(logo),
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "logo could not be decoded, skipping");
                        None
                    }
                },
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "logo not found, skipping");
                    None
                }
            }
        };

        Self {
            fonts,
            logo,
            dir: Some(dir.to_path_buf()),
        }
    }

    /// Replace the logo with decoded `bytes`.
    pub fn with_logo_bytes(mut self, bytes: &[u8]) -> Result<Self> {
        self.logo = Some(LogoImage::decode(bytes)?);
        Ok(self)
    }

    /// Regular and bold faces, when both bundled fonts loaded.
    pub fn fonts(&self) -> Option<(&ParsedFont, &ParsedFont)> {
        self.fonts.as_ref().map(|(regular, bold)| (regular, bold))
    }

    pub fn logo(&self) -> Option<&LogoImage> {
        self.logo.as_ref()
    }

    /// Directory the assets were looked up in.
    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }
}

/// Asset directory: the configured override, else `assets/` beside the
/// executable, else the executable's own directory.
pub fn resolve_asset_dir(config: &BinderConfig) -> PathBuf {
    if let Some(dir) = &config.asset_dir {
        return dir.clone();
    }

    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."));

    let bundled = exe_dir.join("assets");
    if bundled.is_dir() { bundled } else { exe_dir }
}

fn load_font(path: &Path) -> Result<ParsedFont> {
    let bytes = std::fs::read(path).map_err(|err| {
        BinderError::FontError(format!("cannot read {}: {}", path.display(), err))
    })?;

    let mut warnings = Vec::new();
    let font = ParsedFont::from_bytes(&bytes, 0, &mut warnings).ok_or_else(|| {
        BinderError::FontError(format!("cannot parse {}", path.display()))
    })?;

    debug!(path = %path.display(), warnings = warnings.len(), "font loaded");
    Ok(font)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_bytes;
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    #[test]
    fn empty_dir_degrades_to_builtin() {
        let dir = tempfile::tempdir().unwrap();
        let assets = BinderAssets::load_from_dir(dir.path(), "logo.png");
        assert!(assets.fonts().is_none());
        assert!(assets.logo().is_none());
        assert_eq!(assets.dir(), Some(dir.path()));
    }

    #[test]
    fn logo_is_loaded_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), png_bytes(40, 20)).unwrap();
        let assets = BinderAssets::load_from_dir(dir.path(), "logo.png");
        let logo = assets.logo().expect("logo should load");
        assert_eq!((logo.width_px(), logo.height_px()), (40, 20));
    }

    #[test]
    fn garbage_logo_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("logo.png"), b"not an image").unwrap();
        let assets = BinderAssets::load_from_dir(dir.path(), "logo.png");
        assert!(assets.logo().is_none());
    }

    #[test]
    fn garbage_font_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fonts")).unwrap();
        std::fs::write(dir.path().join(REGULAR_FONT_FILE), b"nope").unwrap();
        std::fs::write(dir.path().join(BOLD_FONT_FILE), b"nope").unwrap();
        let assets = BinderAssets::load_from_dir(dir.path(), "");
        assert!(assets.fonts().is_none());
    }

    #[test]
    fn logo_fit_preserves_aspect_ratio() {
        let logo = LogoImage::decode(&png_bytes(400, 100)).unwrap();
        let (w, h) = logo.fit_within(115.2, 54.0);
        assert!((w - 115.2).abs() < 1e-3);
        assert!((h - 28.8).abs() < 1e-3);
    }

    #[test]
    fn transparent_pixels_become_white() {
        let img = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 0]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        let logo = LogoImage::decode(&out.into_inner()).unwrap();
        match &logo.raw().pixels {
            RawImageData::U8(px) => assert!(px.iter().all(|&v| v == 255)),
            _ => panic!("expected 8-bit pixels"),
        }
    }

    #[test]
    fn configured_dir_wins() {
        let config = BinderConfig {
            asset_dir: Some(PathBuf::from("/srv/binder-assets")),
            ..Default::default()
        };
        assert_eq!(resolve_asset_dir(&config), PathBuf::from("/srv/binder-assets"));
    }
}
