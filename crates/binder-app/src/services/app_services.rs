// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns the configuration and loaded assets and gives
// the Dioxus pages plain methods to call.
//
// Generation runs synchronously inside the button handler. The handles are
// `Arc<Mutex<>>` only so the struct can be cloned into event closures.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use binder_core::error::Result;
use binder_core::{Attachment, BinderConfig, BinderMetadata, SectionEntry};
use binder_document::{AssembledBinder, BinderAssembler, BinderAssets, validate_attachment};
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    data_dir: PathBuf,
    config: Arc<Mutex<BinderConfig>>,
    assets: Arc<Mutex<BinderAssets>>,
}

impl AppServices {
    /// Initialise services. Call once at app startup; never fails, every
    /// missing piece falls back to its default.
    pub fn init() -> Self {
        Self::with_data_dir(data_dir::data_dir())
    }

    pub fn with_data_dir(dir: PathBuf) -> Self {
        info!(path = %dir.display(), "initialising app services");

        let config = load_config(&dir).unwrap_or_default();
        let assets = BinderAssets::load(&config);

        Self {
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
            assets: Arc::new(Mutex::new(assets)),
        }
    }

    // -- Uploads -------------------------------------------------------------

    /// Read a picked file and check it is a usable PDF. Returns the
    /// attachment and its page count.
    pub fn read_upload(&self, path: &Path) -> Result<(Attachment, usize)> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.pdf".into());
        let attachment = Attachment::new(name, std::fs::read(path)?);
        let pages = validate_attachment(&attachment)?;
        info!(file = %attachment.name, pages, "upload accepted");
        Ok((attachment, pages))
    }

    // -- Generation ----------------------------------------------------------

    /// Build the binder with the current configuration and assets.
    pub fn generate(
        &self,
        metadata: &BinderMetadata,
        sections: &[SectionEntry],
    ) -> Result<AssembledBinder> {
        let config = self.config();
        let assets = lock(&self.assets);
        BinderAssembler::new(&config, &assets).assemble(metadata, sections)
    }

    /// Write finished binder bytes to `path`.
    pub fn save_binder(&self, path: &Path, bytes: &[u8]) -> Result<()> {
        std::fs::write(path, bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "binder saved");
        Ok(())
    }

    // -- Config --------------------------------------------------------------

    /// Current settings.
    pub fn config(&self) -> BinderConfig {
        lock(&self.config).clone()
    }

    /// Persist settings and reload assets so the next generation uses them.
    pub fn save_config(&self, config: &BinderConfig) -> Result<()> {
        persist_config(&self.data_dir, config)?;
        *lock(&self.config) = config.clone();
        *lock(&self.assets) = BinderAssets::load(config);
        info!("config saved, assets reloaded");
        Ok(())
    }

    /// Directory the assets are currently read from.
    pub fn asset_dir(&self) -> Option<PathBuf> {
        lock(&self.assets).dir().map(Path::to_path_buf)
    }
}

/// Lock a mutex, recovering the data if a previous holder panicked.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load_config(data_dir: &Path) -> Option<BinderConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &BinderConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use binder_core::BinderError;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(svc.config(), BinderConfig::default());
    }

    #[test]
    fn invalid_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{ not json").unwrap();
        assert!(load_config(dir.path()).is_none());
    }

    #[test]
    fn saved_config_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let assets = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());

        let config = BinderConfig {
            footer_text: "Acme Drywall | 12 Elm St".into(),
            asset_dir: Some(assets.path().to_path_buf()),
            ..Default::default()
        };
        svc.save_config(&config).unwrap();
        assert_eq!(svc.asset_dir().as_deref(), Some(assets.path()));

        let restarted = AppServices::with_data_dir(dir.path().to_path_buf());
        assert_eq!(restarted.config(), config);
    }

    #[test]
    fn non_pdf_upload_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("specs.pdf");
        std::fs::write(&path, b"this is not a pdf").unwrap();

        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        match svc.read_upload(&path) {
            Err(BinderError::InvalidAttachment { name, .. }) => assert_eq!(name, "specs.pdf"),
            other => panic!("expected InvalidAttachment, got {other:?}"),
        }
    }

    #[test]
    fn generate_blocks_until_ready() {
        let dir = tempfile::tempdir().unwrap();
        let svc = AppServices::with_data_dir(dir.path().to_path_buf());
        let result = svc.generate(&BinderMetadata::default(), &[]);
        assert!(matches!(result, Err(BinderError::NotReady(_))));
    }
}
