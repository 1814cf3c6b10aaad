// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::filename::DEFAULT_FILENAME;

/// Persistent settings applied to every generated binder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BinderConfig {
    /// Footer printed at the bottom of every generated page.
    pub footer_text: String,
    /// Sentence introducing the bulleted section list on the cover.
    pub approval_sentence: String,
    /// Logo file name, resolved inside the asset directory.
    pub logo_file: String,
    /// Asset directory override. `None` means next to the executable.
    pub asset_dir: Option<PathBuf>,
    /// Pre-filled output file name.
    pub default_filename: String,
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            footer_text: "Wiljo Interiors, Inc.   |   109 NE 38th Street, Oklahoma City, OK 73105"
                .to_string(),
            approval_sentence:
                "We are submitting the following materials for the architect\u{2019}s review and approval:"
                    .to_string(),
            logo_file: "logo.png".to_string(),
            asset_dir: None,
            default_filename: DEFAULT_FILENAME.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_fills_defaults() {
        let config: BinderConfig =
            serde_json::from_str(r#"{ "footer_text": "Acme | 1 Main St" }"#).unwrap();
        assert_eq!(config.footer_text, "Acme | 1 Main St");
        assert_eq!(config.logo_file, "logo.png");
        assert!(config.asset_dir.is_none());
    }

    #[test]
    fn round_trips_through_json() {
        let config = BinderConfig {
            asset_dir: Some(PathBuf::from("/opt/binder/assets")),
            ..Default::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: BinderConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
