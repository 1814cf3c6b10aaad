// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — persistent app configuration.

use std::path::PathBuf;

use dioxus::prelude::*;

use binder_core::sanitize_filename;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    let config = state.read().config.clone();
    let asset_dir = config
        .asset_dir
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let active_dir = svc
        .asset_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "builtin".into());

    rsx! {
        div {
            h1 { "Settings" }

            section { style: "margin: 16px 0;",
                h3 { "Generated Pages" }
                SettingField {
                    label: "Footer text",
                    value: config.footer_text.clone(),
                    on_change: move |v: String| state.write().config.footer_text = v,
                }
                SettingField {
                    label: "Approval sentence",
                    value: config.approval_sentence.clone(),
                    on_change: move |v: String| state.write().config.approval_sentence = v,
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Assets" }
                SettingField {
                    label: "Logo file",
                    value: config.logo_file.clone(),
                    on_change: move |v: String| state.write().config.logo_file = v,
                }
                SettingField {
                    label: "Asset folder (blank: next to the program)",
                    value: asset_dir,
                    on_change: move |v: String| {
                        let trimmed = v.trim();
                        state.write().config.asset_dir =
                            (!trimmed.is_empty()).then(|| PathBuf::from(trimmed));
                    },
                }
                p { style: "color: #666; font-size: 13px;", "Assets currently loaded from: {active_dir}" }
            }

            section { style: "margin: 16px 0;",
                h3 { "Output" }
                SettingField {
                    label: "Default file name",
                    value: config.default_filename.clone(),
                    on_change: move |v: String| state.write().config.default_filename = sanitize_filename(&v),
                }
            }

            // Save button
            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                let mut s = state.write();
                                s.output_name = config.default_filename.clone();
                                s.invalidate();
                                save_msg.set(Some("Settings saved.".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("Save failed: {e}")));
                            }
                        }
                    }
                },
                "Save Settings"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "About" }
                p { style: "color: #666; font-size: 14px;",
                    "Submittal Binder v0.1.0"
                    br {}
                    "Cover letter, section dividers, and product PDFs in one document"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn SettingField(label: &'static str, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; gap: 16px; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                style: "flex: 1; max-width: 60%; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
            }
        }
    }
}
