// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Builder page — the four steps: cover details, uploads, sections, generate.

use dioxus::prelude::*;

use binder_core::human_errors::{HumanError, humanize_error};
use binder_core::{SectionEntry, sanitize_filename};

use crate::services::app_services::AppServices;
use crate::state::AppState;

const SECTION_STYLE: &str = "margin: 16px 0; padding-bottom: 16px; border-bottom: 1px solid #eee;";
const BUTTON_STYLE: &str = "padding: 8px 16px; border-radius: 6px; border: 1px solid #007aff; color: #007aff; background: white; font-size: 14px;";
const PRIMARY_STYLE: &str = "padding: 10px 20px; border-radius: 6px; border: none; background: #007aff; color: white; font-size: 15px;";

#[component]
pub fn Builder() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    // Section form, reset after every "Add Section"
    let mut spec_label = use_signal(String::new);
    let mut product_name = use_signal(String::new);
    let mut selected = use_signal(Vec::<String>::new);

    let (meta, uploads, sections, clear_pending, issues, output_name, binder_pages, last_error) = {
        let s = state.read();
        let uploads: Vec<(String, usize)> = s
            .uploads
            .iter()
            .map(|a| (a.name.clone(), s.upload_pages.get(&a.name).copied().unwrap_or(0)))
            .collect();
        (
            s.metadata.clone(),
            uploads,
            s.sections.entries().to_vec(),
            s.sections.clear_pending(),
            s.sections.readiness_issues(&s.metadata),
            s.output_name.clone(),
            s.binder.as_ref().map(|b| b.page_count),
            s.last_error.clone(),
        )
    };
    let ready = issues.is_empty();

    rsx! {
        div {
            h1 { "Submittal Binder" }

            // -- 1. Cover information ---------------------------------------
            section { style: SECTION_STYLE,
                h3 { "1) Binder Cover Information" }
                div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 8px 16px;",
                    Field {
                        label: "Project (for Re:)",
                        value: meta.project.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.project = v; s.invalidate(); },
                    }
                    Field {
                        label: "To: Name",
                        value: meta.to_name.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.to_name = v; s.invalidate(); },
                    }
                    Field {
                        label: "Submitted By (signature name)",
                        value: meta.submitter_name.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.submitter_name = v; s.invalidate(); },
                    }
                    Field {
                        label: "To: Company",
                        value: meta.to_company.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.to_company = v; s.invalidate(); },
                    }
                    Field {
                        label: "Date",
                        value: meta.date.clone().unwrap_or_default(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.date = Some(v); s.invalidate(); },
                    }
                    Field {
                        label: "To: Street",
                        value: meta.to_street.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.to_street = v; s.invalidate(); },
                    }
                    div {}
                    Field {
                        label: "To: City/State/Zip",
                        value: meta.to_city_state_zip.clone(),
                        on_input: move |v: String| { let mut s = state.write(); s.metadata.to_city_state_zip = v; s.invalidate(); },
                    }
                }
            }

            // -- 2. Uploads ---------------------------------------------------
            section { style: SECTION_STYLE,
                h3 { "2) Upload Product PDFs" }
                div { style: "display: flex; gap: 8px;",
                    button {
                        style: BUTTON_STYLE,
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let Some(paths) = rfd::FileDialog::new()
                                    .add_filter("PDF", &["pdf"])
                                    .pick_files()
                                else {
                                    return;
                                };
                                let mut s = state.write();
                                s.last_error = None;
                                for path in paths {
                                    match svc.read_upload(&path) {
                                        Ok((attachment, pages)) => {
                                            s.upload_pages.insert(attachment.name.clone(), pages);
                                            s.uploads.insert(attachment);
                                        }
                                        Err(e) => {
                                            tracing::warn!(path = %path.display(), error = %e, "upload rejected");
                                            s.last_error = Some(humanize_error(&e));
                                        }
                                    }
                                }
                            }
                        },
                        "Choose PDFs"
                    }
                    if !uploads.is_empty() {
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| {
                                let mut s = state.write();
                                s.uploads.clear();
                                s.upload_pages.clear();
                                selected.set(Vec::new());
                            },
                            "Clear Uploads"
                        }
                    }
                }
                if uploads.is_empty() {
                    p { style: "color: #888;", "No PDFs uploaded yet." }
                } else {
                    ul {
                        for (name, pages) in uploads.iter() {
                            li { key: "{name}", "{name} ({pages} pages)" }
                        }
                    }
                }
            }

            // -- 3. Sections --------------------------------------------------
            section { style: SECTION_STYLE,
                h3 { "3) Add Spec Sections & Products" }
                Field {
                    label: "Spec Section (e.g., 054000 Cold Formed Metal Framing)",
                    value: spec_label.read().clone(),
                    on_input: move |v: String| spec_label.set(v),
                }
                Field {
                    label: "Product Name (for the section cover page)",
                    value: product_name.read().clone(),
                    on_input: move |v: String| product_name.set(v),
                }
                if !uploads.is_empty() {
                    p { style: "margin: 8px 0 4px; font-size: 14px;", "Attach PDFs to this section:" }
                    for (name, _) in uploads.iter() {
                        label { key: "{name}", style: "display: block; font-size: 14px;",
                            input {
                                r#type: "checkbox",
                                checked: selected.read().contains(name),
                                onchange: {
                                    let name = name.clone();
                                    move |evt: Event<FormData>| {
                                        let mut names = selected.write();
                                        names.retain(|n| n != &name);
                                        if evt.checked() {
                                            names.push(name.clone());
                                        }
                                    }
                                },
                            }
                            " {name}"
                        }
                    }
                }
                button {
                    style: "{PRIMARY_STYLE} margin-top: 8px;",
                    onclick: move |_| {
                        let names = selected.read().clone();
                        {
                            let mut s = state.write();
                            let attachments = s.uploads.select(&names);
                            s.sections.add(&spec_label.read(), &product_name.read(), attachments);
                            s.invalidate();
                        }
                        spec_label.set(String::new());
                        product_name.set(String::new());
                        selected.set(Vec::new());
                    },
                    "Add Section"
                }

                if !sections.is_empty() {
                    h4 { "Sections Added (in order)" }
                    if clear_pending {
                        div { style: "display: flex; gap: 8px;",
                            button {
                                style: BUTTON_STYLE,
                                onclick: move |_| {
                                    let mut s = state.write();
                                    if s.sections.confirm_clear() {
                                        s.invalidate();
                                    }
                                },
                                "Yes, Clear All"
                            }
                            button {
                                style: BUTTON_STYLE,
                                onclick: move |_| state.write().sections.cancel_clear(),
                                "Cancel"
                            }
                        }
                    } else {
                        button {
                            style: BUTTON_STYLE,
                            onclick: move |_| state.write().sections.request_clear(),
                            "Clear All Sections"
                        }
                    }
                    for (index, entry) in sections.iter().enumerate() {
                        SectionCard { key: "{entry.id.0}", number: index + 1, entry: entry.clone() }
                    }
                }
            }

            // -- 4. Generate --------------------------------------------------
            section { style: SECTION_STYLE,
                h3 { "4) Generate Submittal Binder" }
                if !ready {
                    div { style: "padding: 12px; border-radius: 6px; background: #f8d7da; color: #721c24; font-size: 14px;",
                        "Please complete the following before generating:"
                        ul {
                            for issue in issues.iter() {
                                li { "{issue}" }
                            }
                        }
                    }
                }
                Field {
                    label: "Output file name",
                    value: output_name.clone(),
                    on_input: move |v: String| state.write().output_name = v,
                }
                button {
                    style: PRIMARY_STYLE,
                    disabled: !ready,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let (metadata, entries) = {
                                let s = state.read();
                                (s.metadata.clone(), s.sections.entries().to_vec())
                            };
                            let result = svc.generate(&metadata, &entries);
                            let mut s = state.write();
                            match result {
                                Ok(binder) => {
                                    s.status_message = None;
                                    s.binder = Some(binder);
                                    s.last_error = None;
                                }
                                Err(e) => {
                                    tracing::error!(error = %e, "binder generation failed");
                                    s.binder = None;
                                    s.status_message = None;
                                    s.last_error = Some(humanize_error(&e));
                                }
                            }
                        }
                    },
                    "Generate Submittal Binder"
                }

                if let Some(pages) = binder_pages {
                    div { style: "margin-top: 12px; padding: 12px; border-radius: 6px; background: #d4edda; color: #155724;",
                        "Submittal Binder created ({pages} pages)."
                    }
                    div { style: "margin-top: 8px; padding: 12px; border-radius: 6px; background: #fff3cd; color: #856404; font-size: 14px;",
                        "REMINDER: Please highlight specific items used on the product data sheet. (e.g., 5/8\" Fire code, or Tile number, etc.)"
                    }
                    button {
                        style: "{PRIMARY_STYLE} margin-top: 8px;",
                        onclick: {
                            let svc = svc.clone();
                            move |_| {
                                let file_name = sanitize_filename(&state.read().output_name);
                                let Some(path) = rfd::FileDialog::new()
                                    .add_filter("PDF", &["pdf"])
                                    .set_file_name(&file_name)
                                    .save_file()
                                else {
                                    return;
                                };
                                let result = match state.read().binder.as_ref() {
                                    Some(binder) => svc.save_binder(&path, &binder.bytes),
                                    None => return,
                                };
                                let mut s = state.write();
                                match result {
                                    Ok(()) => s.status_message = Some(format!("Saved to {}", path.display())),
                                    Err(e) => {
                                        tracing::error!(error = %e, "failed to save binder");
                                        s.last_error = Some(humanize_error(&e));
                                    }
                                }
                            }
                        },
                        "Save Binder"
                    }
                }

                if let Some(ref msg) = state.read().status_message {
                    p { style: "color: #34c759; font-size: 14px;", "{msg}" }
                }
                if let Some(error) = last_error.clone() {
                    ErrorBanner { error }
                }
            }
        }
    }
}

#[component]
fn Field(label: &'static str, value: String, on_input: EventHandler<String>) -> Element {
    rsx! {
        label { style: "display: flex; flex-direction: column; font-size: 13px; color: #555; margin: 4px 0;",
            "{label}"
            input {
                style: "padding: 6px 8px; border: 1px solid #ccc; border-radius: 4px; font-size: 14px;",
                value: "{value}",
                oninput: move |evt| on_input.call(evt.value()),
            }
        }
    }
}

#[component]
fn SectionCard(number: usize, entry: SectionEntry) -> Element {
    let files = entry.attachments.len();
    rsx! {
        div { style: "margin: 8px 0; padding: 8px 12px; border: 1px solid #e0e0e0; border-radius: 6px;",
            strong { "{number}. Spec Section: {entry.spec_label} \u{2014} {entry.product_name}  ({files} file(s))" }
            if entry.attachments.is_empty() {
                p { style: "color: #888; font-size: 13px; margin: 4px 0;", "No PDFs attached." }
            } else {
                ul { style: "margin: 4px 0; font-size: 13px; color: #555;",
                    for attachment in entry.attachments.iter() {
                        li { "{attachment.name}" }
                    }
                }
            }
        }
    }
}

#[component]
fn ErrorBanner(error: HumanError) -> Element {
    let colour = error.colour();
    rsx! {
        div { style: "margin-top: 12px; padding: 12px; border-radius: 6px; border: 1px solid {colour}; color: {colour};",
            p { style: "margin: 0 0 4px; font-weight: 600;", "{error.message}" }
            p { style: "margin: 0; font-size: 14px;", "{error.suggestion}" }
        }
    }
}
