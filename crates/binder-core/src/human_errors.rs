// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the office staff who assemble binders.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Severity drives the colour of the message in the UI.

use crate::error::BinderError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must fill something in or pick a different file.
    ActionRequired,
    /// Cannot be fixed from the form: broken file, missing disk space, etc.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone, PartialEq)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives colour in UI).
    pub severity: Severity,
}

impl HumanError {
    /// UI colour for this error's severity.
    pub fn colour(&self) -> &'static str {
        match self.severity {
            Severity::ActionRequired => "#b26a00",
            Severity::Permanent => "#d32f2f",
        }
    }
}

/// Convert a `BinderError` into a `HumanError` suitable for the form.
pub fn humanize_error(err: &BinderError) -> HumanError {
    match err {
        BinderError::NotReady(issues) => HumanError {
            message: "The binder isn't ready yet.".into(),
            suggestion: format!("Please complete the following before generating: {}.", issues.join("; ")),
            severity: Severity::ActionRequired,
        },

        BinderError::InvalidAttachment { name, .. } => HumanError {
            message: format!("\u{201C}{name}\u{201D} couldn't be read as a PDF."),
            suggestion: "Open the file to check it isn't damaged, or export it to PDF again, then re-upload it.".into(),
            severity: Severity::ActionRequired,
        },

        BinderError::PdfError(detail) => {
            if detail.contains("encrypt") {
                HumanError {
                    message: "One of the PDFs is password protected.".into(),
                    suggestion: "Remove the password from the product PDF, then upload it again.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "The binder couldn't be put together.".into(),
                    suggestion: format!("Try removing the most recently added section and generating again. (Detail: {detail})"),
                    severity: Severity::Permanent,
                }
            }
        }

        BinderError::ImageError(detail) => HumanError {
            message: "The logo image couldn't be used.".into(),
            suggestion: format!("Replace the logo with a PNG or JPEG file. ({detail})"),
            severity: Severity::ActionRequired,
        },

        BinderError::FontError(detail) => HumanError {
            message: "A bundled font couldn't be loaded.".into(),
            suggestion: format!("The standard Times font will be used instead. ({detail})"),
            severity: Severity::Permanent,
        },

        BinderError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::PermissionDenied {
                HumanError {
                    message: "We don't have permission to save there.".into(),
                    suggestion: "Choose a different folder, such as Documents or Desktop.".into(),
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "A file couldn't be read or written.".into(),
                    suggestion: format!("Check there is free disk space and try again. ({io_err})"),
                    severity: Severity::Permanent,
                }
            }
        }

        BinderError::Serialization(detail) => HumanError {
            message: "Your settings couldn't be saved.".into(),
            suggestion: format!("Try saving the settings again. ({detail})"),
            severity: Severity::Permanent,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_ready_lists_every_issue() {
        let err = BinderError::NotReady(vec!["Project (step 1)".into(), "To: Name (step 1)".into()]);
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert!(human.suggestion.contains("Project (step 1)"));
        assert!(human.suggestion.contains("To: Name (step 1)"));
    }

    #[test]
    fn invalid_attachment_names_the_file() {
        let err = BinderError::InvalidAttachment {
            name: "studs.pdf".into(),
            detail: "invalid file header".into(),
        };
        let human = humanize_error(&err);
        assert!(human.message.contains("studs.pdf"));
    }

    #[test]
    fn encrypted_pdf_is_action_required() {
        let err = BinderError::PdfError("document is encrypted".into());
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn permission_denied_is_action_required() {
        let err = BinderError::Io(std::io::Error::from(std::io::ErrorKind::PermissionDenied));
        let human = humanize_error(&err);
        assert_eq!(human.severity, Severity::ActionRequired);
        assert_eq!(human.colour(), "#b26a00");
    }
}
