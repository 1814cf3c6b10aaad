// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output filename sanitisation.

/// Name used when the user leaves the filename field empty.
pub const DEFAULT_FILENAME: &str = "Submittal_Binder.pdf";

/// Characters that are illegal in file names on at least one common platform.
const ILLEGAL_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Turn a user-supplied name into a safe `.pdf` file name.
///
/// Illegal characters become `_` and a `.pdf` suffix is added unless one is
/// already present (in any case). Blank input yields [`DEFAULT_FILENAME`].
pub fn sanitize_filename(input: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return DEFAULT_FILENAME.to_string();
    }

    let mut name: String = trimmed
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();

    if !name.to_ascii_lowercase().ends_with(".pdf") {
        name.push_str(".pdf");
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_uses_default() {
        assert_eq!(sanitize_filename(""), DEFAULT_FILENAME);
        assert_eq!(sanitize_filename("   "), DEFAULT_FILENAME);
    }

    #[test]
    fn illegal_characters_are_replaced() {
        assert_eq!(
            sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#),
            "a_b_c_d_e_f_g_h_i_j.pdf"
        );
    }

    #[test]
    fn pdf_suffix_is_enforced_once() {
        assert_eq!(sanitize_filename("Tower Binder"), "Tower Binder.pdf");
        assert_eq!(sanitize_filename("Tower.pdf"), "Tower.pdf");
        assert_eq!(sanitize_filename("Tower.PDF"), "Tower.PDF");
        assert_eq!(sanitize_filename("Tower.pdf.txt"), "Tower.pdf.txt.pdf");
    }
}
