// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// WinAnsi string encoding for the builtin (Type1) fonts.
//
// The stock Times faces are declared with /WinAnsiEncoding, so their content
// strings must hold one WinAnsi byte per character rather than UTF-8.

use lopdf::{Document, dictionary};

/// Byte drawn for characters the encoding has no code for.
const REPLACEMENT: u8 = b'?';

/// Encode `text` as WinAnsi bytes, one byte per character. Characters
/// outside the code page become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let font = dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "Encoding" => "WinAnsiEncoding",
    };
    let encoding = match font.get_font_encoding(&Document::new()) {
        Ok(encoding) => encoding,
        Err(_) => return ascii_only(text),
    };

    let mut buf = [0u8; 4];
    text.chars()
        .map(|c| {
            let encoded = Document::encode_text(&encoding, c.encode_utf8(&mut buf));
            match encoded.as_slice() {
                [byte] => *byte,
                _ => REPLACEMENT,
            }
        })
        .collect()
}

fn ascii_only(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { REPLACEMENT })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_passes_through() {
        assert_eq!(encode_win_ansi("Spec Section 054000"), b"Spec Section 054000");
    }

    #[test]
    fn typographic_marks_use_single_bytes() {
        assert_eq!(encode_win_ansi("\u{2022}"), [0x95]);
        assert_eq!(encode_win_ansi("architect\u{2019}s"), b"architect\x92s");
        assert_eq!(encode_win_ansi("\u{201C}A\u{201D}"), [0x93, b'A', 0x94]);
        assert_eq!(encode_win_ansi("caf\u{e9}"), b"caf\xe9");
    }

    #[test]
    fn unmapped_characters_become_question_marks() {
        assert_eq!(encode_win_ansi("\u{6F22}A"), b"?A");
        assert_eq!(encode_win_ansi("\u{1F600}"), b"?");
    }
}
