//! Rendering of binary wallet columns for display

/// Label used when a name has no printable content.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Lowercase hex encoding.
pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Best-effort text rendering.
///
/// Valid UTF-8 whose only control characters are whitespace is returned as
/// text; anything else becomes a `[binary N bytes]` placeholder.
pub fn best_effort_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if !text.chars().any(|c| c.is_control() && !c.is_whitespace()) => {
            text.to_owned()
        }
        _ => binary_placeholder(bytes.len()),
    }
}

pub fn binary_placeholder(len: usize) -> String {
    format!("[binary {} bytes]", len)
}

/// Printable label extracted from a binary name.
///
/// Decodes lossily, keeps printable ASCII only, trims, and falls back to
/// [`UNKNOWN_LABEL`] when nothing remains.
pub fn printable_label(bytes: &[u8]) -> String {
    let decoded = String::from_utf8_lossy(bytes);
    let printable: String = decoded
        .chars()
        .filter(|c| matches!(c, ' '..='~'))
        .collect();

    let trimmed = printable.trim();
    if trimmed.is_empty() {
        UNKNOWN_LABEL.to_owned()
    } else {
        trimmed.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_is_lowercase() {
        assert_eq!(to_hex(&[0xde, 0xad, 0x01]), "dead01");
        assert_eq!(to_hex(&[]), "");
    }

    #[test]
    fn text_passes_through() {
        assert_eq!(best_effort_text(b"degree"), "degree");
        assert_eq!(best_effort_text(b"line one\nline two"), "line one\nline two");
    }

    #[test]
    fn binary_gets_placeholder() {
        assert_eq!(best_effort_text(&[0xff, 0xfe, 0x00]), "[binary 3 bytes]");
        assert_eq!(best_effort_text(&[0x00, 0x41]), "[binary 2 bytes]");
    }

    #[test]
    fn label_strips_non_printable() {
        assert_eq!(printable_label(b"\x01\x02cred_def\x7f"), "cred_def");
        assert_eq!(printable_label(&[0xff, b'A', b'B']), "AB");
    }

    #[test]
    fn label_falls_back_to_unknown() {
        assert_eq!(printable_label(&[0x00, 0x01, 0x1f]), UNKNOWN_LABEL);
        assert_eq!(printable_label(&[0xff, 0xfe]), UNKNOWN_LABEL);
        assert_eq!(printable_label(b"   "), UNKNOWN_LABEL);
        assert_eq!(printable_label(&[]), UNKNOWN_LABEL);
    }
}
