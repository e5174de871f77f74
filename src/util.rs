//! Text decoding helpers.

use std::borrow::Cow;

/// Decode bytes to a string, handling various encodings.
///
/// 1. UTF-8 (a BOM is handled by encoding_rs)
/// 2. The hint encoding, usually from a `<meta charset>` declaration
/// 3. Windows-1252, the common legacy fallback
///
/// Uses `Cow<str>` to avoid allocating when the input is valid UTF-8.
pub fn decode_text<'a>(bytes: &'a [u8], hint_encoding: Option<&str>) -> Cow<'a, str> {
    let (result, _encoding, malformed) = encoding_rs::UTF_8.decode(bytes);

    if !malformed {
        return result;
    }

    if let Some(name) = hint_encoding
        && let Some(encoding) = encoding_rs::Encoding::for_label(name.as_bytes())
    {
        let (result, _, _) = encoding.decode(bytes);
        return result;
    }

    let (result, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
    result
}

/// Extract the charset label from `<meta charset="...">` or
/// `<meta http-equiv="Content-Type" content="...; charset=...">`.
///
/// Only the first 1024 bytes are examined, as browsers do.
pub fn sniff_meta_charset(bytes: &[u8]) -> Option<&str> {
    let prefix = &bytes[..bytes.len().min(1024)];

    let pos = prefix
        .windows(8)
        .position(|w| w.eq_ignore_ascii_case(b"charset="))?;
    let after = &prefix[pos + 8..];

    let (start, quote) = match after.first()? {
        q @ (b'"' | b'\'') => (1, Some(*q)),
        _ => (0, None),
    };
    let rest = &after[start..];
    let len = rest
        .iter()
        .position(|&b| match quote {
            Some(q) => b == q,
            None => matches!(b, b'"' | b'\'' | b';' | b'>' | b'/') || b.is_ascii_whitespace(),
        })
        .unwrap_or(rest.len());

    std::str::from_utf8(&rest[..len])
        .ok()
        .filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_utf8() {
        assert_eq!(decode_text("مرحبا".as_bytes(), None), "مرحبا");
    }

    #[test]
    fn test_decode_falls_back_to_hint() {
        // "café" in ISO-8859-1
        let bytes = b"caf\xe9";
        assert_eq!(decode_text(bytes, Some("iso-8859-1")), "café");
    }

    #[test]
    fn test_decode_defaults_to_windows_1252() {
        let bytes = b"\x93quoted\x94";
        assert_eq!(decode_text(bytes, None), "\u{201c}quoted\u{201d}");
    }

    #[test]
    fn test_sniff_meta_charset() {
        assert_eq!(
            sniff_meta_charset(br#"<head><meta charset="windows-1256"></head>"#),
            Some("windows-1256")
        );
        assert_eq!(
            sniff_meta_charset(
                br#"<meta http-equiv="Content-Type" content="text/html; charset=iso-8859-6">"#
            ),
            Some("iso-8859-6")
        );
        assert_eq!(sniff_meta_charset(b"<p>no charset</p>"), None);
    }
}
