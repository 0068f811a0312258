//! Field decoding: raw WMI property values -> canonical column text.
//!
//! `WmiMonitorID` stores its identification strings as fixed-width `uint16`
//! arrays of character codes, padded with zeros.  Decoding is a direct
//! code-to-`char` mapping that keeps the padding; use [`trim_padding`] when a
//! display string is wanted.

/// Text used for a `true` boolean column.
pub const TRUE_TOKEN: &str = "true";

/// Text used for a `false` boolean column.
pub const FALSE_TOKEN: &str = "false";

/// Declared encoding of one WMI property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Array of character codes (`uint16[]` in the MOF).
    CharCodes,
    /// Plain string (`BSTR`).
    Text,
    /// Boolean.
    Bool,
    /// Bounded signed integer read as a `long`.
    Long,
    /// Unsigned byte, widened before formatting.
    UChar,
}

/// Map each character code to one `char`, preserving order and length.
///
/// Zero codes become `'\0'` and do not terminate the string.  Codes outside
/// 0-255 keep only their low byte.
pub fn decode_char_codes(codes: &[i32]) -> String {
    codes.iter().map(|&code| char::from(code as u8)).collect()
}

/// Canonical text for a boolean column.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        TRUE_TOKEN
    } else {
        FALSE_TOKEN
    }
}

/// Base-10 text, no leading zeros, no grouping.
pub fn format_integer(value: impl Into<i64>) -> String {
    value.into().to_string()
}

/// Strip trailing NUL padding left by [`decode_char_codes`].
pub fn trim_padding(value: &str) -> &str {
    value.trim_end_matches('\0')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_codes_keep_padding() {
        let decoded = decode_char_codes(&[72, 101, 0, 0]);
        assert_eq!(decoded, "He\0\0");
        assert_eq!(decoded.chars().count(), 4);
        assert_ne!(decoded, "He");
    }

    #[test]
    fn test_char_codes_do_not_stop_at_zero() {
        assert_eq!(decode_char_codes(&[65, 0, 66]), "A\0B");
    }

    #[test]
    fn test_char_codes_empty() {
        assert_eq!(decode_char_codes(&[]), "");
    }

    #[test]
    fn test_char_codes_out_of_range_truncate() {
        // 0x141 -> 0x41 ('A'); negative codes wrap the same way.
        assert_eq!(decode_char_codes(&[0x141]), "A");
        assert_eq!(decode_char_codes(&[-1]), "\u{ff}");
    }

    #[test]
    fn test_char_codes_high_byte_is_latin1() {
        assert_eq!(decode_char_codes(&[0xE9]), "\u{e9}");
    }

    #[test]
    fn test_format_bool_tokens_distinct() {
        assert_eq!(format_bool(true), "true");
        assert_eq!(format_bool(false), "false");
        assert_ne!(format_bool(true), format_bool(false));
    }

    #[test]
    fn test_format_integer() {
        assert_eq!(format_integer(2016), "2016");
        assert_eq!(format_integer(7u8), "7");
        assert_eq!(format_integer(0), "0");
        assert_eq!(format_integer(-3), "-3");
        assert_eq!(format_integer(123456), "123456");
    }

    #[test]
    fn test_trim_padding() {
        assert_eq!(trim_padding("He\0\0"), "He");
        assert_eq!(trim_padding("\0A\0"), "\0A");
        assert_eq!(trim_padding(""), "");
    }
}
