//! Text ↔ hexadecimal byte dumps.

/// Each character's code as lowercase hex, at least two digits, separated by
/// single spaces.
pub fn ascii_to_hex(text: &str) -> String {
    text.chars()
        .map(|c| format!("{:02x}", c as u32))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode pairs of hex digits into characters. Anything that is not a hex
/// digit is skipped first; an odd number of digits decodes to nothing.
pub fn hex_to_ascii(hex: &str) -> String {
    let digits: Vec<u8> = hex
        .chars()
        .filter_map(|c| c.to_digit(16))
        .map(|d| d as u8)
        .collect();
    if digits.len() % 2 != 0 {
        return String::new();
    }
    digits
        .chunks_exact(2)
        .map(|pair| char::from(pair[0] << 4 | pair[1]))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello() {
        assert_eq!(ascii_to_hex("Hello"), "48 65 6c 6c 6f");
        assert_eq!(hex_to_ascii("48 65 6c 6c 6f"), "Hello");
    }

    #[test]
    fn test_small_codes_are_padded() {
        assert_eq!(ascii_to_hex("\t\n"), "09 0a");
    }

    #[test]
    fn test_non_ascii_code_points() {
        assert_eq!(ascii_to_hex("é"), "e9");
        assert_eq!(ascii_to_hex("€"), "20ac");
    }

    #[test]
    fn test_hex_input_noise_is_ignored() {
        // the x of a 0x prefix is dropped but its 0 is kept
        assert_eq!(hex_to_ascii("0x41"), "");
        assert_eq!(hex_to_ascii("0x410"), "\u{4}\u{10}");
        assert_eq!(hex_to_ascii("41:42"), "AB");
        assert_eq!(hex_to_ascii("4"), "");
        assert_eq!(hex_to_ascii(""), "");
    }
}
