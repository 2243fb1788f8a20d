//! Token canonicalization
//!
//! Raw capture tokens are 1-2 hex digits in either case. The canonical
//! form is exactly two uppercase hex digits, one token per byte.

/// Canonicalize a raw token: left-pad to two digits and uppercase.
///
/// Returns `None` when the token cannot represent a single byte (empty,
/// longer than two characters, or containing non-hex characters).
pub fn canonical_token(raw: &str) -> Option<String> {
    if raw.is_empty() || raw.len() > 2 {
        return None;
    }
    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let mut token = String::with_capacity(2);
    if raw.len() == 1 {
        token.push('0');
    }
    token.push_str(&raw.to_ascii_uppercase());
    Some(token)
}

/// Parse a canonical token into its byte value.
pub fn token_byte(token: &str) -> Option<u8> {
    if token.len() != 2 {
        return None;
    }
    u8::from_str_radix(token, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_and_uppercase() {
        assert_eq!(canonical_token("5").as_deref(), Some("05"));
        assert_eq!(canonical_token("ff").as_deref(), Some("FF"));
        assert_eq!(canonical_token("0b").as_deref(), Some("0B"));
        assert_eq!(canonical_token("00").as_deref(), Some("00"));
    }

    #[test]
    fn test_rejects_invalid_tokens() {
        assert_eq!(canonical_token(""), None);
        assert_eq!(canonical_token("ZZ"), None);
        assert_eq!(canonical_token("1G"), None);
        assert_eq!(canonical_token("123"), None);
        assert_eq!(canonical_token("0x"), None);
    }

    #[test]
    fn test_token_byte() {
        assert_eq!(token_byte("FF"), Some(0xFF));
        assert_eq!(token_byte("00"), Some(0x00));
        assert_eq!(token_byte("0B"), Some(0x0B));
        assert_eq!(token_byte("F"), None);
        assert_eq!(token_byte("ZZ"), None);
    }
}
