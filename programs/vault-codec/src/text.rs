//! Fixed-Length Text Codec
//!
//! Labels are stored as null-padded UTF-8 in a fixed number of bytes.
//!
//! ```text
//! "MoonDog" in 12 bytes:
//! [4D 6F 6F 6E 44 6F 67 00 00 00 00 00]
//!  M  o  o  n  D  o  g  └── zero padding ──┘
//! ```

use crate::error::CodecError;

/// Width of the label fields used by the vault program.
pub const LABEL_LEN: usize = 32;

/// UTF-8 encode `text` into exactly `len` bytes.
///
/// Longer text is cut to its first `len` bytes; shorter text is padded with
/// zeros. The cut is byte-based, so a multi-byte character that straddles
/// the boundary is split and the stored bytes are no longer valid UTF-8.
/// That matches what the program itself stores.
///
/// ```
/// use vault_codec::text::encode_fixed;
///
/// assert_eq!(encode_fixed("abc", 5), vec![b'a', b'b', b'c', 0, 0]);
/// assert_eq!(encode_fixed("abcdef", 4), b"abcd".to_vec());
/// ```
pub fn encode_fixed(text: &str, len: usize) -> Vec<u8> {
    let mut bytes = text.as_bytes().to_vec();
    bytes.resize(len, 0);
    bytes
}

/// Same as [`encode_fixed`] for a compile-time width.
pub fn encode_fixed_array<const N: usize>(text: &str) -> [u8; N] {
    let mut out = [0u8; N];
    let src = text.as_bytes();
    let n = src.len().min(N);
    out[..n].copy_from_slice(&src[..n]);
    out
}

/// Strip trailing zero bytes, then decode the rest as UTF-8.
///
/// Only the trailing run is removed; a zero byte in the middle of the text
/// stays where it is.
///
/// # Errors
///
/// `InvalidText` when the trimmed bytes are not valid UTF-8 (for example a
/// label that was truncated inside a multi-byte character).
pub fn decode_fixed(bytes: &[u8]) -> Result<String, CodecError> {
    let end = bytes
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |last| last + 1);
    String::from_utf8(bytes[..end].to_vec()).map_err(|_| CodecError::InvalidText { len: end })
}
