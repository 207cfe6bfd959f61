use std::fmt::Write as _;

use xxhash_rust::xxh3::xxh3_128;

use crate::base64::to_url_safe_base64;

pub fn xxhash_base64_url(input: &[u8]) -> String {
  let hash = xxh3_128(input).to_le_bytes();
  to_url_safe_base64(hash)
}

/// Hashes `input` and lays the 128 bits out as a lowercase, dashed UUID
/// (`xxxxxxxx-xxxx-4xxx-Nxxx-xxxxxxxxxxxx`).
///
/// The version nibble is forced to `4` and the variant bits to RFC 4122 so that
/// tools validating the shape of a debug id accept it.
pub fn xxhash_uuid(input: &[u8]) -> String {
  let mut bytes = xxh3_128(input).to_le_bytes();
  bytes[6] = (bytes[6] & 0x0f) | 0x40;
  bytes[8] = (bytes[8] & 0x3f) | 0x80;

  let mut uuid = String::with_capacity(36);
  for (idx, byte) in bytes.iter().enumerate() {
    if matches!(idx, 4 | 6 | 8 | 10) {
      uuid.push('-');
    }
    let _ = write!(uuid, "{byte:02x}");
  }
  uuid
}

#[test]
fn test_xxhash_uuid() {
  let id = xxhash_uuid(b"console.log(1)");
  assert_eq!(id.len(), 36);
  let groups = id.split('-').map(str::len).collect::<Vec<_>>();
  assert_eq!(groups, [8, 4, 4, 4, 12]);
  assert!(id.chars().all(|c| c == '-' || (c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));
  assert_eq!(&id[14..15], "4");
  assert!(matches!(&id[19..20], "8" | "9" | "a" | "b"));

  assert_eq!(id, xxhash_uuid(b"console.log(1)"));
  assert_ne!(id, xxhash_uuid(b"console.log(2)"));
}

#[test]
fn test_xxhash_base64_url() {
  let hash = xxhash_base64_url(b"hello");
  assert_eq!(hash.len(), 22);
  assert!(hash.chars().all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_')));
  assert_eq!(hash, xxhash_base64_url(b"hello"));
}
