use base64_simd::{STANDARD, URL_SAFE_NO_PAD};

pub fn to_url_safe_base64(input: impl AsRef<[u8]>) -> String {
  URL_SAFE_NO_PAD.encode_to_string(input)
}

pub fn to_standard_base64(input: impl AsRef<[u8]>) -> String {
  STANDARD.encode_to_string(input)
}

pub fn from_standard_base64(input: &str) -> Option<Vec<u8>> {
  STANDARD.decode_to_vec(input).ok()
}

/// `data:` url for a JSON source map, suitable for a `//# sourceMappingURL=` comment.
pub fn to_source_map_data_url(map_json: &str) -> String {
  let mut url = String::from("data:application/json;charset=utf-8;base64,");
  url.push_str(&to_standard_base64(map_json));
  url
}

#[test]
fn test_base64() {
  assert_eq!(to_standard_base64("{}"), "e30=");
  assert_eq!(from_standard_base64("e30=").as_deref(), Some(b"{}".as_slice()));
  assert_eq!(to_url_safe_base64([0xfb, 0xff]), "-_8");
  assert_eq!(to_source_map_data_url("{}"), "data:application/json;charset=utf-8;base64,e30=");
}
