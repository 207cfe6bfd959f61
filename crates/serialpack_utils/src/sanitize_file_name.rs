use std::borrow::Cow;

/// Replaces every char that is not safe inside an emitted file name with `_`.
pub fn sanitize_file_name(name: &str) -> Cow<'_, str> {
  let is_safe = |char: char| char.is_ascii_alphanumeric() || matches!(char, '-' | '_' | '.');
  if name.chars().all(is_safe) {
    return Cow::Borrowed(name);
  }
  Cow::Owned(name.chars().map(|char| if is_safe(char) { char } else { '_' }).collect())
}

#[test]
fn test_sanitize_file_name() {
  assert_eq!(sanitize_file_name("\0+a=Z_0-"), "__a_Z_0-");
  assert_eq!(sanitize_file_name("vendor.min"), "vendor.min");
  assert!(matches!(sanitize_file_name("index"), Cow::Borrowed(_)));
}
