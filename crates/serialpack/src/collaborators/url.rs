/// Detects and undoes the "safe" url encoding some clients apply to bundle urls.
pub trait UrlNormalizer: Send + Sync {
  fn is_safe_encoded(&self, url: &str) -> bool;

  fn to_normal_url(&self, url: &str) -> String;
}

/// JavaScriptCore strips query strings from source urls in stack traces, so clients encode
/// the `?` of a bundle url as `//&`, e.g. `http://localhost:8081/index.bundle//&platform=ios`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JscSafeUrl;

impl JscSafeUrl {
  fn marker_index(url: &str) -> Option<usize> {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    url[..path_end].find("//&")
  }
}

impl UrlNormalizer for JscSafeUrl {
  fn is_safe_encoded(&self, url: &str) -> bool {
    Self::marker_index(url).is_some()
  }

  fn to_normal_url(&self, url: &str) -> String {
    match Self::marker_index(url) {
      Some(index) => {
        let mut normal = String::with_capacity(url.len() - 2);
        normal.push_str(&url[..index]);
        normal.push('?');
        normal.push_str(&url[index + 3..]);
        normal
      }
      None => url.to_string(),
    }
  }
}

#[test]
fn test_jsc_safe_url() {
  let safe = "http://localhost:8081/index.bundle//&platform=ios&serializer.output=static";
  assert!(JscSafeUrl.is_safe_encoded(safe));
  assert_eq!(
    JscSafeUrl.to_normal_url(safe),
    "http://localhost:8081/index.bundle?platform=ios&serializer.output=static"
  );

  let normal = "http://localhost:8081/index.bundle?platform=ios&path=//&x";
  assert!(!JscSafeUrl.is_safe_encoded(normal));
  assert_eq!(JscSafeUrl.to_normal_url(normal), normal);
}
