use serde::Deserialize;
use serialpack_common::FilenameTemplate;

#[derive(Debug, Default, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct SerializerConfigOptions {
  /// Directory static chunks are emitted under.
  pub static_dir: Option<String>,
  pub chunk_filenames: Option<String>,
}

#[derive(Debug)]
pub struct NormalizedSerializerConfig {
  pub static_dir: String,
  pub chunk_filenames: FilenameTemplate,
}

pub fn normalize_options(raw_options: SerializerConfigOptions) -> NormalizedSerializerConfig {
  let static_dir = raw_options.static_dir.unwrap_or_else(|| "static/js".to_string());

  NormalizedSerializerConfig {
    static_dir: static_dir.trim_end_matches('/').to_string(),
    chunk_filenames: raw_options
      .chunk_filenames
      .unwrap_or_else(|| "[name]-[hash].js".to_string())
      .into(),
  }
}

#[test]
fn test_normalize_options() {
  let normalized = normalize_options(SerializerConfigOptions::default());
  assert_eq!(normalized.static_dir, "static/js");
  assert_eq!(normalized.chunk_filenames.template(), "[name]-[hash].js");

  let raw: SerializerConfigOptions =
    serde_json::from_str(r#"{ "staticDir": "_expo/static/js/", "chunkFilenames": "[name].js" }"#).unwrap();
  let normalized = normalize_options(raw);
  assert_eq!(normalized.static_dir, "_expo/static/js");
  assert_eq!(normalized.chunk_filenames.template(), "[name].js");

  assert!(serde_json::from_str::<SerializerConfigOptions>(r#"{ "dir": "x" }"#).is_err());
}
