use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
  Js,
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialAssetMetadata {
  pub is_async: bool,
  /// Filenames of the chunks that have to be loaded before this one.
  #[serde(default)]
  pub requires: Vec<String>,
  /// Filenames of the chunks this one may load with `import()`.
  #[serde(default)]
  pub lazy_imports: Vec<String>,
}

/// One independently servable output file of a static pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SerialAsset {
  pub filename: String,
  /// Path of the module the chunk was created for.
  pub original_filename: String,
  #[serde(rename = "type")]
  pub kind: AssetKind,
  pub metadata: SerialAssetMetadata,
  pub code: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub map: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none", with = "base64_bytes")]
  pub bytecode: Option<Vec<u8>>,
}

mod base64_bytes {
  use serde::{de::Error, Deserialize, Deserializer, Serializer};
  use serialpack_utils::base64::{from_standard_base64, to_standard_base64};

  #[allow(clippy::ref_option)] // signature required by `#[serde(with)]`
  pub fn serialize<S: Serializer>(bytes: &Option<Vec<u8>>, serializer: S) -> Result<S::Ok, S::Error> {
    match bytes {
      Some(bytes) => serializer.serialize_str(&to_standard_base64(bytes)),
      None => serializer.serialize_none(),
    }
  }

  pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Vec<u8>>, D::Error> {
    Option::<String>::deserialize(deserializer)?
      .map(|encoded| from_standard_base64(&encoded).ok_or_else(|| D::Error::custom("invalid base64 bytecode")))
      .transpose()
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn json_layout() {
    let asset = SerialAsset {
      filename: "static/js/index-abc.js".to_string(),
      original_filename: "index.js".to_string(),
      kind: AssetKind::Js,
      metadata: SerialAssetMetadata::default(),
      code: "console.log(1)".to_string(),
      map: None,
      bytecode: Some(vec![0xc6, 0x1f]),
    };

    let json = serde_json::to_value(&asset).unwrap();
    assert_eq!(
      json,
      serde_json::json!({
        "filename": "static/js/index-abc.js",
        "originalFilename": "index.js",
        "type": "js",
        "metadata": { "isAsync": false, "requires": [], "lazyImports": [] },
        "code": "console.log(1)",
        "bytecode": "xh8=",
      })
    );

    let back: SerialAsset = serde_json::from_value(json).unwrap();
    assert_eq!(back, asset);
  }
}
