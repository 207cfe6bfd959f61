use crate::SerialAsset;

/// What a serialization pass produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SerializerOutput {
  /// Bundle code without a source map.
  Code(String),
  CodeWithMap { code: String, map: String },
  /// Static assets for callers able to consume them directly.
  Assets(Vec<SerialAsset>),
  /// JSON text of the static assets, for callers that can only send text.
  AssetsJson(String),
}

impl SerializerOutput {
  pub fn code(&self) -> Option<&str> {
    match self {
      Self::Code(code) | Self::CodeWithMap { code, .. } => Some(code),
      Self::Assets(_) | Self::AssetsJson(_) => None,
    }
  }

  pub fn map(&self) -> Option<&str> {
    match self {
      Self::CodeWithMap { map, .. } => Some(map),
      _ => None,
    }
  }

  pub fn is_static(&self) -> bool {
    matches!(self, Self::Assets(_) | Self::AssetsJson(_))
  }
}
