use serde::de::Error as _;
use serialpack_common::{Graph, SerializerOptions};
use serialpack_error::{SerializeError, SerializeResult};
use serialpack_utils::xxhash::xxhash_uuid;

/// Debug ids correlate a bundle with its map. Hot passes skip them, and so do inline maps
/// since code and map can't get separated there.
pub fn is_debug_id_enabled(graph: &Graph, options: &SerializerOptions) -> bool {
  !graph.transform_options.hot && !options.inline_source_map
}

pub fn compute_debug_id(code: &str) -> String {
  xxhash_uuid(code.as_bytes())
}

/// Sets the top level `debugId` field of a JSON source map.
pub fn embed_debug_id(map: &str, debug_id: &str) -> SerializeResult<String> {
  let mut map: serde_json::Value = serde_json::from_str(map).map_err(SerializeError::MapStructure)?;
  let Some(fields) = map.as_object_mut() else {
    return Err(SerializeError::MapStructure(serde_json::Error::custom("source map is not a JSON object")));
  };
  fields.insert("debugId".to_string(), debug_id.into());
  serde_json::to_string(&map).map_err(SerializeError::Encode)
}

/// Debug id of a single serialization pass. Rendering for the hash happens at most once,
/// on first use, and nothing outlives the pass.
#[derive(Debug)]
pub struct LazyDebugId {
  enabled: bool,
  value: Option<String>,
}

impl LazyDebugId {
  pub fn new(enabled: bool) -> Self {
    Self { enabled, value: None }
  }

  /// `render` must produce the code the id is derived from, with the debug id field cleared.
  pub fn get(&mut self, render: impl FnOnce() -> SerializeResult<String>) -> SerializeResult<Option<String>> {
    if !self.enabled {
      return Ok(None);
    }
    if let Some(value) = &self.value {
      return Ok(Some(value.clone()));
    }

    let value = compute_debug_id(&render()?);
    tracing::debug!("Computed debug id {value}");
    self.value = Some(value.clone());
    Ok(Some(value))
  }
}

#[cfg(test)]
mod tests {
  use std::cell::Cell;

  use pretty_assertions::assert_eq;
  use serialpack_common::TransformOptions;

  use super::*;

  #[test]
  fn computed_once_per_pass() {
    let renders = Cell::new(0);
    let render = || {
      renders.set(renders.get() + 1);
      Ok("console.log(1)".to_string())
    };

    let mut debug_id = LazyDebugId::new(true);
    let first = debug_id.get(render).unwrap();
    let second = debug_id.get(render).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, Some(compute_debug_id("console.log(1)")));
    assert_eq!(renders.get(), 1);
  }

  #[test]
  fn disabled_never_renders() {
    let mut debug_id = LazyDebugId::new(false);
    let ret = debug_id.get(|| panic!("should not render")).unwrap();
    assert_eq!(ret, None);
  }

  #[test]
  fn enabled_only_for_production_external_maps() {
    let production = Graph::default();
    let hot = Graph { transform_options: TransformOptions { hot: true, ..Default::default() }, ..Default::default() };
    let inline = SerializerOptions { inline_source_map: true, ..Default::default() };

    assert!(is_debug_id_enabled(&production, &SerializerOptions::default()));
    assert!(!is_debug_id_enabled(&hot, &SerializerOptions::default()));
    assert!(!is_debug_id_enabled(&production, &inline));
  }

  #[test]
  fn embeds_into_map() {
    let map = embed_debug_id(r#"{"version":3,"sources":[],"mappings":""}"#, "abc").unwrap();
    let map: serde_json::Value = serde_json::from_str(&map).unwrap();
    assert_eq!(map["debugId"], "abc");
    assert_eq!(map["version"], 3);
  }

  #[test]
  fn malformed_map_is_a_hard_error() {
    assert!(matches!(embed_debug_id("not json", "abc"), Err(SerializeError::MapStructure(_))));
    assert!(matches!(embed_debug_id("[]", "abc"), Err(SerializeError::MapStructure(_))));
  }
}
