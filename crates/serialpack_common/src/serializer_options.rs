use std::{fmt, sync::Arc};

use serde::{Deserialize, Serialize};

use crate::Module;

pub type ModuleFilter = Arc<dyn Fn(&Module) -> bool + Send + Sync>;

/// How the output should be shaped. Anything but `"static"` means a single bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
  Default,
  Static,
}

impl OutputMode {
  pub fn from_token(token: Option<&str>) -> Self {
    match token {
      Some("static") => Self::Static,
      _ => Self::Default,
    }
  }
}

/// Output directives, either passed explicitly by one-shot export tooling or decoded from
/// the `serializer.*` query parameters of a request url.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDirectives {
  pub output: Option<String>,
  pub include_source_maps: Option<bool>,
  pub include_bytecode: Option<bool>,
}

impl OutputDirectives {
  pub fn output_mode(&self) -> OutputMode {
    OutputMode::from_token(self.output.as_deref())
  }

  pub fn include_source_maps(&self) -> bool {
    self.include_source_maps.unwrap_or(false)
  }

  pub fn include_bytecode(&self) -> bool {
    self.include_bytecode.unwrap_or(false)
  }

  /// Shallow merge. Fields set on `resolved` win over the ones already present.
  pub fn merge(&mut self, resolved: Self) {
    let Self { output, include_source_maps, include_bytecode } = resolved;
    if output.is_some() {
      self.output = output;
    }
    if include_source_maps.is_some() {
      self.include_source_maps = include_source_maps;
    }
    if include_bytecode.is_some() {
      self.include_bytecode = include_bytecode;
    }
  }
}

#[derive(Clone, Default)]
pub struct SerializerOptions {
  /// The url the bundle was requested with. May be in the JSC-safe form.
  pub source_url: Option<String>,
  /// Emitted as a trailing `//# sourceMappingURL=` comment.
  pub source_map_url: Option<String>,
  pub inline_source_map: bool,
  /// Emit a `__r()` call for the entry point at the end of the bundle.
  pub run_module: bool,
  /// Rendering time debug id field. Cleared when rendering for the debug id hash.
  pub debug_id: Option<String>,
  pub process_module_filter: Option<ModuleFilter>,
  pub should_add_to_ignore_list: Option<ModuleFilter>,
  pub serializer_options: Option<OutputDirectives>,
}

impl SerializerOptions {
  pub fn should_process_module(&self, module: &Module) -> bool {
    self.process_module_filter.as_ref().map_or(true, |filter| filter(module))
  }

  pub fn is_ignore_listed(&self, module: &Module) -> bool {
    self.should_add_to_ignore_list.as_ref().is_some_and(|filter| filter(module))
  }
}

impl fmt::Debug for SerializerOptions {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("SerializerOptions")
      .field("source_url", &self.source_url)
      .field("source_map_url", &self.source_map_url)
      .field("inline_source_map", &self.inline_source_map)
      .field("run_module", &self.run_module)
      .field("debug_id", &self.debug_id)
      .field("process_module_filter", &self.process_module_filter.is_some())
      .field("should_add_to_ignore_list", &self.should_add_to_ignore_list.is_some())
      .field("serializer_options", &self.serializer_options)
      .finish()
  }
}

#[test]
fn test_output_mode_token() {
  assert_eq!(OutputMode::from_token(Some("static")), OutputMode::Static);
  assert_eq!(OutputMode::from_token(Some("Static")), OutputMode::Default);
  assert_eq!(OutputMode::from_token(None), OutputMode::Default);
}

#[test]
fn test_merge_prefers_resolved_fields() {
  let mut existing = OutputDirectives {
    output: Some("static".to_string()),
    include_source_maps: Some(false),
    include_bytecode: Some(true),
  };
  existing.merge(OutputDirectives { include_source_maps: Some(true), ..Default::default() });
  assert_eq!(
    existing,
    OutputDirectives {
      output: Some("static".to_string()),
      include_source_maps: Some(true),
      include_bytecode: Some(true),
    }
  );
}
