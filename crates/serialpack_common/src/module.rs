use serde::Deserialize;

use crate::ModuleId;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
  #[default]
  Sync,
  /// `import()`. Starts a new chunk in static output.
  Async,
}

impl DependencyKind {
  pub fn is_async(self) -> bool {
    matches!(self, Self::Async)
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Dependency {
  pub path: ModuleId,
  #[serde(default)]
  pub kind: DependencyKind,
}

impl Dependency {
  pub fn sync(path: impl Into<ModuleId>) -> Self {
    Self { path: path.into(), kind: DependencyKind::Sync }
  }

  pub fn lazy(path: impl Into<ModuleId>) -> Self {
    Self { path: path.into(), kind: DependencyKind::Async }
  }
}

/// A compiled unit of the graph. `code` is the already transformed output;
/// serialization only concatenates it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Module {
  pub path: ModuleId,
  pub code: String,
  /// Original source text, emitted as `sourcesContent`. Falls back to `code`.
  #[serde(default)]
  pub source: Option<String>,
  /// Source map of `code` back to `source`, as JSON.
  #[serde(default)]
  pub map: Option<String>,
  #[serde(default)]
  pub dependencies: Vec<Dependency>,
}

impl Module {
  pub fn new(path: impl Into<ModuleId>, code: impl Into<String>) -> Self {
    Self { path: path.into(), code: code.into(), source: None, map: None, dependencies: vec![] }
  }

  pub fn with_dependencies(mut self, dependencies: impl IntoIterator<Item = Dependency>) -> Self {
    self.dependencies.extend(dependencies);
    self
  }

  pub fn source_content(&self) -> &str {
    self.source.as_deref().unwrap_or(&self.code)
  }

  pub fn sync_dependencies(&self) -> impl Iterator<Item = &ModuleId> {
    self.dependencies.iter().filter(|dep| !dep.kind.is_async()).map(|dep| &dep.path)
  }

  pub fn async_dependencies(&self) -> impl Iterator<Item = &ModuleId> {
    self.dependencies.iter().filter(|dep| dep.kind.is_async()).map(|dep| &dep.path)
  }
}
