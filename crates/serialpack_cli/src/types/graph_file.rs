use std::{fs, path::Path};

use anyhow::Context;
use serde::Deserialize;
use serialpack::{Graph, Module, TransformOptions};

/// On-disk form of a resolved graph.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphFile {
  pub entry_point: String,
  #[serde(default)]
  pub pre_modules: Vec<Module>,
  pub modules: Vec<Module>,
  #[serde(default)]
  pub transform_options: TransformOptions,
}

impl GraphFile {
  pub fn read(path: &Path) -> anyhow::Result<Self> {
    let content =
      fs::read_to_string(path).with_context(|| format!("Failed to read `{}`", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid graph file `{}`", path.display()))
  }

  pub fn into_parts(self) -> (String, Vec<Module>, Graph) {
    let graph = Graph::new(self.modules, self.transform_options);
    (self.entry_point, self.pre_modules, graph)
  }
}
