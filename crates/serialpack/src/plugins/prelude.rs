use serialpack_common::{Module, SerializerInput};
use serialpack_utils::concat_string;

use crate::SerializerPlugin;

pub const PRELUDE_MODULE_ID: &str = "__prelude__";

/// Prepends the `__prelude__` module which defines `__DEV__` and `process.env.NODE_ENV`
/// before any other code runs. Inputs already carrying a prelude are left alone.
pub struct PreludePlugin;

impl SerializerPlugin for PreludePlugin {
  fn transform(&self, mut input: SerializerInput) -> anyhow::Result<SerializerInput> {
    if input.pre_modules.iter().any(|module| &*module.path == PRELUDE_MODULE_ID) {
      return Ok(input);
    }

    let (dev, node_env) =
      if input.graph.transform_options.dev { ("true", "development") } else { ("false", "production") };
    let code = concat_string!(
      "var __DEV__=",
      dev,
      ",process=globalThis.process||{};process.env=process.env||{};process.env.NODE_ENV=process.env.NODE_ENV||\"",
      node_env,
      "\";"
    );
    input.pre_modules.insert(0, Module::new(PRELUDE_MODULE_ID, code));
    Ok(input)
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serialpack_common::{Graph, SerializerOptions, TransformOptions};

  use super::*;

  #[test]
  fn prepends_once() {
    let graph = Graph { transform_options: TransformOptions { dev: true, ..Default::default() }, ..Default::default() };
    let input = SerializerInput::new("index.js", vec![Module::new("polyfill.js", "")], graph, SerializerOptions::default());

    let input = PreludePlugin.transform(input).unwrap();
    let input = PreludePlugin.transform(input).unwrap();

    let paths = input.pre_modules.iter().map(|module| module.path.to_string()).collect::<Vec<_>>();
    assert_eq!(paths, ["__prelude__", "polyfill.js"]);
    assert!(input.pre_modules[0].code.starts_with("var __DEV__=true,"));
    assert!(input.pre_modules[0].code.ends_with("||\"development\";"));
  }
}
