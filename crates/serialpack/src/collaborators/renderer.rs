use std::sync::Arc;

use serialpack_common::{Module, ModuleId, SerializerOptions, SourceJoiner};
use serialpack_sourcemap::{SourceMapGenerator, SourceMapOptions};
use serialpack_utils::{base64::to_source_map_data_url, concat_string};

pub struct RenderContext<'a> {
  pub entry_point: &'a ModuleId,
  pub pre_modules: &'a [Module],
  /// Graph modules in output order.
  pub modules: &'a [&'a Module],
  pub options: &'a SerializerOptions,
}

impl<'a> RenderContext<'a> {
  /// Pre-modules followed by graph modules, before `process_module_filter` is applied.
  pub fn all_modules(&self) -> Vec<&'a Module> {
    self.pre_modules.iter().chain(self.modules.iter().copied()).collect()
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBundle {
  pub code: String,
  pub map: Option<String>,
}

/// Turns an ordered module list into bundle text.
pub trait BundleRenderer: Send + Sync {
  fn render(&self, ctx: &RenderContext<'_>) -> anyhow::Result<RenderedBundle>;
}

/// Joins module code with `\n` and appends the trailer comments:
/// the entry point require call, `//# debugId=` and `//# sourceMappingURL=`.
pub struct ConcatRenderer {
  source_map_generator: Arc<dyn SourceMapGenerator>,
}

impl ConcatRenderer {
  pub fn new(source_map_generator: Arc<dyn SourceMapGenerator>) -> Self {
    Self { source_map_generator }
  }
}

impl BundleRenderer for ConcatRenderer {
  fn render(&self, ctx: &RenderContext<'_>) -> anyhow::Result<RenderedBundle> {
    let options = ctx.options;
    let modules = ctx.all_modules();

    let mut joiner = SourceJoiner::default();
    for module in ctx.pre_modules.iter().filter(|module| options.should_process_module(module)) {
      joiner.prepend_source(module);
    }
    for module in ctx.modules.iter().copied().filter(|module| options.should_process_module(module)) {
      joiner.append_source(module);
    }

    if options.run_module && modules.iter().any(|module| module.path == *ctx.entry_point) {
      let entry = serde_json::Value::from(&**ctx.entry_point).to_string();
      joiner.append_source(concat_string!("__r(", entry, ");"));
    }

    if let Some(debug_id) = &options.debug_id {
      joiner.append_source(concat_string!("//# debugId=", debug_id));
    }

    if options.inline_source_map {
      let map = self.source_map_generator.generate(
        &modules,
        &SourceMapOptions {
          process_module_filter: &|module| options.should_process_module(module),
          should_add_to_ignore_list: &|module| options.is_ignore_listed(module),
        },
      )?;
      joiner.append_source(concat_string!("//# sourceMappingURL=", to_source_map_data_url(&map)));
    } else if let Some(source_map_url) = &options.source_map_url {
      joiner.append_source(concat_string!("//# sourceMappingURL=", source_map_url));
    }

    Ok(RenderedBundle { code: joiner.join(), map: None })
  }
}

#[cfg(test)]
mod tests {
  use std::sync::Arc;

  use pretty_assertions::assert_eq;
  use serialpack_sourcemap::ConcatSourceMapGenerator;

  use super::*;

  fn render(pre_modules: &[Module], modules: &[&Module], options: &SerializerOptions) -> String {
    let renderer = ConcatRenderer::new(Arc::new(ConcatSourceMapGenerator));
    let entry_point = ModuleId::from("index.js");
    let ctx = RenderContext { entry_point: &entry_point, pre_modules, modules, options };
    renderer.render(&ctx).unwrap().code
  }

  #[test]
  fn joins_pre_modules_first() {
    let index = Module::new("index.js", "console.log(1)");
    let code = render(&[Module::new("__prelude__", "var __DEV__ = false;")], &[&index], &SerializerOptions::default());
    assert_eq!(code, "var __DEV__ = false;\nconsole.log(1)");
  }

  #[test]
  fn appends_trailers() {
    let index = Module::new("index.js", "console.log(1)");
    let skipped = Module::new("skipped.js", "throw 1");
    let options = SerializerOptions {
      run_module: true,
      debug_id: Some("00000000-0000-4000-8000-000000000000".to_string()),
      source_map_url: Some("index.map".to_string()),
      process_module_filter: Some(Arc::new(|module: &Module| &*module.path != "skipped.js")),
      ..Default::default()
    };
    assert_eq!(
      render(&[], &[&skipped, &index], &options),
      "console.log(1)\n__r(\"index.js\");\n//# debugId=00000000-0000-4000-8000-000000000000\n//# sourceMappingURL=index.map"
    );
  }

  #[test]
  fn inline_source_map_wins_over_url() {
    let index = Module::new("index.js", "console.log(1)");
    let options = SerializerOptions {
      inline_source_map: true,
      source_map_url: Some("index.map".to_string()),
      ..Default::default()
    };
    let code = render(&[], &[&index], &options);
    assert!(code.starts_with("console.log(1)\n//# sourceMappingURL=data:application/json;charset=utf-8;base64,"));
  }
}
