use anyhow::Context;
use oxc_sourcemap::{ConcatSourceMapBuilder, SourceMap, SourceMapBuilder};
use serialpack_common::Module;

use crate::{lines_count, SourceMapGenerator, SourceMapOptions};

/// Composes per module maps into one bundle map. Modules without a map of their own get a
/// line to line mapping onto their source.
#[derive(Debug, Default)]
pub struct ConcatSourceMapGenerator;

impl SourceMapGenerator for ConcatSourceMapGenerator {
  fn generate(&self, modules: &[&Module], options: &SourceMapOptions<'_>) -> anyhow::Result<String> {
    let mut builder = ConcatSourceMapBuilder::default();
    let mut x_google_ignore_list = vec![];
    let mut line_offset = 0;
    let mut source_offset = 0;

    for module in modules.iter().copied().filter(|module| (options.process_module_filter)(module)) {
      let map = module_source_map(module)?;
      let sources_len = u32::try_from(map.get_sources().count())?;
      if (options.should_add_to_ignore_list)(module) {
        x_google_ignore_list.extend(source_offset..source_offset + sources_len);
      }
      builder.add_sourcemap(&map, line_offset);

      source_offset += sources_len;
      // Modules are joined with a single '\n'.
      line_offset += lines_count(&module.code) + 1;
    }

    let mut map = builder.into_sourcemap();
    if !x_google_ignore_list.is_empty() {
      map.set_x_google_ignore_list(x_google_ignore_list);
    }
    Ok(map.to_json_string())
  }
}

fn module_source_map(module: &Module) -> anyhow::Result<SourceMap> {
  if let Some(json) = &module.map {
    return SourceMap::from_json_string(json)
      .map_err(|err| anyhow::anyhow!("{err:?}"))
      .with_context(|| format!("Invalid source map of module `{}`", module.path));
  }

  let mut builder = SourceMapBuilder::default();
  let source_id = builder.set_source_and_content(&module.path, module.source_content());
  for line in 0..=lines_count(&module.code) {
    builder.add_token(line, 0, line, 0, Some(source_id), None);
  }
  Ok(builder.into_sourcemap())
}
