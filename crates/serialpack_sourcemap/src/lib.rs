mod concat_generator;
mod lines_count;

use serialpack_common::Module;

pub use crate::{concat_generator::ConcatSourceMapGenerator, lines_count::lines_count};

pub struct SourceMapOptions<'a> {
  /// Modules rejected by the filter are left out, exactly as the bundle renderer does.
  pub process_module_filter: &'a dyn Fn(&Module) -> bool,
  pub should_add_to_ignore_list: &'a dyn Fn(&Module) -> bool,
}

/// Builds the source map of a list of modules concatenated with `\n`.
pub trait SourceMapGenerator: Send + Sync {
  fn generate(&self, modules: &[&Module], options: &SourceMapOptions<'_>) -> anyhow::Result<String>;
}
