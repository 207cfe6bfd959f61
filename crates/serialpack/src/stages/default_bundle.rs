use itertools::Itertools;
use serialpack_common::{Module, ModuleOrder, SerializerInput, SerializerOptions, SerializerOutput};
use serialpack_error::{SerializeError, SerializeResult};
use serialpack_sourcemap::SourceMapOptions;

use crate::{
  stages::debug_id::{embed_debug_id, is_debug_id_enabled, LazyDebugId},
  Collaborators, RenderContext, RenderedBundle,
};

/// Renders the whole graph into one bundle.
///
/// - Hot passes return whatever the renderer produced, untouched.
/// - Production passes always carry a map of pre-modules plus graph modules in output
///   order. It gets a `debugId` unless inline maps were requested.
pub fn serialize_bundle(
  input: SerializerInput,
  collaborators: &Collaborators,
) -> SerializeResult<SerializerOutput> {
  let SerializerInput { entry_point, pre_modules, graph, mut options } = input;

  let ModuleOrder { modules, circular_dependencies } = graph.sort_modules(&entry_point);
  for cycle in &circular_dependencies {
    tracing::debug!("Circular dependency: {}", cycle.iter().join(" -> "));
  }

  let render = |options: &SerializerOptions| {
    let ctx = RenderContext { entry_point: &entry_point, pre_modules: &pre_modules, modules: &modules, options };
    collaborators.renderer.render(&ctx).map_err(SerializeError::Render)
  };

  let mut debug_id = LazyDebugId::new(is_debug_id_enabled(&graph, &options));
  if let Some(id) = debug_id.get(|| code_for_debug_id(&render, &options))? {
    options.debug_id = Some(id);
  }

  let RenderedBundle { code, map } = render(&options)?;

  if graph.transform_options.hot {
    return Ok(match map {
      Some(map) => SerializerOutput::CodeWithMap { code, map },
      None => SerializerOutput::Code(code),
    });
  }

  let map_modules = pre_modules.iter().chain(modules.iter().copied()).collect::<Vec<&Module>>();
  let map = collaborators
    .source_map_generator
    .generate(
      &map_modules,
      &SourceMapOptions {
        process_module_filter: &|module| options.should_process_module(module),
        should_add_to_ignore_list: &|module| options.is_ignore_listed(module),
      },
    )
    .map_err(SerializeError::SourceMap)?;

  let map = match debug_id.get(|| code_for_debug_id(&render, &options))? {
    Some(id) => embed_debug_id(&map, &id)?,
    None => map,
  };

  Ok(SerializerOutput::CodeWithMap { code, map })
}

/// The id is a hash of the code, so the code it is derived from can't contain it.
pub(crate) fn code_for_debug_id(
  render: &impl Fn(&SerializerOptions) -> SerializeResult<RenderedBundle>,
  options: &SerializerOptions,
) -> SerializeResult<String> {
  let cleared = SerializerOptions { debug_id: None, ..options.clone() };
  render(&cleared).map(|bundle| bundle.code)
}
