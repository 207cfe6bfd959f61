mod chunk;

use std::collections::hash_map::Entry;

use rustc_hash::FxHashMap;
use serialpack_common::{
  AssetKind, Graph, Module, SerialAsset, SerialAssetMetadata, SerializerInput, SerializerOptions,
  SerializerOutput,
};
use serialpack_error::{SerializeError, SerializeResult};
use serialpack_sourcemap::SourceMapOptions;
use serialpack_utils::{
  concat_string, path_ext::PathExt, sanitize_file_name::sanitize_file_name, xxhash::xxhash_base64_url,
};

use crate::{
  stages::{
    debug_id::{embed_debug_id, is_debug_id_enabled, LazyDebugId},
    default_bundle::code_for_debug_id,
    output_mode::DirectiveSource,
  },
  Collaborators, NormalizedSerializerConfig, RenderContext, RenderedBundle,
};

use self::chunk::{split_chunks, Chunk};

/// Serializes the graph into independently servable chunks, entry chunk first.
///
/// Callers that passed explicit directives get the assets as is, url driven callers get
/// their JSON text.
pub fn serialize_static(
  input: SerializerInput,
  source: Option<DirectiveSource>,
  collaborators: &Collaborators,
  config: &NormalizedSerializerConfig,
) -> SerializeResult<SerializerOutput> {
  let SerializerInput { entry_point, pre_modules, graph, options } = input;
  let directives = options.serializer_options.clone().unwrap_or_default();
  let include_source_maps = directives.include_source_maps();
  let include_bytecode = directives.include_bytecode();

  let chunks = split_chunks(&graph, &entry_point);
  tracing::debug!("Serializing `{entry_point}` into {} static chunks", chunks.len());

  let renderer = ChunkRenderer { collaborators, chunks: &chunks, pre_modules: &pre_modules };

  let mut used_names = FxHashMap::default();
  let mut base_codes = Vec::with_capacity(chunks.len());
  let mut filenames = Vec::with_capacity(chunks.len());
  for (idx, chunk) in chunks.iter().enumerate() {
    let base_options = SerializerOptions {
      debug_id: None,
      source_map_url: None,
      run_module: chunk.is_entry && options.run_module,
      ..options.clone()
    };
    let code = renderer.render(idx, &base_options)?.code;
    filenames.push(chunk_filename(config, &graph, chunk, &code, &mut used_names));
    base_codes.push((base_options, code));
  }

  let debug_ids_enabled = include_source_maps && is_debug_id_enabled(&graph, &options);
  let mut assets = Vec::with_capacity(chunks.len());
  for (idx, ((mut chunk_options, code), chunk)) in base_codes.into_iter().zip(&chunks).enumerate() {
    let filename = &filenames[idx];

    let (code, map) = if include_source_maps {
      chunk_options.source_map_url = Some(source_map_filename(filename));
      let mut debug_id = LazyDebugId::new(debug_ids_enabled);
      let render = |options: &SerializerOptions| renderer.render(idx, options);
      let id = debug_id.get(|| code_for_debug_id(&render, &chunk_options))?;
      chunk_options.debug_id.clone_from(&id);

      let code = render(&chunk_options)?.code;
      let map = renderer.source_map(idx, &chunk_options)?;
      let map = match id {
        Some(id) => embed_debug_id(&map, &id)?,
        None => map,
      };
      (code, Some(map))
    } else {
      (code, None)
    };

    let bytecode = if include_bytecode { compile_bytecode(collaborators, filename, &code)? } else { None };

    assets.push(SerialAsset {
      filename: filename.clone(),
      original_filename: chunk.root.to_string(),
      kind: AssetKind::Js,
      metadata: SerialAssetMetadata {
        is_async: !chunk.is_entry,
        requires: if chunk.is_entry { vec![] } else { vec![filenames[0].clone()] },
        lazy_imports: chunk.lazy_imports.iter().map(|&idx| filenames[idx].clone()).collect(),
      },
      code,
      map,
      bytecode,
    });
  }

  // The entry chunk always comes first, the rest are ordered by filename.
  assets.sort_by(|a, b| {
    let a_type = get_sorting_file_type(a) as u8;
    let b_type = get_sorting_file_type(b) as u8;
    if a_type == b_type {
      return a.filename.cmp(&b.filename);
    }
    a_type.cmp(&b_type)
  });

  match source {
    Some(DirectiveSource::Explicit) => Ok(SerializerOutput::Assets(assets)),
    Some(DirectiveSource::Url) | None => {
      serde_json::to_string(&assets).map(SerializerOutput::AssetsJson).map_err(SerializeError::Encode)
    }
  }
}

struct ChunkRenderer<'a> {
  collaborators: &'a Collaborators,
  chunks: &'a [Chunk<'a>],
  pre_modules: &'a [Module],
}

impl ChunkRenderer<'_> {
  /// Pre-modules only belong to the entry chunk.
  fn pre_modules_of(&self, chunk: &Chunk) -> &[Module] {
    if chunk.is_entry { self.pre_modules } else { &[] }
  }

  fn render(&self, idx: usize, options: &SerializerOptions) -> SerializeResult<RenderedBundle> {
    let chunk = &self.chunks[idx];
    let ctx = RenderContext {
      entry_point: chunk.root,
      pre_modules: self.pre_modules_of(chunk),
      modules: &chunk.modules,
      options,
    };
    self.collaborators.renderer.render(&ctx).map_err(SerializeError::Render)
  }

  fn source_map(&self, idx: usize, options: &SerializerOptions) -> SerializeResult<String> {
    let chunk = &self.chunks[idx];
    let modules =
      self.pre_modules_of(chunk).iter().chain(chunk.modules.iter().copied()).collect::<Vec<_>>();
    self
      .collaborators
      .source_map_generator
      .generate(
        &modules,
        &SourceMapOptions {
          process_module_filter: &|module| options.should_process_module(module),
          should_add_to_ignore_list: &|module| options.is_ignore_listed(module),
        },
      )
      .map_err(SerializeError::SourceMap)
  }
}

/// `<dir>/<platform>/<name>-<hash>.js`. Names are deduplicated before hashing.
fn chunk_filename(
  config: &NormalizedSerializerConfig,
  graph: &Graph,
  chunk: &Chunk,
  code: &str,
  used_names: &mut FxHashMap<String, u32>,
) -> String {
  let name = chunk.root.as_path().representative_file_name();
  let name = make_unique_name(used_names, &sanitize_file_name(&name));

  let hash = config.chunk_filenames.has_hash_pattern().then(|| {
    let mut hash = xxhash_base64_url(code.as_bytes());
    hash.truncate(8);
    hash
  });
  let file = config.chunk_filenames.render(&name, hash.as_deref());

  [config.static_dir.as_str(), graph.transform_options.platform.as_deref().unwrap_or_default(), file.as_str()]
    .into_iter()
    .filter(|segment| !segment.is_empty())
    .collect::<Vec<_>>()
    .join("/")
}

/// Appends a counter to names already taken. A candidate with a counter may collide with a
/// real name too, so every candidate is checked.
fn make_unique_name(used_name_counts: &mut FxHashMap<String, u32>, name: &str) -> String {
  let mut candidate = name.to_string();
  loop {
    match used_name_counts.entry(candidate) {
      Entry::Occupied(mut occ) => {
        let next_count = *occ.get();
        occ.insert(next_count + 1);
        let count = next_count.to_string();
        candidate = concat_string!(name, count);
      }
      Entry::Vacant(vac) => {
        let name = vac.key().clone();
        vac.insert(2);
        break name;
      }
    }
  }
}

fn source_map_filename(filename: &str) -> String {
  let basename = filename.rsplit('/').next().unwrap_or(filename);
  let mut map_filename = String::with_capacity(basename.len() + 4);
  map_filename.push_str(basename);
  map_filename.push_str(".map");
  map_filename
}

fn compile_bytecode(
  collaborators: &Collaborators,
  filename: &str,
  code: &str,
) -> SerializeResult<Option<Vec<u8>>> {
  let Some(compiler) = &collaborators.bytecode_compiler else {
    tracing::warn!("Bytecode was requested for `{filename}` but no bytecode compiler is configured");
    return Ok(None);
  };
  compiler
    .compile(filename, code)
    .map(Some)
    .map_err(|source| SerializeError::Bytecode { filename: filename.to_string(), source })
}

enum SortingFileType {
  EntryChunk = 0,
  SecondaryChunk = 1,
}

#[inline]
fn get_sorting_file_type(asset: &SerialAsset) -> SortingFileType {
  if asset.metadata.is_async {
    SortingFileType::SecondaryChunk
  } else {
    SortingFileType::EntryChunk
  }
}

#[test]
fn test_make_unique_name() {
  let mut used_name_counts = FxHashMap::default();
  let names = ["about", "about", "about2", "about", "index"]
    .map(|name| make_unique_name(&mut used_name_counts, name));
  assert_eq!(names, ["about", "about2", "about22", "about3", "index"]);
}

#[test]
fn test_source_map_filename() {
  assert_eq!(source_map_filename("static/js/ios/index-abc.js"), "index-abc.js.map");
  assert_eq!(source_map_filename("index.js"), "index.js.map");
}
