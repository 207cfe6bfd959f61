mod collaborators;
mod config;
mod plugins;
mod serializer;
mod stages;
mod types;
mod utils;

pub use crate::{
  collaborators::{
    bytecode::BytecodeCompiler,
    renderer::{BundleRenderer, ConcatRenderer, RenderContext, RenderedBundle},
    url::{JscSafeUrl, UrlNormalizer},
  },
  config::{
    create_serializer_from_plugins, install_serializer, with_serializer_plugins, SerializerConfig,
  },
  plugins::prelude::PreludePlugin,
  serializer::{custom_serializer, DefaultSerializer, Serializer},
  stages::{
    debug_id::{compute_debug_id, embed_debug_id, LazyDebugId},
    output_mode::{decode_url_directives, resolve_output_mode, DirectiveSource, OutputModeResolution},
    plugin_chain::{plugin_fn, PluginChain, SerializerPlugin},
  },
  types::{Collaborators, SharedPlugin, SharedSerializer},
  utils::normalize_options::{NormalizedSerializerConfig, SerializerConfigOptions},
};
pub use serialpack_common::*;
pub use serialpack_error::{SerializeError, SerializeResult};
pub use serialpack_sourcemap::{ConcatSourceMapGenerator, SourceMapGenerator, SourceMapOptions};
