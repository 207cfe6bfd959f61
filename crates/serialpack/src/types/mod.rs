use std::sync::Arc;

use serialpack_sourcemap::{ConcatSourceMapGenerator, SourceMapGenerator};

use crate::{
  BundleRenderer, BytecodeCompiler, ConcatRenderer, JscSafeUrl, Serializer, SerializerPlugin,
  UrlNormalizer,
};

pub type SharedSerializer = Arc<dyn Serializer>;
pub type SharedPlugin = Arc<dyn SerializerPlugin>;

/// The pieces of the pipeline that live outside of it.
#[derive(Clone)]
pub struct Collaborators {
  pub renderer: Arc<dyn BundleRenderer>,
  pub source_map_generator: Arc<dyn SourceMapGenerator>,
  pub url_normalizer: Arc<dyn UrlNormalizer>,
  /// Without a compiler, `serializer.bytecode` requests produce no bytecode.
  pub bytecode_compiler: Option<Arc<dyn BytecodeCompiler>>,
}

impl Default for Collaborators {
  fn default() -> Self {
    let source_map_generator: Arc<dyn SourceMapGenerator> = Arc::new(ConcatSourceMapGenerator);
    Self {
      renderer: Arc::new(ConcatRenderer::new(Arc::clone(&source_map_generator))),
      source_map_generator,
      url_normalizer: Arc::new(JscSafeUrl),
      bytecode_compiler: None,
    }
  }
}
