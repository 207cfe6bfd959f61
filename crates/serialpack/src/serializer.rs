use std::sync::Arc;

use serialpack_common::{OutputMode, SerializerInput, SerializerOutput};
use serialpack_error::{SerializeError, SerializeResult};

use crate::{
  stages::{
    default_bundle::serialize_bundle, output_mode::resolve_output_mode,
    static_assets::serialize_static,
  },
  Collaborators, NormalizedSerializerConfig, SharedSerializer,
};

/// Turns a serializer input into output bytes.
pub trait Serializer: Send + Sync {
  fn serialize(&self, input: SerializerInput) -> SerializeResult<SerializerOutput>;
}

impl<F> Serializer for F
where
  F: Fn(SerializerInput) -> SerializeResult<SerializerOutput> + Send + Sync,
{
  fn serialize(&self, input: SerializerInput) -> SerializeResult<SerializerOutput> {
    self(input)
  }
}

/// Wraps a user supplied serializer. Its errors are reported as
/// [`SerializeError::CustomSerializer`].
pub fn custom_serializer<F>(serialize: F) -> SharedSerializer
where
  F: Fn(SerializerInput) -> anyhow::Result<SerializerOutput> + Send + Sync + 'static,
{
  Arc::new(move |input: SerializerInput| -> SerializeResult<SerializerOutput> {
    serialize(input).map_err(SerializeError::CustomSerializer)
  })
}

/// The terminal serializer of the pipeline.
///
/// With a `fallback` it is a plain passthrough. Otherwise it resolves the output mode and
/// runs either the bundle or the static asset strategy.
pub struct DefaultSerializer {
  collaborators: Collaborators,
  config: Arc<NormalizedSerializerConfig>,
  fallback: Option<SharedSerializer>,
}

impl DefaultSerializer {
  pub fn new(
    collaborators: Collaborators,
    config: Arc<NormalizedSerializerConfig>,
    fallback: Option<SharedSerializer>,
  ) -> Self {
    Self { collaborators, config, fallback }
  }
}

impl Serializer for DefaultSerializer {
  fn serialize(&self, mut input: SerializerInput) -> SerializeResult<SerializerOutput> {
    if let Some(fallback) = &self.fallback {
      tracing::debug!("Delegating `{}` to the custom serializer", input.entry_point);
      return fallback.serialize(input);
    }

    let resolution = resolve_output_mode(&mut input.options, &*self.collaborators.url_normalizer);
    match resolution.mode {
      OutputMode::Static => {
        serialize_static(input, resolution.source, &self.collaborators, &self.config)
      }
      OutputMode::Default => serialize_bundle(input, &self.collaborators),
    }
  }
}
