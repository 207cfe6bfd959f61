use std::sync::Arc;

use serialpack_common::{SerializerInput, SerializerOutput};
use serialpack_error::SerializeResult;

use crate::{
  utils::normalize_options::{normalize_options, NormalizedSerializerConfig},
  Collaborators, DefaultSerializer, PluginChain, Serializer, SerializerConfigOptions,
  SharedPlugin, SharedSerializer,
};

/// Serializer section of the host build tool configuration.
#[derive(Clone)]
pub struct SerializerConfig {
  pub options: Arc<NormalizedSerializerConfig>,
  pub collaborators: Collaborators,
  /// Replaces the built-in serialization when set.
  pub custom_serializer: Option<SharedSerializer>,
}

impl SerializerConfig {
  pub fn new(options: SerializerConfigOptions) -> Self {
    Self {
      options: Arc::new(normalize_options(options)),
      collaborators: Collaborators::default(),
      custom_serializer: None,
    }
  }

  pub fn with_collaborators(mut self, collaborators: Collaborators) -> Self {
    self.collaborators = collaborators;
    self
  }

  pub fn with_custom_serializer(mut self, serializer: SharedSerializer) -> Self {
    self.custom_serializer = Some(serializer);
    self
  }

  pub fn default_serializer(&self, fallback: Option<SharedSerializer>) -> DefaultSerializer {
    DefaultSerializer::new(self.collaborators.clone(), Arc::clone(&self.options), fallback)
  }

  /// Entry point of the host. A configured custom serializer takes over completely.
  pub fn serialize(&self, input: SerializerInput) -> SerializeResult<SerializerOutput> {
    match &self.custom_serializer {
      Some(serializer) => serializer.serialize(input),
      None => self.default_serializer(None).serialize(input),
    }
  }
}

impl Default for SerializerConfig {
  fn default() -> Self {
    Self::new(SerializerConfigOptions::default())
  }
}

/// `plugins` followed by the default serializer, which hands over to `original` if given.
pub fn create_serializer_from_plugins(
  config: &SerializerConfig,
  plugins: Vec<Option<SharedPlugin>>,
  original: Option<SharedSerializer>,
) -> SharedSerializer {
  let terminal: SharedSerializer = Arc::new(config.default_serializer(original));
  Arc::new(PluginChain::new(plugins, terminal))
}

/// Adds `plugins` in front of the currently installed serializer. The previous custom
/// serializer, if any, becomes the terminal of the new chain.
pub fn with_serializer_plugins(
  mut config: SerializerConfig,
  plugins: Vec<Option<SharedPlugin>>,
) -> SerializerConfig {
  let original = config.custom_serializer.take();
  config.custom_serializer = Some(create_serializer_from_plugins(&config, plugins, original));
  config
}

/// Installs the pipeline as the custom serializer hook of `config`.
pub fn install_serializer(config: SerializerConfig) -> SerializerConfig {
  with_serializer_plugins(config, vec![])
}
