use std::borrow::Cow;

/// Everything that can abort a serialization pass.
///
/// Collaborators (renderers, source map generators, plugins) report failures as
/// `anyhow::Error`; this type records which stage of the pipeline they came from.
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
  #[error("serializer plugin `{name}` failed")]
  Plugin {
    name: Cow<'static, str>,
    #[source]
    source: anyhow::Error,
  },
  #[error("failed to render bundle")]
  Render(#[source] anyhow::Error),
  #[error("failed to generate source map")]
  SourceMap(#[source] anyhow::Error),
  #[error("generated source map is not valid JSON")]
  MapStructure(#[source] serde_json::Error),
  #[error("custom serializer failed")]
  CustomSerializer(#[source] anyhow::Error),
  #[error("failed to compile bytecode for `{filename}`")]
  Bytecode {
    filename: String,
    #[source]
    source: anyhow::Error,
  },
  #[error("failed to encode serial assets")]
  Encode(#[source] serde_json::Error),
}

impl SerializeError {
  pub fn plugin(name: impl Into<Cow<'static, str>>, source: anyhow::Error) -> Self {
    Self::Plugin { name: name.into(), source }
  }
}

pub type SerializeResult<T> = Result<T, SerializeError>;

#[test]
fn test_error_messages() {
  let err = SerializeError::plugin("inject-polyfills", anyhow::anyhow!("boom"));
  assert_eq!(err.to_string(), "serializer plugin `inject-polyfills` failed");
  assert_eq!(std::error::Error::source(&err).map(ToString::to_string).as_deref(), Some("boom"));

  let err = SerializeError::Bytecode { filename: "index.js".into(), source: anyhow::anyhow!("x") };
  assert_eq!(err.to_string(), "failed to compile bytecode for `index.js`");
}
