use std::borrow::Cow;

use serialpack_common::{OutputDirectives, OutputMode, SerializerOptions};
use url::Url;

use crate::UrlNormalizer;

/// Where the output directives of a pass came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectiveSource {
  /// `options.serializer_options` was set by the caller. Only one-shot export tooling does
  /// this, and it can consume structured results.
  Explicit,
  /// Decoded from the `serializer.*` query parameters of `options.source_url`.
  Url,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputModeResolution {
  pub mode: OutputMode,
  /// `None` when neither an explicit object nor a decodable url was available.
  pub source: Option<DirectiveSource>,
}

/// Reads `serializer.output`, `serializer.map` and `serializer.bytecode` from a request url.
/// Returns `None` when the url can't be parsed.
pub fn decode_url_directives(
  source_url: &str,
  url_normalizer: &dyn UrlNormalizer,
) -> Option<OutputDirectives> {
  let source_url = if url_normalizer.is_safe_encoded(source_url) {
    Cow::Owned(url_normalizer.to_normal_url(source_url))
  } else {
    Cow::Borrowed(source_url)
  };

  let url = match parse_url(&source_url) {
    Ok(url) => url,
    Err(err) => {
      tracing::warn!("Ignoring serializer directives of unparseable source url `{source_url}`: {err}");
      return None;
    }
  };

  let param = |name: &str| {
    url.query_pairs().find(|(key, _)| key == name).map(|(_, value)| value.into_owned())
  };

  Some(OutputDirectives {
    output: param("serializer.output"),
    include_source_maps: Some(param("serializer.map").is_some_and(|value| value == "true")),
    include_bytecode: Some(param("serializer.bytecode").is_some_and(|value| value == "true")),
  })
}

fn parse_url(source_url: &str) -> Result<Url, url::ParseError> {
  match Url::parse(source_url) {
    // Request paths such as `/index.bundle?platform=ios` only carry the query we need.
    Err(url::ParseError::RelativeUrlWithoutBase) => Url::parse("http://localhost/")?.join(source_url),
    ret => ret,
  }
}

/// Picks the serialization strategy and writes the resolved directives back into
/// `options.serializer_options`, so every later stage reads them from one place.
///
/// An explicit directive object wins over the url. It is merged forward even when it has no
/// `output` field, in which case the default strategy is used.
pub fn resolve_output_mode(
  options: &mut SerializerOptions,
  url_normalizer: &dyn UrlNormalizer,
) -> OutputModeResolution {
  let resolved = match &options.serializer_options {
    Some(explicit) => Some((explicit.clone(), DirectiveSource::Explicit)),
    None => options
      .source_url
      .as_deref()
      .and_then(|source_url| decode_url_directives(source_url, url_normalizer))
      .map(|directives| (directives, DirectiveSource::Url)),
  };

  let Some((directives, source)) = resolved else {
    return OutputModeResolution { mode: OutputMode::Default, source: None };
  };

  let mode = directives.output_mode();
  tracing::debug!("Resolved output mode {mode:?} from {source:?} directives {directives:?}");
  options.serializer_options.get_or_insert_with(OutputDirectives::default).merge(directives);

  OutputModeResolution { mode, source: Some(source) }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::JscSafeUrl;

  fn resolve(options: &mut SerializerOptions) -> OutputModeResolution {
    resolve_output_mode(options, &JscSafeUrl)
  }

  fn with_url(url: &str) -> SerializerOptions {
    SerializerOptions { source_url: Some(url.to_string()), ..Default::default() }
  }

  #[test]
  fn decodes_url_directives() {
    let mut options =
      with_url("http://localhost:8081/index.bundle?platform=web&serializer.output=static&serializer.map=true");
    let resolution = resolve(&mut options);

    assert_eq!(resolution, OutputModeResolution { mode: OutputMode::Static, source: Some(DirectiveSource::Url) });
    assert_eq!(
      options.serializer_options,
      Some(OutputDirectives {
        output: Some("static".to_string()),
        include_source_maps: Some(true),
        include_bytecode: Some(false),
      })
    );
  }

  #[test]
  fn decodes_jsc_safe_urls() {
    let mut options = with_url("http://localhost:8081/index.bundle//&serializer.output=static&serializer.bytecode=true");
    assert_eq!(resolve(&mut options).mode, OutputMode::Static);
    assert_eq!(options.serializer_options.as_ref().and_then(|d| d.include_bytecode), Some(true));
  }

  #[test]
  fn decodes_relative_request_paths() {
    let directives = decode_url_directives("/index.bundle?serializer.output=static", &JscSafeUrl);
    assert_eq!(directives.and_then(|d| d.output).as_deref(), Some("static"));
  }

  #[test]
  fn url_without_directives_still_merges_defaults() {
    let mut options = with_url("http://localhost:8081/index.bundle?platform=ios");
    let resolution = resolve(&mut options);
    assert_eq!(resolution, OutputModeResolution { mode: OutputMode::Default, source: Some(DirectiveSource::Url) });
    assert_eq!(
      options.serializer_options,
      Some(OutputDirectives { output: None, include_source_maps: Some(false), include_bytecode: Some(false) })
    );
  }

  #[test]
  fn explicit_directives_win_over_url() {
    let mut options = SerializerOptions {
      serializer_options: Some(OutputDirectives { include_source_maps: Some(true), ..Default::default() }),
      ..with_url("http://localhost:8081/index.bundle?serializer.output=static")
    };
    let resolution = resolve(&mut options);

    // Present but without `output`: default strategy, yet still merged forward.
    assert_eq!(resolution, OutputModeResolution { mode: OutputMode::Default, source: Some(DirectiveSource::Explicit) });
    assert_eq!(
      options.serializer_options,
      Some(OutputDirectives { output: None, include_source_maps: Some(true), include_bytecode: None })
    );
  }

  #[test]
  fn unparseable_url_degrades_to_default() {
    let mut options = with_url("http://[::1/index.bundle?serializer.output=static");
    assert_eq!(resolve(&mut options), OutputModeResolution { mode: OutputMode::Default, source: None });
    assert_eq!(options.serializer_options, None);
  }

  #[test]
  fn no_directives_at_all() {
    let mut options = SerializerOptions::default();
    assert_eq!(resolve(&mut options), OutputModeResolution { mode: OutputMode::Default, source: None });
    assert_eq!(options.serializer_options, None);
  }
}
