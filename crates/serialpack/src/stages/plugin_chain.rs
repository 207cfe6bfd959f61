use std::{borrow::Cow, sync::Arc};

use serialpack_common::{SerializerInput, SerializerOutput};
use serialpack_error::{SerializeError, SerializeResult};
use serialpack_utils::pretty_type_name::pretty_type_name;

use crate::{Serializer, SharedPlugin, SharedSerializer};

/// Rewrites the serializer input before it reaches the final serializer.
///
/// A plugin receives all four values and has to hand all four back, including the ones it
/// leaves untouched.
pub trait SerializerPlugin: Send + Sync {
  fn name(&self) -> Cow<'static, str> {
    pretty_type_name::<Self>()
  }

  fn transform(&self, input: SerializerInput) -> anyhow::Result<SerializerInput>;
}

struct FnPlugin<F> {
  name: Cow<'static, str>,
  transform: F,
}

impl<F> SerializerPlugin for FnPlugin<F>
where
  F: Fn(SerializerInput) -> anyhow::Result<SerializerInput> + Send + Sync,
{
  fn name(&self) -> Cow<'static, str> {
    self.name.clone()
  }

  fn transform(&self, input: SerializerInput) -> anyhow::Result<SerializerInput> {
    (self.transform)(input)
  }
}

pub fn plugin_fn<F>(name: impl Into<Cow<'static, str>>, transform: F) -> SharedPlugin
where
  F: Fn(SerializerInput) -> anyhow::Result<SerializerInput> + Send + Sync + 'static,
{
  Arc::new(FnPlugin { name: name.into(), transform })
}

/// Runs `plugins` left to right, then hands the result to `terminal`.
pub struct PluginChain {
  /// `None` entries are skipped.
  plugins: Vec<Option<SharedPlugin>>,
  terminal: SharedSerializer,
}

impl PluginChain {
  pub fn new(plugins: Vec<Option<SharedPlugin>>, terminal: SharedSerializer) -> Self {
    Self { plugins, terminal }
  }

  pub fn apply(&self, mut input: SerializerInput) -> SerializeResult<SerializerInput> {
    for plugin in self.plugins.iter().flatten() {
      let name = plugin.name();
      tracing::debug!("Applying serializer plugin `{name}`");
      input = plugin.transform(input).map_err(|err| SerializeError::plugin(name, err))?;
    }
    Ok(input)
  }
}

impl Serializer for PluginChain {
  fn serialize(&self, input: SerializerInput) -> SerializeResult<SerializerOutput> {
    let input = self.apply(input)?;
    self.terminal.serialize(input)
  }
}

#[cfg(test)]
mod tests {
  use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
  };

  use pretty_assertions::assert_eq;
  use serialpack_common::{Graph, Module, SerializerOptions};

  use super::*;

  fn input() -> SerializerInput {
    SerializerInput::new("index.js", vec![], Graph::default(), SerializerOptions::default())
  }

  fn push_pre_module(name: &'static str) -> SharedPlugin {
    plugin_fn(name, move |mut input: SerializerInput| {
      input.pre_modules.push(Module::new(name, ""));
      Ok(input)
    })
  }

  fn pre_module_names() -> SharedSerializer {
    Arc::new(|input: SerializerInput| -> SerializeResult<SerializerOutput> {
      let names = input.pre_modules.iter().map(|module| module.path.to_string()).collect::<Vec<_>>();
      Ok(SerializerOutput::Code(names.join(",")))
    })
  }

  #[test]
  fn plugins_run_in_order_and_skip_none() {
    let chain = PluginChain::new(
      vec![Some(push_pre_module("p1")), None, Some(push_pre_module("p2")), Some(push_pre_module("p3"))],
      pre_module_names(),
    );
    assert_eq!(chain.serialize(input()).unwrap(), SerializerOutput::Code("p1,p2,p3".to_string()));
  }

  #[test]
  fn later_plugins_observe_earlier_rewrites() {
    let observed = Arc::new(AtomicUsize::new(usize::MAX));
    let observed_in_plugin = Arc::clone(&observed);
    let read_len = plugin_fn("read-len", move |input: SerializerInput| {
      observed_in_plugin.store(input.pre_modules.len(), Ordering::SeqCst);
      Ok(input)
    });

    let chain = PluginChain::new(vec![Some(push_pre_module("polyfill")), Some(read_len)], pre_module_names());
    assert_eq!(chain.serialize(input()).unwrap(), SerializerOutput::Code("polyfill".to_string()));
    assert_eq!(observed.load(Ordering::SeqCst), 1);
  }

  #[test]
  fn failing_plugin_aborts_the_chain() {
    let terminal_calls = Arc::new(AtomicUsize::new(0));
    let calls = Arc::clone(&terminal_calls);
    let terminal: SharedSerializer = Arc::new(move |_input: SerializerInput| -> SerializeResult<SerializerOutput> {
      calls.fetch_add(1, Ordering::SeqCst);
      Ok(SerializerOutput::Code(String::new()))
    });
    let failing = plugin_fn("explode", |_input: SerializerInput| Err(anyhow::anyhow!("boom")));

    let chain = PluginChain::new(vec![Some(failing), Some(push_pre_module("never"))], terminal);
    let err = chain.serialize(input()).unwrap_err();
    assert!(matches!(&err, SerializeError::Plugin { name, .. } if name == "explode"));
    assert_eq!(terminal_calls.load(Ordering::SeqCst), 0);
  }

  #[test]
  fn default_plugin_name_is_the_type_name() {
    struct AddBanner;
    impl SerializerPlugin for AddBanner {
      fn transform(&self, input: SerializerInput) -> anyhow::Result<SerializerInput> {
        Ok(input)
      }
    }
    assert_eq!(AddBanner.name(), "AddBanner");
  }
}
