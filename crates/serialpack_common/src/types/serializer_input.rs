use std::sync::Arc;

use crate::{Graph, Module, ModuleId, SerializerOptions};

/// The four values that travel together through every serializer plugin.
#[derive(Debug, Clone)]
pub struct SerializerInput {
  pub entry_point: ModuleId,
  /// Emitted before the graph's own modules, in this order.
  pub pre_modules: Vec<Module>,
  pub graph: Arc<Graph>,
  pub options: SerializerOptions,
}

impl SerializerInput {
  pub fn new(
    entry_point: impl Into<ModuleId>,
    pre_modules: Vec<Module>,
    graph: impl Into<Arc<Graph>>,
    options: SerializerOptions,
  ) -> Self {
    Self { entry_point: entry_point.into(), pre_modules, graph: graph.into(), options }
  }
}
