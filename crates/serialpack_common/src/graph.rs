use std::iter;

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use serialpack_utils::indexmap::FxIndexMap;

use crate::{Module, ModuleId};

/// Options the graph was transformed with. Serialization only reads them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransformOptions {
  /// Development pass optimized for reloading. Skips debug ids and production maps.
  pub hot: bool,
  pub dev: bool,
  pub platform: Option<String>,
}

/// The resolved dependency graph handed over by the module resolver.
#[derive(Debug, Default, Clone)]
pub struct Graph {
  pub dependencies: FxIndexMap<ModuleId, Module>,
  pub transform_options: TransformOptions,
}

/// Modules of a graph in output order.
#[derive(Debug, Default)]
pub struct ModuleOrder<'a> {
  pub modules: Vec<&'a Module>,
  /// Each cycle is reported once, starting and ending with the same module.
  pub circular_dependencies: Vec<Vec<ModuleId>>,
}

#[derive(PartialEq, Eq, Hash, Debug)]
enum Status {
  ToBeExecuted(usize),
  WaitForExit(usize),
}

impl Graph {
  pub fn new(modules: impl IntoIterator<Item = Module>, transform_options: TransformOptions) -> Self {
    let dependencies = modules.into_iter().map(|module| (module.path.clone(), module)).collect();
    Self { dependencies, transform_options }
  }

  pub fn get(&self, id: &ModuleId) -> Option<&Module> {
    self.dependencies.get(id)
  }

  pub fn len(&self) -> usize {
    self.dependencies.len()
  }

  pub fn is_empty(&self) -> bool {
    self.dependencies.is_empty()
  }

  /// Post-order depth first walk from `entry_point`: every module comes after the modules
  /// it depends on. Cycles are cut at the back edge. Modules the entry point never reaches
  /// are appended in graph order, and dependencies missing from the graph are skipped.
  pub fn sort_modules(&self, entry_point: &ModuleId) -> ModuleOrder<'_> {
    let mut execution_stack =
      self.dependencies.get_index_of(entry_point).map(Status::ToBeExecuted).into_iter().collect::<Vec<_>>();

    let mut executed_ids = FxHashSet::default();
    let mut stack_indexes_of_executing_id = FxHashMap::default();

    let mut circular_dependencies: Vec<Vec<usize>> = vec![];
    let mut sorted = Vec::with_capacity(self.dependencies.len());

    while let Some(status) = execution_stack.pop() {
      match status {
        Status::ToBeExecuted(idx) => {
          if executed_ids.contains(&idx) {
            if let Some(index) = stack_indexes_of_executing_id.get(&idx).copied() {
              // Only modules with `Status::WaitForExit` are on the execution chain
              let cycle = execution_stack[index..]
                .iter()
                .filter_map(|status| match status {
                  Status::ToBeExecuted(_) => None,
                  Status::WaitForExit(idx) => Some(*idx),
                })
                .chain(iter::once(idx))
                .collect::<Vec<_>>();
              if !circular_dependencies.contains(&cycle) {
                circular_dependencies.push(cycle);
              }
            }
          } else {
            executed_ids.insert(idx);
            execution_stack.push(Status::WaitForExit(idx));
            stack_indexes_of_executing_id.insert(idx, execution_stack.len() - 1);

            let module = &self.dependencies[idx];
            execution_stack.extend(
              module
                .dependencies
                .iter()
                .filter_map(|dep| self.dependencies.get_index_of(&dep.path))
                .rev()
                .map(Status::ToBeExecuted),
            );
          }
        }
        Status::WaitForExit(idx) => {
          sorted.push(idx);
          stack_indexes_of_executing_id.remove(&idx);
        }
      }
    }

    sorted.extend((0..self.dependencies.len()).filter(|idx| !executed_ids.contains(idx)));

    ModuleOrder {
      modules: sorted.into_iter().map(|idx| &self.dependencies[idx]).collect(),
      circular_dependencies: circular_dependencies
        .into_iter()
        .map(|cycle| cycle.into_iter().map(|idx| self.dependencies[idx].path.clone()).collect())
        .collect(),
    }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;
  use crate::Dependency;

  fn paths(order: &ModuleOrder) -> Vec<String> {
    order.modules.iter().map(|module| module.path.to_string()).collect()
  }

  #[test]
  fn dependencies_come_before_dependents() {
    let graph = Graph::new(
      [
        Module::new("a.js", "").with_dependencies([Dependency::sync("b.js"), Dependency::sync("c.js")]),
        Module::new("b.js", "").with_dependencies([Dependency::sync("c.js")]),
        Module::new("c.js", ""),
        Module::new("orphan.js", ""),
      ],
      TransformOptions::default(),
    );

    let order = graph.sort_modules(&"a.js".into());
    assert_eq!(paths(&order), ["c.js", "b.js", "a.js", "orphan.js"]);
    assert!(order.circular_dependencies.is_empty());
  }

  #[test]
  fn cycles_are_reported_and_cut() {
    let graph = Graph::new(
      [
        Module::new("a.js", "").with_dependencies([Dependency::sync("b.js"), Dependency::lazy("c.js")]),
        Module::new("b.js", "").with_dependencies([Dependency::sync("c.js")]),
        Module::new("c.js", "").with_dependencies([Dependency::sync("a.js")]),
      ],
      TransformOptions::default(),
    );

    let order = graph.sort_modules(&"a.js".into());
    assert_eq!(paths(&order), ["c.js", "b.js", "a.js"]);
    assert_eq!(
      order.circular_dependencies,
      [vec![ModuleId::from("a.js"), ModuleId::from("b.js"), ModuleId::from("c.js"), ModuleId::from("a.js")]]
    );
  }

  #[test]
  fn missing_entry_keeps_graph_order() {
    let graph = Graph::new(
      [Module::new("x.js", "").with_dependencies([Dependency::sync("external")]), Module::new("y.js", "")],
      TransformOptions::default(),
    );
    assert_eq!(paths(&graph.sort_modules(&"index.js".into())), ["x.js", "y.js"]);
  }
}
