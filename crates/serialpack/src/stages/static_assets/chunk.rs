use rustc_hash::{FxHashMap, FxHashSet};
use serialpack_common::{Graph, Module, ModuleId, ModuleOrder};
use serialpack_utils::indexmap::FxIndexSet;

#[derive(Debug)]
pub struct Chunk<'a> {
  /// The entry point for the entry chunk, the `import()`ed module otherwise.
  pub root: &'a ModuleId,
  pub is_entry: bool,
  /// Output order.
  pub modules: Vec<&'a Module>,
  /// Indexes of the chunks loaded with `import()` from this one.
  pub lazy_imports: Vec<usize>,
}

/// Splits the graph at async dependencies. The entry chunk comes first and holds what the
/// entry point reaches synchronously. Every other chunk holds what its root reaches
/// synchronously, minus the modules already in the entry chunk.
///
/// Hot passes are never split.
pub fn split_chunks<'a>(graph: &'a Graph, entry_point: &'a ModuleId) -> Vec<Chunk<'a>> {
  let ModuleOrder { modules: sorted_modules, .. } = graph.sort_modules(entry_point);

  if graph.transform_options.hot {
    return vec![Chunk { root: entry_point, is_entry: true, modules: sorted_modules, lazy_imports: vec![] }];
  }

  let exec_order = sorted_modules
    .iter()
    .enumerate()
    .map(|(idx, module)| (&module.path, idx))
    .collect::<FxHashMap<_, _>>();

  let mut chunk_roots = FxIndexSet::default();
  chunk_roots.insert(entry_point);
  let mut in_entry_chunk = FxHashSet::default();
  let mut chunks = Vec::new();

  while let Some(&root) = chunk_roots.get_index(chunks.len()) {
    let is_entry = chunks.is_empty();
    let mut modules = collect_sync_modules(graph, root, &in_entry_chunk);
    modules.sort_by_key(|module| exec_order.get(&module.path).copied().unwrap_or(usize::MAX));

    if is_entry {
      in_entry_chunk.extend(modules.iter().map(|module| &module.path));
    }

    let mut lazy_imports = Vec::new();
    for dep in modules.iter().flat_map(|module| module.async_dependencies()) {
      if graph.get(dep).is_none() || in_entry_chunk.contains(dep) {
        continue;
      }
      let (idx, _) = chunk_roots.insert_full(dep);
      if !lazy_imports.contains(&idx) {
        lazy_imports.push(idx);
      }
    }

    chunks.push(Chunk { root, is_entry, modules, lazy_imports });
  }

  chunks
}

fn collect_sync_modules<'a>(
  graph: &'a Graph,
  root: &ModuleId,
  excluded: &FxHashSet<&'a ModuleId>,
) -> Vec<&'a Module> {
  let mut visited = FxHashSet::default();
  let mut stack = vec![root];
  let mut modules = Vec::new();

  while let Some(id) = stack.pop() {
    let Some(module) = graph.get(id) else { continue };
    if excluded.contains(&module.path) || !visited.insert(&module.path) {
      continue;
    }
    modules.push(module);
    stack.extend(module.sync_dependencies());
  }

  modules
}
