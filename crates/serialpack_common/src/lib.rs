mod graph;
mod module;
mod serializer_options;
mod types;

pub use crate::{
  graph::{Graph, ModuleOrder, TransformOptions},
  module::{Dependency, DependencyKind, Module},
  serializer_options::{ModuleFilter, OutputDirectives, OutputMode, SerializerOptions},
  types::{
    filename_template::FilenameTemplate,
    module_id::ModuleId,
    serial_asset::{AssetKind, SerialAsset, SerialAssetMetadata},
    serializer_input::SerializerInput,
    serializer_output::SerializerOutput,
    source::Source,
    source_joiner::SourceJoiner,
  },
};
