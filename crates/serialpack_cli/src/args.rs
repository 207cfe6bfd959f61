use std::path::PathBuf;

use clap::Args;

use crate::types::output_mode::OutputMode;

#[derive(Args)]
pub struct InputArgs {
  /// JSON description of the resolved graph.
  pub graph: PathBuf,

  /// Overrides the entry point recorded in the graph file.
  #[clap(long, short)]
  pub entry: Option<String>,

  #[clap(long, short)]
  pub platform: Option<String>,

  /// JSON file with the serializer section of the configuration.
  #[clap(long, short)]
  pub config: Option<PathBuf>,

  /// Request url, `serializer.*` query parameters select the output.
  #[clap(long)]
  pub source_url: Option<String>,
}

#[derive(Args)]
pub struct OutputArgs {
  #[clap(long, short = 'd')]
  pub dir: Option<PathBuf>,

  /// Filename of the bundle in default output.
  #[clap(long, short = 'o', default_value = "index.bundle")]
  pub file: String,

  #[clap(long)]
  pub output: Option<OutputMode>,

  /// Emit source maps for static assets.
  #[clap(long)]
  pub map: bool,

  #[clap(long)]
  pub inline_source_map: bool,

  #[clap(long)]
  pub source_map_url: Option<String>,

  #[clap(long)]
  pub static_dir: Option<String>,

  #[clap(long)]
  pub chunk_filenames: Option<String>,
}

#[derive(Args)]
pub struct EnhanceArgs {
  /// Prepend the `__DEV__` / `process.env.NODE_ENV` prelude.
  #[clap(long)]
  pub prelude: bool,

  /// Require the entry point at the end of the bundle.
  #[clap(long)]
  pub run_module: bool,

  #[clap(long, short = 's')]
  pub silent: bool,
}
