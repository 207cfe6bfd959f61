mod args;
mod types;

use std::{fs, path::Path, sync::Arc, time::Instant};

use ansi_term::Colour;
use anyhow::Context;
use args::{EnhanceArgs, InputArgs, OutputArgs};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use serialpack::{
  with_serializer_plugins, OutputDirectives, PreludePlugin, SerialAsset, SerializerConfig,
  SerializerConfigOptions, SerializerInput, SerializerOptions, SerializerOutput, SharedPlugin,
};
use types::graph_file::GraphFile;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Commands {
  #[clap(flatten)]
  input: InputArgs,

  #[clap(flatten)]
  output: OutputArgs,

  #[clap(flatten)]
  enhance: EnhanceArgs,
}

struct OutputFile {
  filename: String,
  content: Vec<u8>,
  is_chunk: bool,
}

fn output_files(result: SerializerOutput, bundle_filename: &str) -> anyhow::Result<Vec<OutputFile>> {
  let assets = match result {
    SerializerOutput::Code(code) => {
      return Ok(vec![OutputFile { filename: bundle_filename.to_string(), content: code.into(), is_chunk: true }]);
    }
    SerializerOutput::CodeWithMap { code, map } => {
      return Ok(vec![
        OutputFile { filename: bundle_filename.to_string(), content: code.into(), is_chunk: true },
        OutputFile { filename: format!("{bundle_filename}.map"), content: map.into(), is_chunk: false },
      ]);
    }
    SerializerOutput::Assets(assets) => assets,
    SerializerOutput::AssetsJson(json) => {
      serde_json::from_str::<Vec<SerialAsset>>(&json).context("Invalid static asset JSON")?
    }
  };

  let mut files = Vec::with_capacity(assets.len());
  for asset in assets {
    if let Some(map) = asset.map {
      files.push(OutputFile { filename: format!("{}.map", asset.filename), content: map.into(), is_chunk: false });
    }
    if let Some(bytecode) = asset.bytecode {
      files.push(OutputFile { filename: format!("{}.hbc", asset.filename), content: bytecode, is_chunk: false });
    }
    files.push(OutputFile { filename: asset.filename, content: asset.code.into(), is_chunk: true });
  }
  Ok(files)
}

fn write_output_files(dir: &Path, files: &[OutputFile]) -> anyhow::Result<()> {
  for file in files {
    let path = dir.join(&file.filename);
    if let Some(parent) = path.parent() {
      fs::create_dir_all(parent).with_context(|| format!("Failed to create `{}`", parent.display()))?;
    }
    fs::write(&path, &file.content).with_context(|| format!("Failed to write `{}`", path.display()))?;
    tracing::debug!("Wrote {}", path.display());
  }
  Ok(())
}

fn print_output_files(files: &[OutputFile]) {
  let mut left = 0;
  let mut right = 0;

  let mut rows = Vec::with_capacity(files.len());

  for file in files {
    let size = format!("{:.2}", file.content.len() as f64 / 1024.0);

    if size.len() > right {
      right = size.len();
    }

    if file.filename.len() > left {
      left = file.filename.len()
    }

    rows.push((file.filename.as_str(), size, file.is_chunk));
  }

  let dim = Colour::White.dimmed();
  let color = Colour::Cyan;

  for (filename, size, is_chunk) in rows {
    let file_type = if is_chunk { "chunk" } else { "asset" };

    println!(
      "{}{}{:left$} {}{}{:right$}{} kB",
      dim.paint("<DIR>/"),
      color.paint(filename),
      "",
      dim.paint(file_type),
      dim.paint(" │ size: "),
      "",
      size,
      left = left - filename.len(),
      right = right - size.len()
    )
  }
}

fn run(args: Commands) -> anyhow::Result<Vec<OutputFile>> {
  let InputArgs { graph, entry, platform, config, source_url } = args.input;

  let (entry_point, pre_modules, mut graph) = GraphFile::read(&graph)?.into_parts();
  anyhow::ensure!(!graph.is_empty(), "Graph file contains no modules");
  if platform.is_some() {
    graph.transform_options.platform = platform;
  }
  tracing::debug!("Loaded {} modules", graph.len());

  let mut config_options = match config {
    Some(path) => {
      let content =
        fs::read_to_string(&path).with_context(|| format!("Failed to read `{}`", path.display()))?;
      serde_json::from_str::<SerializerConfigOptions>(&content)
        .with_context(|| format!("Invalid serializer config `{}`", path.display()))?
    }
    None => SerializerConfigOptions::default(),
  };
  config_options.static_dir = args.output.static_dir.or(config_options.static_dir);
  config_options.chunk_filenames = args.output.chunk_filenames.or(config_options.chunk_filenames);

  let mut serializer_config = SerializerConfig::new(config_options);
  if args.enhance.prelude {
    let prelude: SharedPlugin = Arc::new(PreludePlugin);
    serializer_config = with_serializer_plugins(serializer_config, vec![Some(prelude)]);
  }

  let options = SerializerOptions {
    source_url,
    source_map_url: args.output.source_map_url,
    inline_source_map: args.output.inline_source_map,
    run_module: args.enhance.run_module,
    serializer_options: args.output.output.map(|mode| OutputDirectives {
      output: Some(mode.token().to_string()),
      include_source_maps: Some(args.output.map),
      include_bytecode: None,
    }),
    ..Default::default()
  };

  let input = SerializerInput::new(entry.unwrap_or(entry_point), pre_modules, graph, options);
  let files = output_files(serializer_config.serialize(input)?, &args.output.file)?;

  if let Some(dir) = &args.output.dir {
    write_output_files(dir, &files)?;
  }
  Ok(files)
}

fn main() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::from_env("SERIALPACK_LOG"))
    .with_writer(std::io::stderr)
    .init();

  let args = Commands::parse();
  let silent = args.enhance.silent;

  let start = Instant::now();
  match run(args) {
    Ok(files) => {
      if !silent && !files.is_empty() {
        print_output_files(&files);
      }

      let elapsed = format!("{:.2} ms", start.elapsed().as_secs_f64() * 1000.0);
      println!("\n{} Finished in {}", Colour::Green.paint("✔"), Colour::White.bold().paint(elapsed))
    }
    Err(error) => {
      println!("{} {:?}", Colour::Red.paint("Error:"), error);
    }
  }
}
