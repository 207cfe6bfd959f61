use clap::ValueEnum;

#[derive(PartialEq, Eq, Clone, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputMode {
  Default,
  Static,
}

impl OutputMode {
  pub fn token(&self) -> &'static str {
    match self {
      OutputMode::Default => "default",
      OutputMode::Static => "static",
    }
  }
}
