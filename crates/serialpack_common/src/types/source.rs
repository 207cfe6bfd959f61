use crate::Module;

/// Anything that contributes a contiguous piece of text to a rendered bundle.
pub trait Source {
  fn content(&self) -> &str;
}

impl Source for &str {
  fn content(&self) -> &str {
    self
  }
}

impl Source for String {
  fn content(&self) -> &str {
    self
  }
}

impl Source for &Module {
  fn content(&self) -> &str {
    &self.code
  }
}
