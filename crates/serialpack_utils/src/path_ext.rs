use std::{borrow::Cow, ffi::OsStr, path::Path};

pub trait PathExt {
  fn representative_file_name(&self) -> Cow<'_, str>;
}

impl PathExt for Path {
  /// File stem used to name a chunk. `index` and `mod` fall back to the parent directory.
  fn representative_file_name(&self) -> Cow<'_, str> {
    let file_name =
      self.file_stem().map_or_else(|| self.to_string_lossy(), OsStr::to_string_lossy);

    match &*file_name {
      "index" | "mod" => self
        .parent()
        .and_then(Self::file_stem)
        .map_or(file_name, OsStr::to_string_lossy),
      _ => file_name,
    }
  }
}

#[test]
fn test_representative_file_name() {
  let cwd = Path::new(".").join("project");
  assert_eq!(cwd.join("src").join("about.js").representative_file_name(), "about");
  assert_eq!(cwd.join("settings").join("index.js").representative_file_name(), "settings");
  assert_eq!(Path::new("index.js").representative_file_name(), "index");
}
