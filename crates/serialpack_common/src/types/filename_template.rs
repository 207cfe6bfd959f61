/// Output filename pattern supporting the `[name]` and `[hash]` placeholders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
  template: String,
}

impl FilenameTemplate {
  pub fn new(template: impl Into<String>) -> Self {
    Self { template: template.into() }
  }

  pub fn template(&self) -> &str {
    &self.template
  }

  pub fn has_hash_pattern(&self) -> bool {
    self.template.contains("[hash]")
  }

  pub fn render(&self, name: &str, hash: Option<&str>) -> String {
    let rendered = self.template.replace("[name]", name);
    match hash {
      Some(hash) => rendered.replace("[hash]", hash),
      None => rendered,
    }
  }
}

impl From<String> for FilenameTemplate {
  fn from(template: String) -> Self {
    Self::new(template)
  }
}

#[test]
fn test_render() {
  let template = FilenameTemplate::new("[name]-[hash].js");
  assert!(template.has_hash_pattern());
  assert_eq!(template.render("index", Some("a1b2c3d4")), "index-a1b2c3d4.js");
  assert_eq!(FilenameTemplate::new("[name].js").render("about", Some("x")), "about.js");
}
