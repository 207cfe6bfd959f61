/// Concatenates string-like values with a single allocation.
///
/// ```ignore
/// let filename = concat_string!(dir, "/", name, "-", hash, ".js");
/// ```
#[macro_export]
macro_rules! concat_string {
  () => { String::new() };
  ($($s:expr),+ $(,)?) => {{
    let mut buf = String::with_capacity(0 $(+ AsRef::<str>::as_ref(&$s).len())+);
    $(buf.push_str(AsRef::<str>::as_ref(&$s));)+
    buf
  }};
}

#[test]
fn test_concat_string() {
  let name = String::from("index");
  assert_eq!(concat_string!("static/", name, ".js"), "static/index.js");
  assert_eq!(concat_string!(), "");
}
