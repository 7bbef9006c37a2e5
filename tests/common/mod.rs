#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

pub const TICKET_PAGE: &str = r#"elements:
  - tag: div
    attrs: { data-branch-name-generator: "" }
    children:
      - tag: form
        attrs: { data-form: "" }
        children:
          - { tag: input, attrs: { name: project }, value: core }
          - { tag: input, attrs: { name: ticket_type }, value: feature }
          - { tag: input, attrs: { name: description }, value: " add   login " }
      - { tag: code, attrs: { data-output-area: "" } }
      - { tag: span, attrs: { data-success-msg: "", hidden: "" }, text: "Copied!" }
"#;

pub const NESTED_PAGE: &str = r#"elements:
  - tag: section
    attrs: { data-branch-name-generator: "" }
    children:
      - tag: form
        attrs: { data-form: "" }
        children:
          - { tag: input, attrs: { name: project }, value: outer }
      - { tag: code, attrs: { data-output-area: "" } }
      - tag: div
        attrs: { data-branch-name-generator: "" }
        children:
          - tag: form
            attrs: { data-form: "" }
            children:
              - { tag: input, attrs: { name: project }, value: inner }
          - { tag: code, attrs: { data-output-area: "" } }
"#;

pub fn write_page(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}
