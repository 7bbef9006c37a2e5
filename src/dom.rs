use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Child-index address of an element below some root. The empty path is the root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodePath(Vec<usize>);

impl NodePath {
    pub fn root() -> Self {
        Self(Vec::new())
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for NodePath {
    fn from(indices: Vec<usize>) -> Self {
        Self(indices)
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("/");
        }
        for i in &self.0 {
            write!(f, "/{i}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub tag: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Live value of a form control; falls back to the `value` attribute when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Checkedness for checkbox/radio inputs, selectedness for `<option>`.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub checked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub disabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Element>,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Self::default()
        }
    }

    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attrs.insert(key.to_string(), value.to_string());
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn is(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_attr(&self, key: &str) -> bool {
        self.attrs.contains_key(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.attr("name").filter(|n| !n.is_empty())
    }

    /// Lowercased `type` attribute of an `<input>`; `text` when absent.
    pub fn input_type(&self) -> String {
        self.attr("type")
            .map(str::to_ascii_lowercase)
            .unwrap_or_else(|| "text".to_string())
    }

    pub fn is_visible(&self) -> bool {
        !self.has_attr("hidden")
    }

    pub fn set_visible(&mut self, visible: bool) {
        if visible {
            self.attrs.remove("hidden");
        } else {
            self.attrs.insert("hidden".to_string(), String::new());
        }
    }

    pub fn get(&self, path: &NodePath) -> Option<&Element> {
        let mut cur = self;
        for &i in path.indices() {
            cur = cur.children.get(i)?;
        }
        Some(cur)
    }

    pub fn get_mut(&mut self, path: &NodePath) -> Option<&mut Element> {
        let mut cur = self;
        for &i in path.indices() {
            cur = cur.children.get_mut(i)?;
        }
        Some(cur)
    }

    /// Paths of all descendants (not `self`) matching `pred`, in document order.
    pub fn find_paths<F>(&self, pred: F) -> Vec<NodePath>
    where
        F: Fn(&Element) -> bool,
    {
        let mut out = Vec::new();
        self.walk(&NodePath::root(), &pred, &mut out);
        out
    }

    pub fn find_by_attr(&self, attr: &str) -> Vec<NodePath> {
        self.find_paths(|e| e.has_attr(attr))
    }

    pub fn find_by_tags(&self, tags: &[&str]) -> Vec<NodePath> {
        self.find_paths(|e| tags.iter().any(|t| e.is(t)))
    }

    fn walk<F>(&self, at: &NodePath, pred: &F, out: &mut Vec<NodePath>)
    where
        F: Fn(&Element) -> bool,
    {
        for (i, child) in self.children.iter().enumerate() {
            let path = at.child(i);
            if pred(child) {
                out.push(path.clone());
            }
            child.walk(&path, pred, out);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFormat {
    Yaml,
    Json,
    Toml,
}

impl PageFormat {
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|s| s.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("json") => Self::Json,
            Some("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

/// A document: top-level elements in document order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    #[serde(default)]
    pub elements: Vec<Element>,
}

impl Page {
    pub fn parse(text: &str, format: PageFormat) -> Result<Self> {
        let page = match format {
            PageFormat::Yaml => serde_yaml::from_str(text).context("Invalid YAML page")?,
            PageFormat::Json => serde_json::from_str(text).context("Invalid JSON page")?,
            PageFormat::Toml => toml::from_str(text).context("Invalid TOML page")?,
        };
        Ok(page)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text, PageFormat::from_path(path))
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}
