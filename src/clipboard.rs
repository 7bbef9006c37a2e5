use std::fmt;

use anyhow::Result;

use crate::dom::NodePath;

pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Debug)]
pub struct ClipboardUnavailable {
    pub reason: String,
}

impl fmt::Display for ClipboardUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Clipboard unavailable: {}", self.reason)
    }
}

impl std::error::Error for ClipboardUnavailable {}

/// Passed to the copy-success callback.
pub struct CopyEvent<'a> {
    pub text: &'a str,
    selection: &'a mut Option<NodePath>,
}

impl<'a> CopyEvent<'a> {
    pub fn new(text: &'a str, selection: &'a mut Option<NodePath>) -> Self {
        Self { text, selection }
    }

    pub fn clear_selection(&mut self) {
        self.selection.take();
    }
}

/// In-process clipboard. `unavailable()` builds one that rejects every write.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
    reject: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unavailable() -> Self {
        Self {
            contents: None,
            reject: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if self.reject {
            return Err(ClipboardUnavailable {
                reason: "copy rejected".to_string(),
            }
            .into());
        }
        self.contents = Some(text.to_string());
        Ok(())
    }
}
