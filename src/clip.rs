use std::path::PathBuf;

use anyhow::{Context, Result};

use branch_namer::clipboard::{Clipboard, ClipboardUnavailable};

/// Redirects copies into a file instead of the system clipboard.
pub(crate) const CLIPBOARD_FILE_ENV: &str = "BNG_CLIPBOARD_FILE";

/// System clipboard via arboard, or the file named by `BNG_CLIPBOARD_FILE`.
pub(crate) struct SystemClipboard;

impl SystemClipboard {
    fn write_file(path: PathBuf, text: &str) -> Result<()> {
        std::fs::write(&path, text)
            .map_err(|e| ClipboardUnavailable {
                reason: format!("{}: {e}", path.display()),
            })
            .with_context(|| format!("Failed to write {}", path.display()))
    }
}

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        if let Some(path) = std::env::var_os(CLIPBOARD_FILE_ENV) {
            tracing::debug!(path = %PathBuf::from(&path).display(), "copying into file");
            return Self::write_file(PathBuf::from(path), text);
        }
        let mut ctx = arboard::Clipboard::new().map_err(|e| ClipboardUnavailable {
            reason: format!("clipboard init: {e}"),
        })?;
        ctx.set_text(text.to_owned())
            .map_err(|e| ClipboardUnavailable {
                reason: format!("clipboard set: {e}"),
            })?;
        Ok(())
    }
}
