use std::path::Path;

use anyhow::{anyhow, Result};
use include_dir::{include_dir, Dir};

use branch_namer::dom::{Page, PageFormat};

static TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

pub(crate) const SAMPLE_PAGE: &str = "branch-name.yaml";

pub(crate) fn sample_page_text() -> Result<&'static str> {
    TEMPLATES
        .get_file(SAMPLE_PAGE)
        .and_then(|f| f.contents_utf8())
        .ok_or_else(|| anyhow!("Embedded page missing: {SAMPLE_PAGE}"))
}

/// Load `path`, or the embedded sample page when no path is given.
pub(crate) fn load_page(path: Option<&Path>) -> Result<Page> {
    match path {
        Some(p) => Page::load(p),
        None => Page::parse(sample_page_text()?, PageFormat::Yaml),
    }
}
