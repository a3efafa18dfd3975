//! Content rendering: markdown to HTML fragments, HTML copied as-is.

use std::fs;
use std::path::Path;

use pulldown_cmark::{Options, Parser, html};

use super::SiteError;
use crate::core::SourceType;

/// Markdown extensions enabled for content pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub footnotes: bool,
    pub strikethrough: bool,
    pub task_lists: bool,
    /// `# Heading {#custom-id}`
    pub heading_attributes: bool,
}

impl MarkdownOptions {
    pub const fn all() -> Self {
        Self {
            tables: true,
            footnotes: true,
            strikethrough: true,
            task_lists: true,
            heading_attributes: true,
        }
    }

    fn to_pulldown_options(self) -> Options {
        let mut opts = Options::empty();
        if self.tables {
            opts.insert(Options::ENABLE_TABLES);
        }
        if self.footnotes {
            opts.insert(Options::ENABLE_FOOTNOTES);
        }
        if self.strikethrough {
            opts.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.task_lists {
            opts.insert(Options::ENABLE_TASKLISTS);
        }
        if self.heading_attributes {
            opts.insert(Options::ENABLE_HEADING_ATTRIBUTES);
        }
        opts
    }
}

/// Render markdown source to an HTML fragment.
pub fn render_markdown(source: &str, options: MarkdownOptions) -> String {
    let parser = Parser::new_ext(source, options.to_pulldown_options());
    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

/// Render one content file to `dest`, creating parent directories.
pub fn write_content(source: &Path, source_type: SourceType, dest: &Path) -> Result<(), SiteError> {
    let text = fs::read_to_string(source).map_err(|e| SiteError::Io(source.to_path_buf(), e))?;
    let html = match source_type {
        SourceType::Md => render_markdown(&text, MarkdownOptions::all()),
        SourceType::Html => text,
        SourceType::Js => return Err(SiteError::NotContent(source.to_path_buf())),
    };

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| SiteError::Io(parent.to_path_buf(), e))?;
    }
    fs::write(dest, html).map_err(|e| SiteError::Io(dest.to_path_buf(), e))
}
