//! Page import from Markdown or plain text, and export to Markdown, HTML or JSON.

use std::fmt::Write as _;
use std::str::FromStr;

use crate::error::AppError;
use crate::models::page::{Block, BlockType, Page};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Html,
    Json,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "md",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Markdown => "text/markdown; charset=utf-8",
            ExportFormat::Html => "text/html; charset=utf-8",
            ExportFormat::Json => "application/json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "md" => Ok(ExportFormat::Markdown),
            "html" => Ok(ExportFormat::Html),
            "json" => Ok(ExportFormat::Json),
            _ => Err(AppError::BadRequest("Unsupported format".to_string())),
        }
    }
}

/// The filename without its last extension.
pub fn title_from_filename(filename: &str) -> String {
    match filename.rsplit_once('.') {
        Some((stem, _)) => stem.to_string(),
        None => filename.to_string(),
    }
}

/// `.md` files are split into blocks line by line; anything else becomes a
/// single text block.
pub fn import_blocks(filename: &str, content: &str) -> Vec<Block> {
    if !filename.ends_with(".md") {
        return vec![Block::new(BlockType::Text, content)];
    }
    content.split('\n').filter_map(parse_line).collect()
}

fn parse_line(line: &str) -> Option<Block> {
    let block = if let Some(rest) = line.strip_prefix("# ") {
        Block::new(BlockType::Heading1, rest)
    } else if let Some(rest) = line.strip_prefix("## ") {
        Block::new(BlockType::Heading2, rest)
    } else if let Some(rest) = line.strip_prefix("### ") {
        Block::new(BlockType::Heading3, rest)
    } else if let Some(rest) = line.strip_prefix("- [ ] ") {
        Block::todo(rest, false)
    } else if let Some(rest) = line.strip_prefix("- [x] ") {
        Block::todo(rest, true)
    } else if let Some(rest) = line.strip_prefix("- ") {
        Block::new(BlockType::Bullet, rest)
    } else if let Some(rest) = line.strip_prefix("> ") {
        Block::new(BlockType::Quote, rest)
    } else if line.trim() == "---" {
        Block::new(BlockType::Divider, "")
    } else if !line.trim().is_empty() {
        Block::new(BlockType::Text, line)
    } else {
        return None;
    };
    Some(block)
}

pub fn export(page: &Page, format: ExportFormat) -> Result<String, AppError> {
    match format {
        ExportFormat::Markdown => Ok(to_markdown(page)),
        ExportFormat::Html => Ok(to_html(page)),
        ExportFormat::Json => serde_json::to_string_pretty(page).map_err(|e| {
            tracing::error!("Failed to serialize page {}: {:?}", page.id, e);
            AppError::InternalServerError
        }),
    }
}

pub fn to_markdown(page: &Page) -> String {
    let mut out = format!("# {}\n\n", page.title);
    for block in &page.blocks {
        let content = &block.content;
        // Writing into a String cannot fail.
        let _ = match block.kind {
            BlockType::Heading1 => write!(out, "# {}\n\n", content),
            BlockType::Heading2 => write!(out, "## {}\n\n", content),
            BlockType::Heading3 => write!(out, "### {}\n\n", content),
            BlockType::Bullet => writeln!(out, "- {}", content),
            BlockType::Numbered => writeln!(out, "1. {}", content),
            BlockType::Todo => {
                let mark = if block.checked.unwrap_or(false) { 'x' } else { ' ' };
                writeln!(out, "- [{}] {}", mark, content)
            }
            BlockType::Quote => write!(out, "> {}\n\n", content),
            BlockType::Divider => write!(out, "---\n\n"),
            BlockType::Code => write!(
                out,
                "```{}\n{}\n```\n\n",
                block.language.as_deref().unwrap_or(""),
                content
            ),
            _ => write!(out, "{}\n\n", content),
        };
    }
    out
}

pub fn to_html(page: &Page) -> String {
    let title = escape_html(&page.title);
    let mut out = format!(
        "<!DOCTYPE html><html><head><title>{}</title></head><body><h1>{}</h1>",
        title, title
    );
    for block in &page.blocks {
        let content = escape_html(&block.content);
        let _ = match block.kind {
            BlockType::Heading1 => write!(out, "<h1>{}</h1>", content),
            BlockType::Heading2 => write!(out, "<h2>{}</h2>", content),
            BlockType::Heading3 => write!(out, "<h3>{}</h3>", content),
            BlockType::Bullet => write!(out, "<ul><li>{}</li></ul>", content),
            BlockType::Numbered => write!(out, "<ol><li>{}</li></ol>", content),
            BlockType::Todo => {
                let checked = if block.checked.unwrap_or(false) { "checked" } else { "" };
                write!(out, "<div><input type='checkbox' {}> {}</div>", checked, content)
            }
            BlockType::Quote => write!(out, "<blockquote>{}</blockquote>", content),
            BlockType::Divider => write!(out, "<hr>"),
            BlockType::Code => write!(out, "<pre><code>{}</code></pre>", content),
            _ => write!(out, "<p>{}</p>", content),
        };
    }
    out.push_str("</body></html>");
    out
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}
