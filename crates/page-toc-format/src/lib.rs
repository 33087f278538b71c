//! Output formatters for page-toc commands.

use std::path::PathBuf;

use page_toc_builder::{TocEntry, TocTree};
use serde::Serialize;

/// Output formats supported by `page-toc outline`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutlineFormat {
    Plain,
    Json,
}

/// A page whose markup differs once the navigation is spliced in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageChange {
    pub path: PathBuf,
    /// Links in the generated navigation, nested ones included.
    pub entries: usize,
    /// Headings that received a generated id.
    pub assigned_ids: usize,
}

#[derive(Serialize)]
struct OutlineDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<&'a str>,
    entries: &'a [TocEntry],
}

/// Render the navigation tree a page would receive.
///
/// `label` names the page in JSON output; plain output is an indented bullet
/// list with one `- text (#target)` line per entry.
pub fn render_outline(
    tree: &TocTree,
    label: Option<&str>,
    format: OutlineFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutlineFormat::Plain => Ok(render_outline_plain(tree)),
        OutlineFormat::Json => {
            let document = OutlineDocument {
                path: label,
                entries: &tree.entries,
            };
            let mut rendered = serde_json::to_string_pretty(&document)?;
            rendered.push('\n');
            Ok(rendered)
        }
    }
}

fn render_outline_plain(tree: &TocTree) -> String {
    let mut output = String::new();
    for entry in &tree.entries {
        push_line(&mut output, 0, entry);
        for child in &entry.children {
            push_line(&mut output, 1, child);
        }
    }
    output
}

fn push_line(output: &mut String, depth: usize, entry: &TocEntry) {
    let indent = "  ".repeat(depth);
    output.push_str(&format!("{indent}- {} (#{})\n", entry.text, entry.target));
}

/// One line per changed page: `<verb> <path> (<n> entries, <m> new ids)`.
pub fn render_changes(changes: &[PageChange], verb: &str) -> String {
    let mut output = String::new();
    for change in changes {
        output.push_str(&format!(
            "{verb} {} ({} entries, {} new ids)\n",
            change.path.display(),
            change.entries,
            change.assigned_ids
        ));
    }
    output
}
