//! Derive a node configuration from the headings of a Markdown outline.

use std::path::Path;

use serde_json::{json, Map, Value};

use crate::error::SlideError;

/// Parse a `#`..`######` heading line into its level and trimmed title.
fn parse_heading(line: &str) -> Option<(usize, &str)> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if !(1..=6).contains(&level) {
        return None;
    }
    let rest = &line[level..];
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let title = rest.trim();
    (!title.is_empty()).then_some((level, title))
}

/// Build `{ "nodes": { title: { "images": [...] } } }` from `markdown`.
///
/// Every heading counts towards the slide number; top-level headings are the
/// root of the mind map and get no node. A repeated title keeps its first
/// position and takes the later image.
#[must_use]
pub fn config_from_markdown(markdown: &str) -> Value {
    let mut nodes = Map::new();
    let headings = markdown.lines().filter_map(|line| parse_heading(line.trim_end_matches('\r')));
    for (i, (level, title)) in headings.enumerate() {
        if level == 1 {
            continue;
        }
        let image = format!("/images/slide_{}.png", i + 1);
        nodes.insert(title.to_string(), json!({ "images": [image] }));
    }
    json!({ "nodes": nodes })
}

/// Read `markdown_path`, derive the node configuration and write it as
/// pretty JSON to `config_path`. Returns the number of nodes written.
///
/// # Errors
///
/// Returns an error if the outline cannot be read or the config cannot be
/// written.
pub fn write_config(markdown_path: &Path, config_path: &Path) -> Result<usize, SlideError> {
    let markdown = std::fs::read_to_string(markdown_path)?;
    let config = config_from_markdown(&markdown);
    let count = config["nodes"].as_object().map_or(0, Map::len);

    if let Some(parent) = config_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(&config).map_err(std::io::Error::other)?;
    std::fs::write(config_path, body)?;

    tracing::debug!(path = %config_path.display(), count, "wrote node config");
    Ok(count)
}
