//! Mermaid flowchart rendering
//!
//! Renders a step breakdown as a top-down Mermaid `flowchart`: one node per
//! step in input order, then one edge per dependency in input order. Layout
//! is left to whatever consumes the text.

use stepwise_types::Step;

/// Header line of every rendered diagram
pub const FLOWCHART_HEADER: &str = "flowchart TD";

/// Maximum number of description characters shown on a node
pub const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Render `steps` as Mermaid flowchart text
///
/// Every line, including the last, ends with `\n`. Ids are emitted as-is
/// and dependencies are not checked against the step list, so dangling,
/// duplicate and cyclic edges all render.
pub fn render_mermaid(steps: &[Step]) -> String {
    let mut diagram = String::with_capacity(64 * (steps.len() + 1));
    diagram.push_str(FLOWCHART_HEADER);
    diagram.push('\n');

    for step in steps {
        diagram.push_str(&node_line(step));
        diagram.push('\n');
    }

    for step in steps {
        for dependency in &step.dependencies {
            diagram.push_str(&format!("  {dependency} --> {}\n", step.id));
        }
    }

    diagram
}

fn node_line(step: &Step) -> String {
    let title = escape_label(&step.title);
    let description = escape_label(truncate_chars(&step.description, DESCRIPTION_PREVIEW_CHARS));
    format!("  {}[\"<b>{title}</b><br/>{description}\"]", step.id)
}

/// Replace double quotes so the text stays inside a quoted Mermaid label
pub fn escape_label(text: &str) -> String {
    text.replace('"', "&quot;")
}

/// First `max_chars` characters of `text`, cut without regard to words
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
