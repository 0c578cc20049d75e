//! Line-level formatting of declaration fragments and doc comments.

use symdoc_schemas::DeclarationFragment;

/// Concurrency annotations stripped from rendered declarations.
///
/// Each stripped fragment also swallows one immediately following
/// whitespace-only fragment so the remaining tokens rejoin cleanly.
const STRIPPED_ATTRIBUTES: &[&str] = &["@MainActor", "@preconcurrency", "nonisolated"];

/// Concatenates a symbol's declaration fragments into a single-line
/// declaration.
///
/// Fragments whose trimmed spelling is in [`STRIPPED_ATTRIBUTES`] are
/// dropped, together with one following whitespace-only fragment. When
/// `force_public` is set and the result does not already lead with `public`
/// or `open`, a `public ` prefix is added so the rendered interface reads
/// like a generated Swift interface file.
pub fn format_declaration(fragments: &[DeclarationFragment], force_public: bool) -> String {
    let mut declaration = String::new();
    let mut swallow_whitespace = false;
    for fragment in fragments {
        if swallow_whitespace {
            swallow_whitespace = false;
            if fragment.spelling.chars().all(char::is_whitespace) {
                continue;
            }
        }
        if STRIPPED_ATTRIBUTES.contains(&fragment.spelling.trim()) {
            swallow_whitespace = true;
            continue;
        }
        declaration.push_str(&fragment.spelling);
    }

    if force_public && !has_visibility_keyword(&declaration) {
        declaration.insert_str(0, "public ");
    }
    declaration
}

/// True when the declaration already opens with an explicit visibility
/// keyword, matched as a whole token rather than a string prefix.
fn has_visibility_keyword(declaration: &str) -> bool {
    matches!(
        declaration.trim_start().split_whitespace().next(),
        Some("public" | "open")
    )
}

/// Formats raw doc comment lines as `///` comments at the given indent.
///
/// Parameter documentation is omitted: a `- Parameters:` bullet drops every
/// line until the next top-level bullet that is not itself parameter
/// documentation, and standalone `- Parameter name:` bullets are dropped
/// individually. The summary and any `- Returns:` / `- Throws:` bullets are
/// kept.
///
/// Returns the empty string for symbols without documentation. Every emitted
/// line ends in a newline; empty doc lines render as a bare `///`.
pub fn format_doc_comment<'a>(lines: impl IntoIterator<Item = &'a str>, indent: &str) -> String {
    let mut formatted = String::new();
    let mut in_parameters = false;
    for line in lines {
        if in_parameters {
            if line.starts_with("- ") && !line.starts_with("- Parameter") {
                in_parameters = false;
            } else {
                continue;
            }
        }
        if line.starts_with("- Parameters:") {
            in_parameters = true;
            continue;
        }
        if line.starts_with("- Parameter ") {
            continue;
        }

        if line.is_empty() {
            formatted.push_str(indent);
            formatted.push_str("///\n");
        } else {
            formatted.push_str(indent);
            formatted.push_str("/// ");
            formatted.push_str(line);
            formatted.push('\n');
        }
    }
    formatted
}
