//! README preparation for inclusion in generated module documentation.

/// Heading level the shallowest README heading is normalized to.
const BASE_HEADING_LEVEL: usize = 3;

/// Deepest heading level Markdown supports.
const MAX_HEADING_LEVEL: usize = 6;

/// Prepares a module README body for splicing under the module heading.
///
/// The first heading is dropped when it is a top-level heading whose text
/// equals the module name (the generated document already opens with one).
/// The remaining headings are shifted so the shallowest sits at
/// [`BASE_HEADING_LEVEL`], deeper ones shifting by the same amount and
/// clamping at [`MAX_HEADING_LEVEL`]. Lines inside fenced code blocks are
/// never treated as headings. A body without headings comes back unchanged,
/// apart from the title removal and blank-edge trimming.
pub(crate) fn splice_readme(content: &str, module_name: &str) -> String {
    // Pass 1: keep lines, dropping one duplicate title (plus one blank line
    // after it), and record the position and level of every heading outside
    // code fences.
    let mut kept: Vec<&str> = Vec::new();
    let mut headings: Vec<(usize, usize)> = Vec::new();
    let mut in_fence = false;
    let mut first_heading_seen = false;
    let mut swallow_blank = false;
    for line in content.lines() {
        if swallow_blank {
            swallow_blank = false;
            if line.trim().is_empty() {
                continue;
            }
        }
        if is_fence_delimiter(line) {
            in_fence = !in_fence;
        } else if !in_fence {
            if let Some(level) = heading_level(line) {
                if !first_heading_seen {
                    first_heading_seen = true;
                    if level == 1 && line[1..].trim() == module_name {
                        swallow_blank = true;
                        continue;
                    }
                }
                headings.push((kept.len(), level));
            }
        }
        kept.push(line);
    }

    // Pass 2: renormalize heading levels around the shallowest one.
    let min_level = headings.iter().map(|&(_, level)| level).min();
    let mut lines: Vec<String> =
        kept.iter().map(|&line| line.to_owned()).collect();
    if let Some(min) = min_level {
        for &(index, level) in &headings {
            let target =
                (level - min + BASE_HEADING_LEVEL).min(MAX_HEADING_LEVEL);
            lines[index] =
                format!("{}{}", "#".repeat(target), &kept[index][level..]);
        }
    }

    while lines.first().is_some_and(|line| line.trim().is_empty()) {
        lines.remove(0);
    }
    while lines.last().is_some_and(|line| line.trim().is_empty()) {
        lines.pop();
    }
    lines.join("\n")
}

/// Returns the ATX heading level of a line, if it is one: one to six `#`
/// characters at column zero followed by whitespace or end of line.
fn heading_level(line: &str) -> Option<usize> {
    let hashes = line.bytes().take_while(|&byte| byte == b'#').count();
    if hashes == 0 || hashes > MAX_HEADING_LEVEL {
        return None;
    }
    let rest = &line[hashes..];
    if rest.is_empty() || rest.starts_with(' ') || rest.starts_with('\t') {
        Some(hashes)
    } else {
        None
    }
}

fn is_fence_delimiter(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.starts_with("```") || trimmed.starts_with("~~~")
}
