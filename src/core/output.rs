//! Compact output rendering helpers for CLI surfaces.
//!
//! Keeps command result output bounded and readable while preserving signal.

/// Collapse newlines/extra whitespace and bound length for terminal display.
pub fn compact_line(input: &str, max_chars: usize) -> String {
    let collapsed = input.split_whitespace().collect::<Vec<_>>().join(" ");
    let mut chars = collapsed.chars();
    let preview: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", preview)
    } else {
        preview
    }
}

/// Render a numbered list of diagnostic messages, one per line. Individual
/// messages are collapsed and bounded so a pathological diagnostic cannot
/// flood the terminal.
pub fn numbered_list(messages: &[String]) -> String {
    messages
        .iter()
        .enumerate()
        .map(|(i, message)| format!("  {}. {}", i + 1, compact_line(message, 240)))
        .collect::<Vec<_>>()
        .join("\n")
}
