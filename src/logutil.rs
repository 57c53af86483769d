//! Logging helpers for admin-typed text.
//! Tokens and patterns come straight from chat, so they are escaped before
//! they reach a log line.

/// Log target for balance changes; the binary routes it to the audit file.
pub const AUDIT_TARGET: &str = "audit";

/// Longest token preview written to the log, in characters.
pub const MAX_LOG_PREVIEW: usize = 120;

/// Escape a string for single-line logging:
/// - `\n`, `\r`, `\t` become their backslash escapes
/// - backslash is doubled
/// - other control characters become `\xNN`
///
/// Text longer than [`MAX_LOG_PREVIEW`] characters is cut with an ellipsis.
pub fn escape_log(s: &str) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(s.len().min(MAX_LOG_PREVIEW) + 4);
    for (count, ch) in s.chars().enumerate() {
        if count >= MAX_LOG_PREVIEW {
            out.push('…');
            break;
        }
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02X}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Render a list of names for an audit line, e.g. `[Gold, Old Credit]`.
pub fn name_list<I, S>(names: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let joined = names
        .into_iter()
        .map(|name| escape_log(name.as_ref()))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{}]", joined)
}
