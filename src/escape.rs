/// Escape text for safe inclusion in HTML content or a quoted attribute value.
///
/// Replaces `& < > " '` in a single pass. Already-escaped input is escaped again
/// (`&lt;` becomes `&amp;lt;`), so call this exactly once, at the point of emission.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
