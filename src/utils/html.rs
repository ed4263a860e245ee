use std::fmt::Write;

/// Escapes `& < > " '` for use in element content and quoted attributes.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Writes ` name="value"` with the value escaped.
pub fn push_attr(out: &mut String, name: &str, value: &str) {
    let _ = write!(out, " {}=\"{}\"", name, escape_html(value));
}

/// Writes the attribute only when a value is present.
pub fn push_opt_attr<T: ToString>(out: &mut String, name: &str, value: Option<T>) {
    if let Some(value) = value {
        push_attr(out, name, &value.to_string());
    }
}
