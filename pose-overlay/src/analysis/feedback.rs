//! Feedback panel markup

/// Render feedback lines as an HTML list. No feedback renders nothing.
pub fn feedback_markup(feedback: &[String]) -> String {
    if feedback.is_empty() {
        return String::new();
    }

    let mut html = String::from("<h3>Feedback</h3><ul class=\"feedback\">");
    for line in feedback {
        html.push_str("<li>");
        html.push_str(&escape_html(line));
        html.push_str("</li>");
    }
    html.push_str("</ul>");
    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
