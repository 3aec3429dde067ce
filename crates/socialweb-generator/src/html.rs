//! Post-processing for the HTML generation reply.

/// Strip markdown fences and any text around the HTML document.
///
/// Keeps everything from the first `<!DOCTYPE html>` (case-insensitive) to the
/// end of the last `</html>`. Either boundary is left alone when absent.
#[must_use]
pub fn clean_html(raw: &str) -> String {
    let mut text = raw.trim();
    for fence in ["```html", "```HTML", "```"] {
        if let Some(rest) = text.strip_prefix(fence) {
            text = rest;
            break;
        }
    }
    if let Some(rest) = text.trim_end().strip_suffix("```") {
        text = rest;
    }

    let lower = text.to_ascii_lowercase();
    let start = lower.find("<!doctype html").unwrap_or(0);
    let end = lower
        .rfind("</html>")
        .map_or(text.len(), |i| i + "</html>".len())
        .max(start);

    text[start..end].trim().to_owned()
}

/// Whether `html` looks like a full document rather than a refusal or fragment.
#[must_use]
pub fn is_html_document(html: &str) -> bool {
    html.to_ascii_lowercase().contains("<html")
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "<!DOCTYPE html>\n<html><head></head><body>Hola</body></html>";

    #[test]
    fn strips_fences() {
        assert_eq!(clean_html(&format!("```html\n{DOC}\n```")), DOC);
        assert_eq!(clean_html(&format!("```\n{DOC}\n```")), DOC);
    }

    #[test]
    fn drops_preamble_and_trailing_commentary() {
        let raw = format!("Here is your page:\n\n{DOC}\n\nLet me know if you want changes.");
        assert_eq!(clean_html(&raw), DOC);
    }

    #[test]
    fn doctype_match_is_case_insensitive() {
        let raw = "ok <!doctype html><html></html> bye";
        assert_eq!(clean_html(raw), "<!doctype html><html></html>");
    }

    #[test]
    fn keeps_text_without_boundaries() {
        assert_eq!(clean_html("  <html><body>x</body>  "), "<html><body>x</body>");
        assert!(!is_html_document(&clean_html("I cannot help with that.")));
    }

    #[test]
    fn uses_last_closing_tag() {
        let raw = "<!DOCTYPE html><html><body><pre></html></pre></body></html>\ntrailing";
        assert_eq!(
            clean_html(raw),
            "<!DOCTYPE html><html><body><pre></html></pre></body></html>"
        );
    }
}
