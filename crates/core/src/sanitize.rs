//! HTML sanitizing for admin-authored rich text.

use ammonia::Builder;
use maplit::{hashmap, hashset};

/// Strip everything outside the rich-text allow-list.
///
/// Disallowed tags are removed but their text content is kept. Empty input
/// yields an empty string.
pub fn sanitize_html(html: &str) -> String {
    if html.trim().is_empty() {
        return String::new();
    }
    Builder::new()
        .tags(hashset![
            "p", "br", "strong", "em", "u", "h1", "h2", "h3", "h4", "h5", "h6",
            "ul", "ol", "li", "a", "img", "table", "tr", "td", "th", "thead", "tbody",
            "blockquote", "pre", "code", "hr", "div", "span",
        ])
        .tag_attributes(hashmap![
            "a" => hashset!["href", "title", "target", "rel"],
            "img" => hashset!["src", "alt", "title", "width", "height"],
        ])
        .generic_attributes(hashset!["class", "id", "style"])
        // `rel` is author-controlled on links.
        .link_rel(None)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_scripts_and_handlers() {
        let out = sanitize_html(r#"<p onclick="x()">Hi<script>alert(1)</script></p>"#);
        assert_eq!(out, "<p>Hi</p>");
    }

    #[test]
    fn keeps_allowed_markup() {
        let html = r#"<table class="t"><tbody><tr><td style="color: red">25</td></tr></tbody></table>"#;
        assert_eq!(sanitize_html(html), html);
    }

    #[test]
    fn keeps_link_attributes() {
        let out = sanitize_html(r#"<a href="/catalog/" target="_blank" rel="nofollow">c</a>"#);
        assert!(out.contains(r#"href="/catalog/""#));
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="nofollow""#));
    }

    #[test]
    fn strips_unknown_tags_but_keeps_text() {
        assert_eq!(sanitize_html("<section>text</section>"), "text");
        assert_eq!(sanitize_html("   "), "");
    }
}
