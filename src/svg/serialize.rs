//! SVG tree serialization.
//!
//! Writes an [`SvgElement`] back to markup. Output is compact: no indentation
//! and no whitespace between tags, childless elements self-close.

use super::ast::{SvgAstNode, SvgElement};

/// Serialize an element tree to an SVG string.
pub fn to_svg_string(root: &SvgElement) -> String {
    let mut out = String::with_capacity(1024);
    write_element(root, &mut out);
    out
}

fn write_element(elem: &SvgElement, out: &mut String) {
    out.push('<');
    out.push_str(&elem.tag_name);

    for (key, value) in &elem.attributes {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(value, true, out);
        out.push('"');
    }

    if elem.children.is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in &elem.children {
        match child {
            SvgAstNode::Element(e) => write_element(e, out),
            SvgAstNode::Text { value } => escape_into(value, false, out),
        }
    }
    out.push_str("</");
    out.push_str(&elem.tag_name);
    out.push('>');
}

/// Escape markup characters; quotes only matter inside attribute values.
fn escape_into(s: &str, attr: bool, out: &mut String) {
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::parse::parse;

    #[test]
    fn test_self_closing_and_nesting() {
        let tree = SvgElement::new("svg")
            .with_attr("viewBox", "0 0 1 1")
            .with_child(SvgElement::new("g").with_child(SvgElement::new("rect").with_attr("x", "0")));
        assert_eq!(
            to_svg_string(&tree),
            r#"<svg viewBox="0 0 1 1"><g><rect x="0"/></g></svg>"#
        );
    }

    #[test]
    fn test_escaping() {
        let tree = SvgElement::new("text")
            .with_attr("title", r#"say "a<b" & go"#)
            .with_child(SvgAstNode::text("1 < 2 & \"ok\""));
        assert_eq!(
            to_svg_string(&tree),
            r#"<text title="say &quot;a&lt;b&quot; &amp; go">1 &lt; 2 &amp; "ok"</text>"#
        );
    }

    #[test]
    fn test_reparse_is_stable() {
        let svg = r#"<svg viewBox="0 0 4 4"><g id="a"><path d="M0 0L4 4"/></g><text>a &amp; b</text></svg>"#;
        let once = to_svg_string(&parse(svg).unwrap());
        let twice = to_svg_string(&parse(&once).unwrap());
        assert_eq!(once, svg);
        assert_eq!(once, twice);
    }
}
