use roxmltree::Node;
use thiserror::Error;

use crate::style::{Color, FontFamily, Style};
use crate::text::layout::LayoutOptions;
use crate::text::span::TextSpan;

/// Errors produced while turning markup into text spans.
#[derive(Debug, Error)]
pub enum MarkupError {
    #[error("failed to parse markup document: {0}")]
    Document(#[from] roxmltree::Error),

    #[error("unexpected element <{0}> in paragraph content")]
    UnexpectedElement(String),

    #[error("missing required attribute `{attribute}` on <{element}>")]
    MissingAttribute {
        element: String,
        attribute: &'static str,
    },

    #[error("invalid value `{value}` for attribute `{attribute}`")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
}

/// Parses a standalone markup document into a paragraph style and spans.
///
/// Convenience wrapper around [`parse_spans`] for callers holding raw
/// markup text rather than an element tree.
pub fn parse_document(
    source: &str,
    base: &Style,
    options: &LayoutOptions,
) -> Result<(Style, Vec<TextSpan>), MarkupError> {
    let document = roxmltree::Document::parse(source)?;
    parse_spans(document.root_element(), base, options)
}

/// Walks the children of `node` and produces the paragraph's spans.
///
/// `node` itself is the paragraph element; its style attributes are applied
/// on top of `base` and the result becomes the paragraph's default style,
/// inherited by every child span. Recognized children are text runs,
/// `<b>`, `<i>`, `<u>`, `<tt>`, `<span>`, `<a href>`, and `<li>`.
pub fn parse_spans(
    node: Node<'_, '_>,
    base: &Style,
    options: &LayoutOptions,
) -> Result<(Style, Vec<TextSpan>), MarkupError> {
    let style = apply_attributes(node, base.clone())?;
    let mut spans = Vec::new();
    collect(node, &style, options, &mut spans)?;
    Ok((style, spans))
}

fn collect(
    node: Node<'_, '_>,
    inherited: &Style,
    options: &LayoutOptions,
    out: &mut Vec<TextSpan>,
) -> Result<(), MarkupError> {
    for child in node.children() {
        if child.is_text() {
            if let Some(text) = child.text()
                && !text.is_empty()
            {
                out.push(TextSpan::new(text, inherited.clone()));
            }
            continue;
        }
        if !child.is_element() {
            continue;
        }

        match child.tag_name().name() {
            "b" => {
                let style = Style {
                    bold: true,
                    ..inherited.clone()
                };
                collect(child, &apply_attributes(child, style)?, options, out)?;
            }
            "i" => {
                let style = Style {
                    italic: true,
                    ..inherited.clone()
                };
                collect(child, &apply_attributes(child, style)?, options, out)?;
            }
            "u" => {
                let style = Style {
                    underline: true,
                    ..inherited.clone()
                };
                collect(child, &apply_attributes(child, style)?, options, out)?;
            }
            "tt" => {
                let style = Style {
                    family: FontFamily::Monospace,
                    ..inherited.clone()
                };
                collect(child, &apply_attributes(child, style)?, options, out)?;
            }
            "span" => {
                collect(child, &apply_attributes(child, inherited.clone())?, options, out)?;
            }
            "a" => {
                let href = child.attribute("href").ok_or_else(|| {
                    MarkupError::MissingAttribute {
                        element: "a".to_string(),
                        attribute: "href",
                    }
                })?;
                let style = Style {
                    href: Some(href.to_string()),
                    underline: true,
                    ..inherited.clone()
                };
                collect(child, &apply_attributes(child, style)?, options, out)?;
            }
            "li" => {
                let style = Style {
                    indent: inherited.indent + options.list_indent,
                    href: None,
                    ..inherited.clone()
                };
                let style = apply_attributes(child, style)?;
                out.push(TextSpan::new(&options.bullet, style.clone()));
                collect(child, &style, options, out)?;
            }
            other => return Err(MarkupError::UnexpectedElement(other.to_string())),
        }
    }
    Ok(())
}

/// Applies the style attributes of `node` on top of `style`.
///
/// Unknown attributes are ignored so grammars can carry data this engine
/// does not interpret; malformed values of known attributes are errors.
fn apply_attributes(node: Node<'_, '_>, mut style: Style) -> Result<Style, MarkupError> {
    for attribute in node.attributes() {
        match attribute.name() {
            "size" => {
                style.size = attribute.value().parse::<f32>().map_err(|_| {
                    MarkupError::InvalidAttribute {
                        attribute: "size",
                        value: attribute.value().to_string(),
                    }
                })?;
            }
            "color" => {
                style.color = Color::from_hex(attribute.value()).ok_or_else(|| {
                    MarkupError::InvalidAttribute {
                        attribute: "color",
                        value: attribute.value().to_string(),
                    }
                })?;
            }
            "face" => {
                style.family = FontFamily::from_name(attribute.value());
            }
            _ => {}
        }
    }
    Ok(style)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (Style, Vec<TextSpan>) {
        parse_document(source, &Style::default(), &LayoutOptions::default())
            .expect("markup should parse")
    }

    #[test]
    fn test_plain_text() {
        let (style, spans) = parse("<p>Hello   world!</p>");
        assert_eq!(style, Style::default());
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text(), "Hello world!");
    }

    #[test]
    fn test_nested_styles_inherit() {
        let (_, spans) = parse(r##"<p color="#ff0000">plain <b>bold <i>both</i></b></p>"##);
        assert_eq!(spans.len(), 3);
        let red = Color::rgb(255, 0, 0);
        assert_eq!(spans[0].style.color, red);
        assert!(!spans[0].style.bold);
        assert!(spans[1].style.bold && !spans[1].style.italic);
        assert!(spans[2].style.bold && spans[2].style.italic);
        assert_eq!(spans[2].style.color, red);
        assert_eq!(spans[2].text(), "both");
    }

    #[test]
    fn test_root_attributes_become_paragraph_style() {
        let (style, _) = parse(r#"<p size="20" face="serif">text</p>"#);
        assert_eq!(style.size, 20.0);
        assert_eq!(style.family, FontFamily::Serif);
    }

    #[test]
    fn test_link_carries_href_and_underline() {
        let (_, spans) = parse(r#"<p>go <a href="market">to market</a></p>"#);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].style.href.as_deref(), Some("market"));
        assert!(spans[1].style.underline);
        assert!(spans[1].style.is_link());
    }

    #[test]
    fn test_link_without_href_is_an_error() {
        let result = parse_document(
            "<p><a>broken</a></p>",
            &Style::default(),
            &LayoutOptions::default(),
        );
        assert!(matches!(
            result,
            Err(MarkupError::MissingAttribute { attribute: "href", .. })
        ));
    }

    #[test]
    fn test_list_item_gets_bullet_and_indent() {
        let (_, spans) = parse("<p><li>first</li><li>second</li></p>");
        assert_eq!(spans.len(), 4);
        assert_eq!(spans[0].text(), "\u{2022} ");
        assert_eq!(spans[0].style.indent, 18.0);
        assert_eq!(spans[1].text(), "first");
        assert_eq!(spans[1].style.indent, 18.0);
        assert_eq!(spans[3].text(), "second");
    }

    #[test]
    fn test_monospace_element() {
        let (_, spans) = parse("<p><tt>ls -l</tt></p>");
        assert_eq!(spans[0].style.family, FontFamily::Monospace);
    }

    #[test]
    fn test_invalid_color_is_an_error() {
        let result = parse_document(
            r#"<p color="red">text</p>"#,
            &Style::default(),
            &LayoutOptions::default(),
        );
        assert!(matches!(
            result,
            Err(MarkupError::InvalidAttribute { attribute: "color", .. })
        ));
    }

    #[test]
    fn test_unknown_element_is_an_error() {
        let result = parse_document(
            "<p><video/></p>",
            &Style::default(),
            &LayoutOptions::default(),
        );
        assert!(matches!(result, Err(MarkupError::UnexpectedElement(name)) if name == "video"));
    }

    #[test]
    fn test_malformed_document_propagates() {
        let result = parse_document(
            "<p>unterminated",
            &Style::default(),
            &LayoutOptions::default(),
        );
        assert!(matches!(result, Err(MarkupError::Document(_))));
    }

    #[test]
    fn test_whitespace_between_spans_is_preserved_once() {
        let (_, spans) = parse("<p>before <b>bold</b> after</p>");
        assert_eq!(spans[0].text(), "before ");
        assert_eq!(spans[1].text(), "bold");
        assert_eq!(spans[2].text(), " after");
    }
}
