//! quick-xml event loop that builds an [`XmlElement`] tree.

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use super::XmlElement;
use crate::error::{FormsError, Result};

/// Read a complete document into an element tree.
///
/// Fails when the text is not well-formed: syntax errors, mismatched or
/// unclosed tags, no root element, or more than one root element.
pub fn read_document(input: &str) -> Result<XmlElement> {
    let mut reader = Reader::from_str(input);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                ensure_single_root(&root, &stack)?;
                stack.push(element_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing element - handle as start + end
                ensure_single_root(&root, &stack)?;
                let element = element_from_start(e)?;
                attach(element, &mut stack, &mut root);
            }
            Ok(Event::End(_)) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| FormsError::xml("closing tag without matching start"))?;
                attach(element, &mut stack, &mut root);
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(FormsError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(FormsError::xml(format!("unclosed element <{}>", open.name)));
    }

    root.ok_or_else(|| FormsError::xml("document has no root element"))
}

fn ensure_single_root(root: &Option<XmlElement>, stack: &[XmlElement]) -> Result<()> {
    if stack.is_empty() && root.is_some() {
        return Err(FormsError::xml("document has more than one root element"));
    }
    Ok(())
}

fn attach(element: XmlElement, stack: &mut [XmlElement], root: &mut Option<XmlElement>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

fn element_from_start(e: &BytesStart<'_>) -> Result<XmlElement> {
    let name = std::str::from_utf8(e.name().as_ref())
        .map_err(|e| FormsError::xml(format!("Invalid tag name: {e}")))?
        .to_string();

    let mut attributes = Vec::new();
    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| FormsError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| FormsError::xml(format!("Attribute key error: {e}")))?
            .to_string();
        let value = attr
            .unescape_value()
            .map_err(|e| FormsError::xml(format!("Attribute value error: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(XmlElement {
        name,
        attributes,
        children: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_nested_elements_in_order() {
        let doc = r#"<Module Name="M"><Block Name="A"><Item Name="X"/></Block><Block Name="B"/></Module>"#;
        let root = read_document(doc).unwrap();
        assert_eq!(root.name, "Module");
        assert_eq!(root.children.len(), 2);
        assert_eq!(root.children[0].children[0].attr("Name"), Some("X"));
        assert_eq!(root.children[1].attr("Name"), Some("B"));
    }

    #[test]
    fn test_attribute_values_are_unescaped_once() {
        let doc = r#"<Trigger TriggerText="a &lt; b&#10;c &amp;lt; d"/>"#;
        let root = read_document(doc).unwrap();
        assert_eq!(root.attr("TriggerText"), Some("a < b\nc &lt; d"));
    }

    #[test]
    fn test_rejects_malformed_documents() {
        assert!(read_document("<Module><Block></Module>").is_err());
        assert!(read_document("<Module>").is_err());
        assert!(read_document("not xml at all").is_err());
        assert!(read_document("").is_err());
        assert!(read_document("<A/><B/>").is_err());
    }
}
