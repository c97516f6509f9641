use super::resolve::{resolve_attribute, resolve_bool, resolve_int};

/// An owned XML element: qualified tag name, attributes in document
/// order, and child elements. Text content is not retained; FMB exports
/// carry all data in attributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct XmlElement {
    /// Qualified tag name as written (`Block`, `fm:Block`).
    pub name: String,
    /// Qualified attribute names with their unescaped values.
    pub attributes: Vec<(String, String)>,
    /// Child elements in document order.
    pub children: Vec<XmlElement>,
}

/// Strip a namespace prefix: `ns:Name` -> `Name`.
pub fn local_part(name: &str) -> &str {
    name.rsplit_once(':').map_or(name, |(_, local)| local)
}

impl XmlElement {
    /// Create an element with no attributes or children.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Add an attribute (builder style).
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Add a child element (builder style).
    pub fn with_child(mut self, child: XmlElement) -> Self {
        self.children.push(child);
        self
    }

    // ── Identity ────────────────────────────────────────────────────

    /// Tag name without namespace prefix.
    pub fn local_name(&self) -> &str {
        local_part(&self.name)
    }

    /// The namespace prefix, if the tag has one.
    pub fn prefix(&self) -> Option<&str> {
        self.name.rsplit_once(':').map(|(prefix, _)| prefix)
    }

    /// True if the local tag name matches, ignoring ASCII case.
    pub fn is_named(&self, local: &str) -> bool {
        self.local_name().eq_ignore_ascii_case(local)
    }

    // ── Navigation ──────────────────────────────────────────────────

    /// Children whose local name matches, in document order.
    pub fn children_named<'a>(&'a self, local: &'a str) -> impl Iterator<Item = &'a XmlElement> + 'a {
        self.children.iter().filter(move |c| c.is_named(local))
    }

    /// First child whose local name matches.
    pub fn child(&self, local: &str) -> Option<&XmlElement> {
        self.children.iter().find(|c| c.is_named(local))
    }

    // ── Attributes ──────────────────────────────────────────────────

    /// Attribute lookup by exact qualified name, without layer resolution.
    pub fn raw_attr(&self, qualified: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == qualified)
            .map(|(_, value)| value.as_str())
    }

    /// Effective value of a logical attribute across override layers.
    pub fn attr(&self, logical: &str) -> Option<&str> {
        resolve_attribute(self, logical)
    }

    /// Effective value, treating an empty string as absent.
    pub fn attr_non_empty(&self, logical: &str) -> Option<&str> {
        self.attr(logical).filter(|value| !value.is_empty())
    }

    /// Effective value parsed as an integer.
    pub fn attr_int(&self, logical: &str) -> Option<i64> {
        resolve_int(self, logical)
    }

    /// Effective value parsed as a boolean.
    pub fn attr_bool(&self, logical: &str) -> Option<bool> {
        resolve_bool(self, logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_name_strips_prefix() {
        assert_eq!(XmlElement::new("fm:Block").local_name(), "Block");
        assert_eq!(XmlElement::new("Block").local_name(), "Block");
        assert_eq!(XmlElement::new("fm:Block").prefix(), Some("fm"));
        assert_eq!(XmlElement::new("Block").prefix(), None);
    }

    #[test]
    fn test_children_named_is_prefix_agnostic_and_ordered() {
        let el = XmlElement::new("FormModule")
            .with_child(XmlElement::new("Block").with_attr("Name", "A"))
            .with_child(XmlElement::new("Canvas").with_attr("Name", "C"))
            .with_child(XmlElement::new("x:Block").with_attr("Name", "B"));

        let names: Vec<_> = el.children_named("Block").filter_map(|b| b.attr("Name")).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(el.child("Canvas").and_then(|c| c.attr("Name")), Some("C"));
        assert!(el.child("LOV").is_none());
    }
}
