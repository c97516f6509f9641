//! Layered attribute resolution.
//!
//! Oracle Forms exports one logical property as several physical
//! attributes, one per inheritance layer, distinguished by a
//! per-form namespace prefix:
//!
//! ```text
//! <Item Name="CODE"                              plain (already normalized)
//!       ORDERS_default:Prompt="Code"             library default
//!       ORDERS_inherited:Prompt="Item Code"      inherited from a property class
//!       ORDERS_overridden:Prompt="Order Code"/>  set on this instance
//! ```
//!
//! A plain attribute wins outright. Otherwise the most specific non-empty
//! layer wins: overridden > inherited > any other prefix > default.

use super::element::XmlElement;

/// Override layer encoded by an attribute's namespace prefix.
///
/// Variants are declared in priority order; `Ord` follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AttributeLayer {
    /// `<form>_overridden:` - explicitly set on this instance.
    Overridden,
    /// `<form>_inherited:` or `<form>_inherited_overridden:`.
    Inherited,
    /// Any other namespace prefix.
    Other,
    /// `<form>_default:` - library default.
    Default,
}

impl AttributeLayer {
    /// Classify a namespace prefix.
    pub fn from_prefix(prefix: &str) -> Self {
        let prefix = prefix.to_ascii_lowercase();
        if prefix.ends_with("_inherited") || prefix.ends_with("_inherited_overridden") {
            Self::Inherited
        } else if prefix.ends_with("_overridden") {
            Self::Overridden
        } else if prefix.ends_with("_default") {
            Self::Default
        } else {
            Self::Other
        }
    }
}

/// Effective value of `logical` on `element`.
pub fn resolve_attribute<'a>(element: &'a XmlElement, logical: &str) -> Option<&'a str> {
    if let Some(plain) = element.raw_attr(logical) {
        return Some(plain);
    }

    let mut best: Option<(AttributeLayer, &'a str)> = None;
    for (key, value) in &element.attributes {
        let Some((prefix, local)) = key.rsplit_once(':') else {
            continue;
        };
        if local != logical || value.is_empty() || prefix.starts_with("xmlns") {
            continue;
        }
        let layer = AttributeLayer::from_prefix(prefix);
        // First match within a layer wins
        if best.is_none_or(|(current, _)| layer < current) {
            best = Some((layer, value.as_str()));
        }
    }

    best.map(|(_, value)| value)
}

/// Effective value parsed as an integer.
///
/// `None` when the attribute is missing or not numeric; never a sentinel.
pub fn resolve_int(element: &XmlElement, logical: &str) -> Option<i64> {
    let raw = resolve_attribute(element, logical)?.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<i64>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(
                element = element.local_name(),
                attribute = logical,
                value = raw,
                "non-numeric integer attribute ignored"
            );
            None
        }
    }
}

/// Effective value parsed as a boolean (`true/false`, `yes/no`, `y/n`, `1/0`).
pub fn resolve_bool(element: &XmlElement, logical: &str) -> Option<bool> {
    let raw = resolve_attribute(element, logical)?.trim();
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        "" => None,
        _ => {
            tracing::warn!(
                element = element.local_name(),
                attribute = logical,
                value = raw,
                "unrecognized boolean attribute ignored"
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn item() -> XmlElement {
        XmlElement::new("Item")
    }

    #[test]
    fn test_overridden_beats_inherited_and_default() {
        let el = item()
            .with_attr("F_default:Prompt", "a")
            .with_attr("F_inherited:Prompt", "b")
            .with_attr("F_overridden:Prompt", "c");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("c"));
    }

    #[test]
    fn test_inherited_beats_default() {
        let el = item()
            .with_attr("F_default:Prompt", "a")
            .with_attr("F_inherited:Prompt", "b");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("b"));
    }

    #[test]
    fn test_inherited_overridden_counts_as_inherited() {
        let el = item()
            .with_attr("F_default:Prompt", "a")
            .with_attr("F_inherited_overridden:Prompt", "b");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("b"));

        let el = el.with_attr("F_overridden:Prompt", "c");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("c"));
    }

    #[test]
    fn test_other_prefix_sits_between_inherited_and_default() {
        let el = item()
            .with_attr("F_default:Prompt", "a")
            .with_attr("fm:Prompt", "z");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("z"));
    }

    #[test]
    fn test_plain_attribute_short_circuits() {
        let el = item()
            .with_attr("F_overridden:Prompt", "c")
            .with_attr("Prompt", "plain");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("plain"));
    }

    #[test]
    fn test_empty_layer_values_are_skipped() {
        let el = item()
            .with_attr("F_overridden:Prompt", "")
            .with_attr("F_default:Prompt", "a");
        assert_eq!(resolve_attribute(&el, "Prompt"), Some("a"));
    }

    #[test]
    fn test_local_name_must_match_exactly() {
        let el = item().with_attr("F_overridden:PromptColor", "red");
        assert_eq!(resolve_attribute(&el, "Prompt"), None);
    }

    #[rstest]
    #[case("120", Some(120))]
    #[case(" 30 ", Some(30))]
    #[case("abc", None)]
    #[case("", None)]
    fn test_resolve_int(#[case] raw: &str, #[case] expected: Option<i64>) {
        let el = item().with_attr("F_default:MaximumLength", raw);
        assert_eq!(resolve_int(&el, "MaximumLength"), expected);
    }

    #[test]
    fn test_resolve_int_missing() {
        assert_eq!(resolve_int(&item(), "MaximumLength"), None);
    }

    #[rstest]
    #[case("true", Some(true))]
    #[case("Yes", Some(true))]
    #[case("FALSE", Some(false))]
    #[case("0", Some(false))]
    #[case("maybe", None)]
    fn test_resolve_bool(#[case] raw: &str, #[case] expected: Option<bool>) {
        let el = item().with_attr("Required", raw);
        assert_eq!(resolve_bool(&el, "Required"), expected);
    }
}
