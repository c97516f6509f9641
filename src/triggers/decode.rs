//! HTML entity decoding and no-op detection for trigger text.

use regex::Regex;
use std::sync::LazyLock;

/// Entities left in exported trigger text.
const ENTITIES: &[(&str, char)] = &[
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&#10;", '\n'),
    ("&#13;", '\r'),
];

static DO_KEY_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)^do_key\s*\(\s*'[^']*'\s*\)\s*;?$").unwrap());

/// Replace the fixed entity set in one left-to-right pass.
///
/// Output of one entity is never re-read, so `&amp;lt;` becomes `&lt;`.
pub fn decode_entities(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES.iter().find(|(entity, _)| rest.starts_with(entity)) {
            Some((entity, ch)) => {
                out.push(*ch);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// True for trigger bodies that only restate the default behavior:
/// `null;` or a single `do_key('...')`.
pub fn is_no_op(decoded: &str) -> bool {
    let trimmed = decoded.trim();
    trimmed.eq_ignore_ascii_case("null;") || DO_KEY_ONLY.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a &lt; b &amp; c &gt; d", "a < b & c > d")]
    #[case("say &quot;hi&quot; &#39;x&#39;", "say \"hi\" 'x'")]
    #[case("line1&#10;line2&#13;&#10;", "line1\nline2\r\n")]
    #[case("&amp;lt;", "&lt;")]
    #[case("a & b", "a & b")]
    #[case("&unknown;", "&unknown;")]
    #[case("trailing &", "trailing &")]
    fn test_decode_entities(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(decode_entities(Some(raw)), expected);
    }

    #[test]
    fn test_decode_missing_text() {
        assert_eq!(decode_entities(None), "");
    }

    #[rstest]
    #[case("null;", true)]
    #[case("  NULL;\n", true)]
    #[case("do_key('commit_form');", true)]
    #[case("DO_KEY ( 'NEXT_ITEM' )", true)]
    #[case("null; go_block('B');", false)]
    #[case("", false)]
    fn test_is_no_op(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(is_no_op(text), expected);
    }
}
