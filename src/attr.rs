//! Attribute extraction and format checks shared by every element parser.

use once_cell::sync::Lazy;
use regex::Regex;
use roxmltree::Node;

use crate::error::{KgmlError, Result};

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(#[0-9A-Fa-f]{6}|none)$").expect("valid hex color pattern"));
static PATHWAY_ORG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z]{3}$").expect("valid org pattern"));
static PATHWAY_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{5}$").expect("valid number pattern"));

/// Fail with a contract violation unless `node` is a `<tag>` element.
pub(crate) fn expect_tag(node: &Node, tag: &'static str) -> Result<()> {
    if node.is_element() && node.has_tag_name(tag) {
        return Ok(());
    }
    let found = if node.is_element() {
        node.tag_name().name().to_string()
    } else {
        format!("{:?} node", node.node_type())
    };
    Err(KgmlError::UnexpectedElement {
        expected: tag,
        found,
    })
}

pub(crate) fn required<'a>(
    node: &Node<'a, '_>,
    element: &'static str,
    attribute: &'static str,
) -> Result<&'a str> {
    node.attribute(attribute)
        .ok_or(KgmlError::MissingAttribute { element, attribute })
}

pub(crate) fn optional<'a>(node: &Node<'a, '_>, attribute: &str) -> Option<&'a str> {
    node.attribute(attribute)
}

/// Child elements with the given tag, in document order.
pub(crate) fn children_named<'a, 'input: 'a>(
    node: &Node<'a, 'input>,
    tag: &'static str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && child.has_tag_name(tag))
}

fn invalid(element: &'static str, attribute: &'static str, value: &str, expected: &str) -> KgmlError {
    KgmlError::InvalidAttribute {
        element,
        attribute,
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

/// Parse a base-10 integer, rejecting partial or garbage text. A leading
/// `+` is refused so the written form is the canonical one.
pub(crate) fn parse_integer(element: &'static str, attribute: &'static str, value: &str) -> Result<i64> {
    if value.starts_with('+') {
        return Err(invalid(element, attribute, value, "an integer"));
    }
    value
        .parse::<i64>()
        .map_err(|_| invalid(element, attribute, value, "an integer"))
}

pub(crate) fn parse_optional_integer(
    node: &Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<Option<i64>> {
    optional(node, attribute)
        .map(|value| parse_integer(element, attribute, value))
        .transpose()
}

/// Numeric entry id reference, kept in its textual form. Digits only, so
/// it compares equal to the id of the entry it names.
pub(crate) fn check_numeric_id(element: &'static str, attribute: &'static str, value: &str) -> Result<()> {
    if !value.is_empty() && value.bytes().all(|byte| byte.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid(element, attribute, value, "a numeric entry id"))
    }
}

pub(crate) fn check_non_empty(element: &'static str, attribute: &'static str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(invalid(element, attribute, value, "a non-empty string"));
    }
    Ok(())
}

pub(crate) fn check_hex_color(element: &'static str, attribute: &'static str, value: &str) -> Result<()> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(invalid(element, attribute, value, "'#RRGGBB' or 'none'"))
    }
}

pub(crate) fn check_org(value: &str) -> Result<()> {
    if PATHWAY_ORG.is_match(value) {
        Ok(())
    } else {
        Err(invalid("pathway", "org", value, "exactly 3 letters"))
    }
}

pub(crate) fn check_number(value: &str) -> Result<()> {
    if PATHWAY_NUMBER.is_match(value) {
        Ok(())
    } else {
        Err(invalid("pathway", "number", value, "exactly 5 digits"))
    }
}

pub(crate) fn check_pathway_name(value: &str) -> Result<()> {
    let shaped = value
        .strip_prefix("path:")
        .filter(|rest| rest.len() == 8 && rest.is_char_boundary(3))
        .map(|rest| rest.split_at(3))
        .is_some_and(|(org, number)| PATHWAY_ORG.is_match(org) && PATHWAY_NUMBER.is_match(number));
    if shaped {
        Ok(())
    } else {
        Err(invalid("pathway", "name", value, "'path:<org><number>'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn hex_colors() {
        for color in ["#000000", "#BFFFBF", "#a0b1c2", "none"] {
            assert!(check_hex_color("graphics", "fgcolor", color).is_ok(), "{color}");
        }
        for color in ["invalid", "#FFF", "#GGGGGG", "000000", "#0000000", "None", ""] {
            assert!(check_hex_color("graphics", "fgcolor", color).is_err(), "{color}");
        }
    }

    #[test]
    fn integers_must_be_fully_consumed() {
        assert_eq!(parse_integer("graphics", "x", "628").unwrap(), 628);
        assert_eq!(parse_integer("graphics", "x", "-12").unwrap(), -12);
        for value in ["string", "12abc", "1.5", "", " 7", "+3"] {
            assert!(parse_integer("graphics", "x", value).is_err(), "{value}");
        }
    }

    #[test]
    fn entry_references_are_digits_only() {
        assert!(check_numeric_id("relation", "entry1", "44").is_ok());
        for value in ["+5", "-3", "", "4 4", "x1"] {
            assert!(check_numeric_id("relation", "entry1", value).is_err(), "{value}");
        }
    }

    #[test]
    fn org_and_number_shapes() {
        assert!(check_org("mmu").is_ok());
        assert!(check_org("mmuu").is_err());
        assert!(check_org("mm1").is_err());
        assert!(check_number("05205").is_ok());
        assert!(check_number("123456").is_err());
        assert!(check_number("1234a").is_err());
    }

    #[test]
    fn pathway_name_shape() {
        assert!(check_pathway_name("path:mmu05205").is_ok());
        assert!(check_pathway_name("invalid:mmu12345").is_err());
        assert!(check_pathway_name("path:mmuu12345").is_err());
        assert!(check_pathway_name("path:mmu123456").is_err());
        assert!(check_pathway_name("path:äb12345").is_err());
    }

    #[test]
    fn required_and_optional_attributes() {
        let doc = Document::parse(r#"<entry id="1" link=""/>"#).unwrap();
        let node = doc.root_element();
        assert_eq!(required(&node, "entry", "id").unwrap(), "1");
        // Present but empty stays distinct from absent.
        assert_eq!(optional(&node, "link"), Some(""));
        assert_eq!(optional(&node, "reaction"), None);
        let err = required(&node, "entry", "name").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn expect_tag_reports_found_element() {
        let doc = Document::parse("<invalid-tag/>").unwrap();
        let err = expect_tag(&doc.root_element(), "alt").unwrap_err();
        assert!(err.is_contract_violation());
        assert!(err.to_string().contains("invalid-tag"));
    }
}
