use std::fmt;

use roxmltree::Node;
use serde::Serialize;
use tracing::debug;

use crate::attr;
use crate::error::Result;
use crate::vocab::{RelationType, SubtypeName};

const TAG: &str = "relation";
const SUBTYPE_TAG: &str = "subtype";

/// Qualifier of a relation, e.g. `activation` with value `-->`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Subtype {
    name: SubtypeName,
    value: String,
}

impl Subtype {
    pub fn new(name: SubtypeName, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, SUBTYPE_TAG)?;
        Ok(Self::new(
            attr::required(node, SUBTYPE_TAG, "name")?.parse()?,
            attr::required(node, SUBTYPE_TAG, "value")?,
        ))
    }

    pub fn name(&self) -> SubtypeName {
        self.name
    }

    /// Arrow symbol, or the id of the mediating compound for `compound`.
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Subtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Subtype name='{}' value='{}'>", self.name, self.value)
    }
}

/// Edge between two entries.
///
/// `entry1`/`entry2` are entry ids kept as written. They are checked for
/// numeric shape only; whether they exist in the pathway is left to
/// [`crate::Pathway::resolve`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Relation {
    entry1: String,
    entry2: String,
    #[serde(rename = "type")]
    relation_type: RelationType,
    subtypes: Vec<Subtype>,
}

impl Relation {
    pub fn new(
        entry1: impl Into<String>,
        entry2: impl Into<String>,
        relation_type: RelationType,
    ) -> Result<Self> {
        let entry1 = entry1.into();
        let entry2 = entry2.into();
        attr::check_numeric_id(TAG, "entry1", &entry1)?;
        attr::check_numeric_id(TAG, "entry2", &entry2)?;
        Ok(Self {
            entry1,
            entry2,
            relation_type,
            subtypes: Vec::new(),
        })
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, TAG)?;

        let mut relation = Relation::new(
            attr::required(node, TAG, "entry1")?,
            attr::required(node, TAG, "entry2")?,
            attr::required(node, TAG, "type")?.parse()?,
        )?;
        for child in node.children().filter(|child| child.is_element()) {
            if child.has_tag_name(SUBTYPE_TAG) {
                relation.subtypes.push(Subtype::parse(&child)?);
            } else {
                debug!(
                    element = child.tag_name().name(),
                    "ignoring unknown relation child"
                );
            }
        }
        Ok(relation)
    }

    pub fn with_subtype(mut self, subtype: Subtype) -> Self {
        self.subtypes.push(subtype);
        self
    }

    pub fn entry1(&self) -> &str {
        &self.entry1
    }

    pub fn entry2(&self) -> &str {
        &self.entry2
    }

    pub fn relation_type(&self) -> RelationType {
        self.relation_type
    }

    pub fn subtypes(&self) -> &[Subtype] {
        &self.subtypes
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Relation {}->{} type='{}'>",
            self.entry1, self.entry2, self.relation_type
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    fn parse(xml: &str) -> Result<Relation> {
        let doc = Document::parse(xml).unwrap();
        Relation::parse(&doc.root_element())
    }

    #[test]
    fn parses_relation() {
        let relation = parse(r#"<relation entry1="44" entry2="50" type="ECrel"></relation>"#).unwrap();
        assert_eq!(relation.entry1(), "44");
        assert_eq!(relation.entry2(), "50");
        assert_eq!(relation.relation_type(), RelationType::EcRel);
        assert!(relation.subtypes().is_empty());
        assert_eq!(relation.to_string(), "<Relation 44->50 type='ECrel'>");
    }

    #[test]
    fn parses_subtypes_in_order() {
        let relation = parse(
            r#"<relation entry1="44" entry2="50" type="PPrel">
                <subtype name="activation" value="--&gt;"/>
                <subtype name="binding/association" value="---"/>
            </relation>"#,
        )
        .unwrap();
        let subtypes = relation.subtypes();
        assert_eq!(subtypes.len(), 2);
        assert_eq!(subtypes[0].name(), SubtypeName::Activation);
        assert_eq!(subtypes[0].value(), "-->");
        assert_eq!(subtypes[1].name(), SubtypeName::BindingAssociation);
    }

    #[test]
    fn rejects_invalid_relations() {
        for xml in [
            r#"<relation entry1="44" entry2="50" type="invalid-type"/>"#,
            r#"<relation entry1="stringvalue" entry2="50" type="ECrel"/>"#,
            r#"<relation entry1="44" entry2="stringvalue" type="ECrel"/>"#,
            r#"<relation entry1="44" entry2="50"/>"#,
            r#"<relation entry2="50" type="ECrel"/>"#,
            r#"<relation entry1="44" entry2="50" type="ECrel"><subtype name="invalid" value="x"/></relation>"#,
        ] {
            assert!(parse(xml).unwrap_err().is_validation(), "{xml}");
        }
    }

    #[test]
    fn subtype_requires_known_name() {
        let doc = Document::parse(r#"<subtype name="activation" value="--&gt;"/>"#).unwrap();
        let subtype = Subtype::parse(&doc.root_element()).unwrap();
        assert_eq!(subtype.name(), SubtypeName::Activation);
        assert!(subtype.to_string().contains("activation"));

        for xml in ["<subtype></subtype>", r#"<subtype name="invalid" value="test"></subtype>"#] {
            let doc = Document::parse(xml).unwrap();
            assert!(Subtype::parse(&doc.root_element()).unwrap_err().is_validation());
        }
    }

    #[test]
    fn constructor_checks_entry_references() {
        assert!(Relation::new("44", "50", RelationType::Maplink).is_ok());
        assert!(Relation::new("44", "x", RelationType::Maplink).unwrap_err().is_validation());
        assert!(Relation::new("+5", "-3", RelationType::EcRel).unwrap_err().is_validation());
        // Dangling references are not this layer's concern.
        assert!(Relation::new("9999", "10000", RelationType::PcRel).is_ok());
    }
}
