//! Closed KGML vocabularies.
//!
//! Every enumerated attribute is a sum type whose `FromStr` is the only way
//! in from text, so an unknown label fails the same way whether it comes
//! from a document or from a caller building entities by hand.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::{KgmlError, Result};

macro_rules! kgml_vocabulary {
    (
        $(#[$meta:meta])*
        $name:ident for $element:literal . $attribute:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            /// Every accepted label, in KGML documentation order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl FromStr for $name {
            type Err = KgmlError;

            fn from_str(value: &str) -> Result<Self> {
                match value {
                    $($label => Ok($name::$variant),)+
                    _ => Err(KgmlError::InvalidAttribute {
                        element: $element,
                        attribute: $attribute,
                        value: value.to_string(),
                        expected: format!("one of: {}", [$($label),+].join(", ")),
                    }),
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }
    };
}

kgml_vocabulary! {
    /// Kind of node an `<entry>` stands for.
    EntryType for "entry"."type" {
        Ortholog => "ortholog",
        Enzyme => "enzyme",
        Reaction => "reaction",
        Gene => "gene",
        Group => "group",
        Compound => "compound",
        Map => "map",
        Brite => "brite",
        Other => "other",
    }
}

kgml_vocabulary! {
    /// Kind of interaction a `<relation>` describes.
    RelationType for "relation"."type" {
        EcRel => "ECrel",
        PpRel => "PPrel",
        GeRel => "GErel",
        PcRel => "PCrel",
        Maplink => "maplink",
    }
}

kgml_vocabulary! {
    ReactionType for "reaction"."type" {
        Reversible => "reversible",
        Irreversible => "irreversible",
    }
}

kgml_vocabulary! {
    /// Shape used to draw an entry.
    GraphicsType for "graphics"."type" {
        Rectangle => "rectangle",
        Circle => "circle",
        RoundRectangle => "roundrectangle",
        Line => "line",
    }
}

kgml_vocabulary! {
    /// Relation subtype labels.
    SubtypeName for "subtype"."name" {
        Compound => "compound",
        HiddenCompound => "hidden compound",
        Activation => "activation",
        Inhibition => "inhibition",
        Expression => "expression",
        Repression => "repression",
        IndirectEffect => "indirect effect",
        StateChange => "state change",
        BindingAssociation => "binding/association",
        Dissociation => "dissociation",
        MissingInteraction => "missing interaction",
        Phosphorylation => "phosphorylation",
        Dephosphorylation => "dephosphorylation",
        Glycosylation => "glycosylation",
        Ubiquitination => "ubiquitination",
        Methylation => "methylation",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_closed<T>(all: &[T], outsiders: &[&str])
    where
        T: FromStr<Err = KgmlError> + Copy + PartialEq + fmt::Debug + fmt::Display,
    {
        for value in all {
            let label = value.to_string();
            assert_eq!(label.parse::<T>().unwrap(), *value);
        }
        for label in outsiders {
            let err = label.parse::<T>().unwrap_err();
            assert!(err.is_validation(), "{label}");
        }
    }

    #[test]
    fn vocabularies_are_closed() {
        assert_closed(EntryType::ALL, &["invalid", "Gene", "", " gene"]);
        assert_closed(RelationType::ALL, &["invalid-type", "ecrel", "maplinks"]);
        assert_closed(ReactionType::ALL, &["invalid", "Reversible"]);
        assert_closed(GraphicsType::ALL, &["invalid", "square"]);
        assert_closed(SubtypeName::ALL, &["invalid", "binding", "Activation"]);
    }

    #[test]
    fn labels_are_kept_verbatim() {
        assert_eq!(RelationType::EcRel.as_str(), "ECrel");
        assert_eq!(GraphicsType::RoundRectangle.as_str(), "roundrectangle");
        assert_eq!(SubtypeName::BindingAssociation.as_str(), "binding/association");
        assert_eq!(SubtypeName::ALL.len(), 16);
    }

    #[test]
    fn failure_names_field_and_vocabulary() {
        let err = "invalid".parse::<EntryType>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("entry"));
        assert!(message.contains("'type'"));
        assert!(message.contains("ortholog"));
    }

    #[test]
    fn serializes_as_label() {
        let json = serde_json::to_string(&SubtypeName::IndirectEffect).unwrap();
        assert_eq!(json, "\"indirect effect\"");
    }
}
