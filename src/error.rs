//! Error types for KGML parsing, validation and serialization.

use thiserror::Error;

/// Failure raised while building or writing a KGML object tree.
///
/// Two kinds are kept apart: [`KgmlError::UnexpectedElement`] means a parser
/// was handed the wrong element (caller misuse), every other variant except
/// the XML/writer wrappers means the document data itself is invalid.
#[derive(Debug, Error)]
pub enum KgmlError {
    /// A parser received an element it does not handle.
    #[error("expected <{expected}> element, got <{found}>")]
    UnexpectedElement {
        expected: &'static str,
        found: String,
    },

    /// A required attribute is absent.
    #[error("<{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    /// An attribute is present but fails its enum or format check.
    #[error("<{element}> attribute '{attribute}' has invalid value '{value}', expected {expected}")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
        expected: String,
    },

    /// Pathway `name` does not decompose into `path:` + `org` + `number`.
    #[error("pathway name '{name}' does not match org '{org}' and number '{number}'")]
    NameMismatch {
        name: String,
        org: String,
        number: String,
    },

    /// The input text is not well-formed XML.
    #[error("malformed KGML document: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("failed to write KGML: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("serialized KGML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl KgmlError {
    /// True when a parser was called with an element of the wrong tag.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, KgmlError::UnexpectedElement { .. })
    }

    /// True for data-validation failures: missing or malformed attributes
    /// and pathway name mismatches.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            KgmlError::MissingAttribute { .. }
                | KgmlError::InvalidAttribute { .. }
                | KgmlError::NameMismatch { .. }
        )
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, KgmlError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_error_kinds() {
        let contract = KgmlError::UnexpectedElement {
            expected: "alt",
            found: "product".to_string(),
        };
        assert!(contract.is_contract_violation());
        assert!(!contract.is_validation());

        let missing = KgmlError::MissingAttribute {
            element: "entry",
            attribute: "id",
        };
        assert!(missing.is_validation());
        assert!(!missing.is_contract_violation());
    }

    #[test]
    fn messages_name_field_and_value() {
        let err = KgmlError::InvalidAttribute {
            element: "graphics",
            attribute: "fgcolor",
            value: "invalid".to_string(),
            expected: "a hex color".to_string(),
        };
        let message = err.to_string();
        assert!(message.contains("fgcolor"));
        assert!(message.contains("invalid"));
    }
}
