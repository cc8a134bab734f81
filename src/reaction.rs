use std::fmt;

use roxmltree::Node;
use serde::Serialize;
use tracing::debug;

use crate::attr;
use crate::error::Result;
use crate::vocab::ReactionType;

const TAG: &str = "reaction";
const ALT_TAG: &str = "alt";

/// Alternative name for a substrate or product.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Alt {
    name: String,
}

impl Alt {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, ALT_TAG)?;
        Ok(Self::new(attr::required(node, ALT_TAG, "name")?))
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Alt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Alt name='{}'>", self.name)
    }
}

/// Which side of a reaction a participant sits on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Role {
    Substrate,
    Product,
}

impl Role {
    pub fn tag(self) -> &'static str {
        match self {
            Role::Substrate => "substrate",
            Role::Product => "product",
        }
    }
}

/// Compound consumed or produced by a reaction. `<substrate>` and
/// `<product>` share this shape and differ only in [`Role`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Participant {
    #[serde(skip)]
    role: Role,
    id: String,
    name: String,
    alt: Option<Alt>,
}

pub type Substrate = Participant;
pub type Product = Participant;

impl Participant {
    pub fn new(role: Role, id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role,
            id: id.into(),
            name: name.into(),
            alt: None,
        }
    }

    pub fn substrate(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Role::Substrate, id, name)
    }

    pub fn product(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self::new(Role::Product, id, name)
    }

    /// Parse a `<substrate>` or `<product>` element, whichever `role` names.
    pub fn parse(node: &Node, role: Role) -> Result<Self> {
        let tag = role.tag();
        attr::expect_tag(node, tag)?;

        let mut participant = Participant::new(
            role,
            attr::required(node, tag, "id")?,
            attr::required(node, tag, "name")?,
        );
        if let Some(alt) = attr::children_named(node, ALT_TAG).next() {
            participant.alt = Some(Alt::parse(&alt)?);
        }
        Ok(participant)
    }

    pub fn with_alt(mut self, alt: Alt) -> Self {
        self.alt = Some(alt);
        self
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Id of the compound entry this participant stands for.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn alt(&self) -> Option<&Alt> {
        self.alt.as_ref()
    }
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.role {
            Role::Substrate => "Substrate",
            Role::Product => "Product",
        };
        write!(f, "<{} id='{}' name='{}'>", label, self.id, self.name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Reaction {
    id: String,
    name: String,
    #[serde(rename = "type")]
    reaction_type: ReactionType,
    substrates: Vec<Substrate>,
    products: Vec<Product>,
}

impl Reaction {
    pub fn new(id: impl Into<String>, name: impl Into<String>, reaction_type: ReactionType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reaction_type,
            substrates: Vec::new(),
            products: Vec::new(),
        }
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, TAG)?;

        let mut reaction = Reaction::new(
            attr::required(node, TAG, "id")?,
            attr::required(node, TAG, "name")?,
            attr::required(node, TAG, "type")?.parse()?,
        );
        for child in node.children().filter(|child| child.is_element()) {
            match child.tag_name().name() {
                "substrate" => reaction
                    .substrates
                    .push(Participant::parse(&child, Role::Substrate)?),
                "product" => reaction
                    .products
                    .push(Participant::parse(&child, Role::Product)?),
                other => debug!(
                    reaction = %reaction.id,
                    element = other,
                    "ignoring unknown reaction child"
                ),
            }
        }
        Ok(reaction)
    }

    /// Append a participant to the list matching its role.
    pub fn with_participant(mut self, participant: Participant) -> Self {
        match participant.role {
            Role::Substrate => self.substrates.push(participant),
            Role::Product => self.products.push(participant),
        }
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Space-separated reaction ids, e.g. `rn:R01274`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reaction_type(&self) -> ReactionType {
        self.reaction_type
    }

    pub fn substrates(&self) -> &[Substrate] {
        &self.substrates
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }
}

impl fmt::Display for Reaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Reaction id='{}' name='{}' type='{}'>",
            self.id, self.name, self.reaction_type
        )
    }
}
