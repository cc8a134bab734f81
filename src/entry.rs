use std::fmt;

use roxmltree::Node;
use serde::Serialize;
use tracing::debug;

use crate::attr;
use crate::error::{KgmlError, Result};
use crate::graphics::Graphics;
use crate::vocab::EntryType;

const TAG: &str = "entry";
const COMPONENT_TAG: &str = "component";

/// Member of a `group` entry, referencing another entry by id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Component {
    id: String,
}

impl Component {
    pub fn new(id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        attr::check_non_empty(COMPONENT_TAG, "id", &id)?;
        Ok(Self { id })
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, COMPONENT_TAG)?;
        Self::new(attr::required(node, COMPONENT_TAG, "id")?)
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Component id='{}'>", self.id)
    }
}

/// A node of the pathway diagram: gene, compound, linked map, group, ...
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Entry {
    id: String,
    name: String,
    #[serde(rename = "type")]
    entry_type: EntryType,
    link: Option<String>,
    reaction: Option<String>,
    graphics: Option<Graphics>,
    components: Vec<Component>,
}

impl Entry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, entry_type: EntryType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            entry_type,
            link: None,
            reaction: None,
            graphics: None,
            components: Vec::new(),
        }
    }

    pub fn parse(node: &Node) -> Result<Self> {
        attr::expect_tag(node, TAG)?;

        let mut entry = Entry::new(
            attr::required(node, TAG, "id")?,
            attr::required(node, TAG, "name")?,
            attr::required(node, TAG, "type")?.parse()?,
        );
        entry.link = attr::optional(node, "link").map(str::to_string);
        entry.reaction = attr::optional(node, "reaction").map(str::to_string);

        for child in node.children().filter(|child| child.is_element()) {
            match child.tag_name().name() {
                "graphics" => {
                    if entry.graphics.is_some() {
                        debug!(entry = %entry.id, "entry has repeated <graphics>, keeping the last");
                    }
                    entry.graphics = Some(Graphics::parse(&child)?);
                }
                COMPONENT_TAG => entry.components.push(Component::parse(&child)?),
                other => debug!(entry = %entry.id, element = other, "ignoring unknown entry child"),
            }
        }
        Ok(entry)
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_reaction(mut self, reaction: impl Into<String>) -> Self {
        self.reaction = Some(reaction.into());
        self
    }

    pub fn with_graphics(mut self, graphics: Graphics) -> Self {
        self.graphics = Some(graphics);
        self
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(component);
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// KEGG identifier(s), space separated when the node stands for several.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entry_type(&self) -> EntryType {
        self.entry_type
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn reaction(&self) -> Option<&str> {
        self.reaction.as_deref()
    }

    pub fn graphics(&self) -> Option<&Graphics> {
        self.graphics.as_ref()
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Numeric gene ids named by this entry.
    ///
    /// `name` is a whitespace-separated list of `<org>:<id>` tokens, e.g.
    /// `"mmu:12048 mmu:12049"` yields `["12048", "12049"]`. Tokens without an
    /// organism prefix carry no gene id and are skipped.
    pub fn gene_ids(&self) -> Vec<&str> {
        self.name
            .split_whitespace()
            .filter_map(|token| token.split_once(':').map(|(_, id)| id))
            .filter(|id| !id.is_empty())
            .collect()
    }

    /// Like [`Entry::gene_ids`], but fails if a token is not `<org>:<digits>`.
    pub fn strict_gene_ids(&self) -> Result<Vec<&str>> {
        self.name
            .split_whitespace()
            .map(|token| match token.split_once(':') {
                Some((org, id))
                    if !org.is_empty()
                        && !id.is_empty()
                        && id.bytes().all(|byte| byte.is_ascii_digit()) =>
                {
                    Ok(id)
                }
                _ => Err(KgmlError::InvalidAttribute {
                    element: TAG,
                    attribute: "name",
                    value: token.to_string(),
                    expected: "'<org>:<numeric-id>'".to_string(),
                }),
            })
            .collect()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Entry id='{}' name='{}' type='{}'>",
            self.id, self.name, self.entry_type
        )
    }
}
