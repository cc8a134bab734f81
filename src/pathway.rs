use std::collections::hash_map::Entry as Slot;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::str::FromStr;

use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;
use tracing::debug;

use crate::attr;
use crate::entry::Entry;
use crate::error::{KgmlError, Result};
use crate::reaction::Reaction;
use crate::relation::Relation;
use crate::vocab::EntryType;
use crate::writer;

const TAG: &str = "pathway";

/// A parsed KGML document: the pathway attributes and its entries,
/// relations and reactions in document order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Pathway {
    name: String,
    org: String,
    number: String,
    title: Option<String>,
    image: Option<String>,
    link: Option<String>,
    entries: Vec<Entry>,
    relations: Vec<Relation>,
    reactions: Vec<Reaction>,
    #[serde(skip)]
    entry_index: HashMap<String, usize>,
}

impl Pathway {
    /// Build an empty pathway, checking that `name` is exactly
    /// `path:<org><number>` with a 3 letter org and 5 digit number.
    pub fn new(
        name: impl Into<String>,
        org: impl Into<String>,
        number: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let org = org.into();
        let number = number.into();

        attr::check_pathway_name(&name)?;
        attr::check_org(&org)?;
        attr::check_number(&number)?;
        if name != format!("path:{org}{number}") {
            return Err(KgmlError::NameMismatch { name, org, number });
        }

        Ok(Self {
            name,
            org,
            number,
            title: None,
            image: None,
            link: None,
            entries: Vec::new(),
            relations: Vec::new(),
            reactions: Vec::new(),
            entry_index: HashMap::new(),
        })
    }

    /// Parse a complete KGML document. Any invalid element rejects the
    /// whole document.
    pub fn parse(text: &str) -> Result<Self> {
        // KEGG serves KGML with a DOCTYPE line, which roxmltree refuses by default.
        let mut options = ParsingOptions::default();
        options.allow_dtd = true;
        let doc = Document::parse_with_options(text, options)?;
        Self::from_node(&doc.root_element())
    }

    pub fn from_node(node: &Node) -> Result<Self> {
        attr::expect_tag(node, TAG)?;

        let mut pathway = Pathway::new(
            attr::required(node, TAG, "name")?,
            attr::required(node, TAG, "org")?,
            attr::required(node, TAG, "number")?,
        )?;
        pathway.title = attr::optional(node, "title").map(str::to_string);
        pathway.image = attr::optional(node, "image").map(str::to_string);
        pathway.link = attr::optional(node, "link").map(str::to_string);

        for child in node.children().filter(|child| child.is_element()) {
            match child.tag_name().name() {
                "entry" => pathway.add_entry(Entry::parse(&child)?),
                "relation" => pathway.add_relation(Relation::parse(&child)?),
                "reaction" => pathway.add_reaction(Reaction::parse(&child)?),
                other => debug!(element = other, "ignoring unknown pathway child"),
            }
        }

        debug!(
            pathway = %pathway.name,
            entries = pathway.entries.len(),
            relations = pathway.relations.len(),
            reactions = pathway.reactions.len(),
            "parsed KGML pathway"
        );
        Ok(pathway)
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn add_entry(&mut self, entry: Entry) {
        match self.entry_index.entry(entry.id().to_string()) {
            Slot::Vacant(slot) => {
                slot.insert(self.entries.len());
            }
            Slot::Occupied(_) => {
                debug!(id = entry.id(), "duplicate entry id, lookups return the first")
            }
        }
        self.entries.push(entry);
    }

    pub fn add_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    pub fn add_reaction(&mut self, reaction: Reaction) {
        self.reactions.push(reaction);
    }

    /// Full KEGG identifier, `path:<org><number>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn org(&self) -> &str {
        &self.org
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn reactions(&self) -> &[Reaction] {
        &self.reactions
    }

    pub fn get_entry_by_id(&self, id: &str) -> Option<&Entry> {
        self.entry_index
            .get(id)
            .and_then(|&position| self.entries.get(position))
    }

    pub fn get_reaction_by_id(&self, id: &str) -> Option<&Reaction> {
        self.reactions.iter().find(|reaction| reaction.id() == id)
    }

    /// Look up both ends of a relation. Missing entries resolve to `None`.
    pub fn resolve(&self, relation: &Relation) -> (Option<&Entry>, Option<&Entry>) {
        (
            self.get_entry_by_id(relation.entry1()),
            self.get_entry_by_id(relation.entry2()),
        )
    }

    /// Gene ids of every `gene` entry, in entry order. An id named by
    /// several entries appears once per entry.
    pub fn get_genes(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|entry| entry.entry_type() == EntryType::Gene)
            .flat_map(Entry::gene_ids)
            .collect()
    }

    /// [`Pathway::get_genes`] keeping only the first occurrence of each id.
    pub fn unique_genes(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.get_genes()
            .into_iter()
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Serialize back to a KGML document.
    pub fn to_xml_string(&self) -> Result<String> {
        writer::write_pathway(self)
    }
}

impl FromStr for Pathway {
    type Err = KgmlError;

    fn from_str(text: &str) -> Result<Self> {
        Pathway::parse(text)
    }
}

impl fmt::Display for Pathway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Pathway {} title='{}'>",
            self.name,
            self.title.as_deref().unwrap_or("")
        )
    }
}
