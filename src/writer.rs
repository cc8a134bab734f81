//! KGML serialization, the inverse of the element parsers.
//!
//! Present attributes are written, absent ones are omitted. Siblings of the
//! same kind keep their order, so parsing the output yields an equal tree.

use quick_xml::escape::escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::entry::Entry;
use crate::error::Result;
use crate::graphics::Graphics;
use crate::pathway::Pathway;
use crate::reaction::{Participant, Reaction};
use crate::relation::Relation;

const DOCTYPE: &str = r#"pathway SYSTEM "https://www.kegg.jp/kegg/xml/KGML_v0.7.2_.dtd""#;
const INDENT: usize = 2;

type XmlWriter = Writer<Vec<u8>>;

pub(crate) fn write_pathway(pathway: &Pathway) -> Result<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', INDENT);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer.write_event(Event::DocType(BytesText::from_escaped(DOCTYPE)))?;

    let start = element(
        "pathway",
        &[
            ("name", Some(pathway.name())),
            ("org", Some(pathway.org())),
            ("number", Some(pathway.number())),
            ("title", pathway.title()),
            ("image", pathway.image()),
            ("link", pathway.link()),
        ],
    );
    writer.write_event(Event::Start(start))?;
    for entry in pathway.entries() {
        write_entry(&mut writer, entry)?;
    }
    for relation in pathway.relations() {
        write_relation(&mut writer, relation)?;
    }
    for reaction in pathway.reactions() {
        write_reaction(&mut writer, reaction)?;
    }
    writer.write_event(Event::End(BytesEnd::new("pathway")))?;

    Ok(String::from_utf8(writer.into_inner())?)
}

fn element<'a>(tag: &'a str, attributes: &[(&str, Option<&str>)]) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    for &(key, value) in attributes {
        if let Some(value) = value {
            let value = escape_attribute(value);
            // Byte pairs are pushed as-is; the value is already escaped.
            start.push_attribute((key.as_bytes(), value.as_bytes()));
        }
    }
    start
}

/// Markup escaping plus character references for whitespace that a reader
/// would otherwise normalize to a space.
fn escape_attribute(value: &str) -> String {
    escape(value)
        .replace('\n', "&#10;")
        .replace('\r', "&#13;")
        .replace('\t', "&#9;")
}

/// Write `start` as an empty element, or wrap `children` in start/end tags.
fn write_element<F>(writer: &mut XmlWriter, start: BytesStart<'_>, has_children: bool, children: F) -> Result<()>
where
    F: FnOnce(&mut XmlWriter) -> Result<()>,
{
    if !has_children {
        writer.write_event(Event::Empty(start))?;
        return Ok(());
    }
    let end = start.to_end().into_owned();
    writer.write_event(Event::Start(start))?;
    children(writer)?;
    writer.write_event(Event::End(end))?;
    Ok(())
}

fn write_entry(writer: &mut XmlWriter, entry: &Entry) -> Result<()> {
    let start = element(
        "entry",
        &[
            ("id", Some(entry.id())),
            ("name", Some(entry.name())),
            ("type", Some(entry.entry_type().as_str())),
            ("link", entry.link()),
            ("reaction", entry.reaction()),
        ],
    );
    let has_children = entry.graphics().is_some() || !entry.components().is_empty();
    write_element(writer, start, has_children, |writer| {
        if let Some(graphics) = entry.graphics() {
            write_graphics(writer, graphics)?;
        }
        for component in entry.components() {
            writer.write_event(Event::Empty(element("component", &[("id", Some(component.id()))])))?;
        }
        Ok(())
    })
}

fn write_graphics(writer: &mut XmlWriter, graphics: &Graphics) -> Result<()> {
    let x = graphics.x().map(|value| value.to_string());
    let y = graphics.y().map(|value| value.to_string());
    let width = graphics.width().map(|value| value.to_string());
    let height = graphics.height().map(|value| value.to_string());
    let start = element(
        "graphics",
        &[
            ("name", graphics.name()),
            ("fgcolor", graphics.fgcolor()),
            ("bgcolor", graphics.bgcolor()),
            ("type", graphics.graphics_type().map(|kind| kind.as_str())),
            ("x", x.as_deref()),
            ("y", y.as_deref()),
            ("coords", graphics.coords()),
            ("width", width.as_deref()),
            ("height", height.as_deref()),
        ],
    );
    writer.write_event(Event::Empty(start))?;
    Ok(())
}

fn write_relation(writer: &mut XmlWriter, relation: &Relation) -> Result<()> {
    let start = element(
        "relation",
        &[
            ("entry1", Some(relation.entry1())),
            ("entry2", Some(relation.entry2())),
            ("type", Some(relation.relation_type().as_str())),
        ],
    );
    write_element(writer, start, !relation.subtypes().is_empty(), |writer| {
        for subtype in relation.subtypes() {
            let start = element(
                "subtype",
                &[
                    ("name", Some(subtype.name().as_str())),
                    ("value", Some(subtype.value())),
                ],
            );
            writer.write_event(Event::Empty(start))?;
        }
        Ok(())
    })
}

fn write_reaction(writer: &mut XmlWriter, reaction: &Reaction) -> Result<()> {
    let start = element(
        "reaction",
        &[
            ("id", Some(reaction.id())),
            ("name", Some(reaction.name())),
            ("type", Some(reaction.reaction_type().as_str())),
        ],
    );
    let has_children = !reaction.substrates().is_empty() || !reaction.products().is_empty();
    write_element(writer, start, has_children, |writer| {
        for participant in reaction.substrates().iter().chain(reaction.products()) {
            write_participant(writer, participant)?;
        }
        Ok(())
    })
}

fn write_participant(writer: &mut XmlWriter, participant: &Participant) -> Result<()> {
    let start = element(
        participant.role().tag(),
        &[("id", Some(participant.id())), ("name", Some(participant.name()))],
    );
    write_element(writer, start, participant.alt().is_some(), |writer| {
        if let Some(alt) = participant.alt() {
            writer.write_event(Event::Empty(element("alt", &[("name", Some(alt.name()))])))?;
        }
        Ok(())
    })
}
