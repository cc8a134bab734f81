//! Parse, validate and serialize KGML (KEGG Markup Language) pathway documents.
//!
//! ```
//! let xml = r#"<pathway name="path:mmu05205" org="mmu" number="05205">
//!     <entry id="154" name="mmu:12048 mmu:12049" type="gene"/>
//! </pathway>"#;
//! let pathway = kgml::Pathway::parse(xml).unwrap();
//! assert_eq!(pathway.get_genes(), vec!["12048", "12049"]);
//! assert!(pathway.get_entry_by_id("154").is_some());
//! ```

mod attr;
pub mod entry;
pub mod error;
pub mod graphics;
pub mod pathway;
pub mod reaction;
pub mod relation;
pub mod vocab;
mod writer;

pub use entry::{Component, Entry};
pub use error::{KgmlError, Result};
pub use graphics::Graphics;
pub use pathway::Pathway;
pub use reaction::{Alt, Participant, Product, Reaction, Role, Substrate};
pub use relation::{Relation, Subtype};
pub use vocab::{EntryType, GraphicsType, ReactionType, RelationType, SubtypeName};
