//! Typed raw model of a KGML document
//!
//! The markup is parsed with `roxmltree`, a conforming XML reader: anything
//! that is not well-formed XML (bad entity or character references, illegal
//! characters, broken names or attributes, unbalanced tags) fails as a whole.
//! Every `entry` and `relation` element is then collected at any depth, in
//! document order. Attributes are kept as explicit `Option`s: deciding what a
//! missing value means is the graph builder's job, not the reader's.

use super::KgmlError;
use roxmltree::{Document, Node, ParsingOptions};
use serde::Serialize;

/// Attributes of the root `<pathway>` element
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathwayHeader {
    /// e.g. "path:bce00010"
    pub name: Option<String>,
    /// Organism code, e.g. "bce"
    pub org: Option<String>,
    /// Map number, e.g. "00010"
    pub number: Option<String>,
    pub title: Option<String>,
    pub image: Option<String>,
    pub link: Option<String>,
}

/// `<entry>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawEntry {
    /// Document-local identifier referenced by relations
    pub id: Option<String>,
    /// External cross reference(s), e.g. "bce:BC5335" or "cpd:C00031"
    pub name: Option<String>,
    /// `type` attribute
    pub kind: Option<String>,
    /// First direct `<graphics>` child
    pub graphics: Option<RawGraphics>,
}

/// `<graphics>` child of an entry
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawGraphics {
    pub name: Option<String>,
    pub x: Option<String>,
    pub y: Option<String>,
}

/// `<relation>` element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRelation {
    pub entry1: Option<String>,
    pub entry2: Option<String>,
    /// `type` attribute (ECrel, PPrel, GErel, PCrel, maplink)
    pub kind: Option<String>,
    /// Direct `<subtype>` children in document order
    pub subtypes: Vec<RawSubtype>,
}

/// `<subtype>` child of a relation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawSubtype {
    pub name: Option<String>,
    pub value: Option<String>,
}

/// Entries and relations of one KGML document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KgmlDocument {
    /// Present when the root element is `<pathway>`
    pub header: Option<PathwayHeader>,
    pub entries: Vec<RawEntry>,
    pub relations: Vec<RawRelation>,
}

impl KgmlDocument {
    /// Parse KGML markup.
    ///
    /// Fails only when the markup is not well-formed XML. KEGG files carry a
    /// `<!DOCTYPE>` pointing at the external KGML DTD, so DTDs are allowed;
    /// the external subset is never fetched.
    pub fn parse(markup: &str) -> Result<Self, KgmlError> {
        let options = ParsingOptions {
            allow_dtd: true,
            ..ParsingOptions::default()
        };
        let xml = Document::parse_with_options(markup, options)
            .map_err(|e| KgmlError::Malformed(e.to_string()))?;

        let root = xml.root_element();
        let header = root.has_tag_name("pathway").then(|| PathwayHeader {
            name: attribute(root, "name"),
            org: attribute(root, "org"),
            number: attribute(root, "number"),
            title: attribute(root, "title"),
            image: attribute(root, "image"),
            link: attribute(root, "link"),
        });

        let entries = root
            .descendants()
            .filter(|node| node.has_tag_name("entry"))
            .map(read_entry)
            .collect();

        let relations = root
            .descendants()
            .filter(|node| node.has_tag_name("relation"))
            .map(read_relation)
            .collect();

        Ok(KgmlDocument {
            header,
            entries,
            relations,
        })
    }
}

fn read_entry(entry: Node<'_, '_>) -> RawEntry {
    let graphics = entry
        .children()
        .find(|node| node.has_tag_name("graphics"))
        .map(|graphics| RawGraphics {
            name: attribute(graphics, "name"),
            x: attribute(graphics, "x"),
            y: attribute(graphics, "y"),
        });

    RawEntry {
        id: attribute(entry, "id"),
        name: attribute(entry, "name"),
        kind: attribute(entry, "type"),
        graphics,
    }
}

fn read_relation(relation: Node<'_, '_>) -> RawRelation {
    let subtypes = relation
        .children()
        .filter(|node| node.has_tag_name("subtype"))
        .map(|subtype| RawSubtype {
            name: attribute(subtype, "name"),
            value: attribute(subtype, "value"),
        })
        .collect();

    RawRelation {
        entry1: attribute(relation, "entry1"),
        entry2: attribute(relation, "entry2"),
        kind: attribute(relation, "type"),
        subtypes,
    }
}

fn attribute(node: Node<'_, '_>, name: &str) -> Option<String> {
    node.attribute(name).map(str::to_string)
}


#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_entries_relations_and_header() {
        let xml = r#"<?xml version="1.0"?>
<!DOCTYPE pathway SYSTEM "https://www.kegg.jp/kegg/xml/KGML_v0.7.2_.dtd">
<pathway name="path:bce00010" org="bce" number="00010" title="Glycolysis / Gluconeogenesis">
    <entry id="13" name="bce:BC5335" type="gene">
        <graphics name="pfkA, BC5335" x="483" y="407"/>
    </entry>
    <entry id="40" name="cpd:C00031" type="compound"/>
    <relation entry1="13" entry2="40" type="ECrel">
        <subtype name="compound" value="40"/>
    </relation>
</pathway>"#;

        let doc = KgmlDocument::parse(xml).unwrap();

        let header = doc.header.unwrap();
        assert_eq!(header.org.as_deref(), Some("bce"));
        assert_eq!(header.title.as_deref(), Some("Glycolysis / Gluconeogenesis"));

        assert_eq!(doc.entries.len(), 2);
        let gene = &doc.entries[0];
        assert_eq!(gene.id.as_deref(), Some("13"));
        assert_eq!(gene.kind.as_deref(), Some("gene"));
        let graphics = gene.graphics.as_ref().unwrap();
        assert_eq!(graphics.name.as_deref(), Some("pfkA, BC5335"));
        assert_eq!(graphics.x.as_deref(), Some("483"));
        assert!(doc.entries[1].graphics.is_none());

        assert_eq!(doc.relations.len(), 1);
        assert_eq!(doc.relations[0].kind.as_deref(), Some("ECrel"));
        assert_eq!(doc.relations[0].subtypes[0].value.as_deref(), Some("40"));
    }

    #[test]
    fn test_only_first_direct_graphics_child_is_kept() {
        let xml = r#"<pathway>
    <entry id="1" name="ko:K00844">
        <graphics name="first" x="1" y="2"/>
        <graphics name="second" x="3" y="4"/>
        <component id="7"><graphics name="nested"/></component>
    </entry>
</pathway>"#;

        let doc = KgmlDocument::parse(xml).unwrap();
        let graphics = doc.entries[0].graphics.as_ref().unwrap();
        assert_eq!(graphics.name.as_deref(), Some("first"));
    }

    #[test]
    fn test_nested_subtypes_are_ignored() {
        let xml = r#"<pathway>
    <relation entry1="1" entry2="2">
        <subtype name="activation"/>
        <wrapper><subtype name="nested"/></wrapper>
        <subtype name="phosphorylation"/>
    </relation>
</pathway>"#;

        let doc = KgmlDocument::parse(xml).unwrap();
        let names: Vec<_> = doc.relations[0]
            .subtypes
            .iter()
            .map(|s| s.name.as_deref().unwrap())
            .collect();
        assert_eq!(names, vec!["activation", "phosphorylation"]);
    }

    #[test]
    fn test_entries_found_at_any_depth_in_document_order() {
        let xml = r#"<root>
    <group><entry id="1" name="a:1"/></group>
    <entry id="2" name="a:2"/>
</root>"#;

        let doc = KgmlDocument::parse(xml).unwrap();
        assert!(doc.header.is_none());
        let ids: Vec<_> = doc.entries.iter().map(|e| e.id.as_deref().unwrap()).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_attribute_entities_are_unescaped() {
        let xml = r#"<pathway><entry id="1" name="cpd:C1"><graphics name="A &amp; B"/></entry></pathway>"#;
        let doc = KgmlDocument::parse(xml).unwrap();
        let graphics = doc.entries[0].graphics.as_ref().unwrap();
        assert_eq!(graphics.name.as_deref(), Some("A & B"));
    }

    #[test]
    fn test_malformed_inputs() {
        let cases = [
            "<entry>",
            "<pathway><entry></pathway>",
            "</pathway>",
            "just text",
            "<pathway/><pathway/>",
            "<pathway/> trailing",
            r#"<pathway><entry id="1" id="2"/></pathway>"#,
            r#"<pathway><entry id=1/></pathway>"#,
            "<?xml version=\"1.0\"?>",
            "<pathway>&bogus;</pathway>",
            r#"<pathway><entry id="1" name="a<b"/></pathway>"#,
            "<1pathway/>",
            "<pathway>\u{1}</pathway>",
            r#"<pathway><entry id="1"name="org:A"/></pathway>"#,
            "<pathway>&#xD800;</pathway>",
            "<pathway><entry></relation></pathway>",
        ];

        for case in cases {
            let err = KgmlDocument::parse(case).unwrap_err();
            assert!(
                matches!(err, KgmlError::Malformed(_)),
                "expected malformed for {:?}, got {:?}",
                case,
                err
            );
        }
    }
}
