//! Property tests for graph extraction

use pathgraph_ingest::parse_kgml_to_graph;
use proptest::prelude::*;

#[derive(Debug, Clone)]
struct Entry {
    id: u32,
    accession: String,
    x: Option<i64>,
}

#[derive(Debug, Clone)]
struct Relation {
    entry1: u32,
    entry2: u32,
    subtypes: Vec<String>,
}

fn entry_strategy() -> impl Strategy<Value = Entry> {
    (1u32..50, "[A-Z][0-9]{5}", proptest::option::of(-2000i64..2000)).prop_map(
        |(id, accession, x)| Entry { id, accession, x },
    )
}

fn relation_strategy() -> impl Strategy<Value = Relation> {
    (
        1u32..60,
        1u32..60,
        proptest::collection::vec("[a-z]{1,12}", 0..3),
    )
        .prop_map(|(entry1, entry2, subtypes)| Relation {
            entry1,
            entry2,
            subtypes,
        })
}

fn render(entries: &[Entry], relations: &[Relation]) -> String {
    let mut kgml = String::from("<pathway name=\"path:org00001\" org=\"org\">\n");
    for entry in entries {
        let x = entry.x.map(|x| x.to_string()).unwrap_or_else(|| "n/a".to_string());
        kgml.push_str(&format!(
            "<entry id=\"{}\" name=\"org:{}\" type=\"gene\"><graphics name=\"{}\" x=\"{}\" y=\"0\"/></entry>\n",
            entry.id, entry.accession, entry.accession, x
        ));
    }
    for relation in relations {
        kgml.push_str(&format!(
            "<relation entry1=\"{}\" entry2=\"{}\" type=\"PPrel\">",
            relation.entry1, relation.entry2
        ));
        for subtype in &relation.subtypes {
            kgml.push_str(&format!("<subtype name=\"{}\" value=\"-\"/>", subtype));
        }
        kgml.push_str("</relation>\n");
    }
    kgml.push_str("</pathway>\n");
    kgml
}

proptest! {
    #[test]
    fn one_node_per_complete_entry(
        entries in proptest::collection::vec(entry_strategy(), 0..20),
        relations in proptest::collection::vec(relation_strategy(), 0..20),
    ) {
        let result = parse_kgml_to_graph(&render(&entries, &relations), "org00001");

        prop_assert!(result.error.is_none());
        prop_assert_eq!(result.nodes.len(), entries.len());
        for (node, entry) in result.nodes.iter().zip(&entries) {
            prop_assert_eq!(&node.id, &entry.accession);
            prop_assert_eq!(node.x, entry.x);
            prop_assert_eq!(node.y, Some(0));
        }
    }

    #[test]
    fn edges_only_between_known_entries(
        entries in proptest::collection::vec(entry_strategy(), 0..20),
        relations in proptest::collection::vec(relation_strategy(), 0..20),
    ) {
        let result = parse_kgml_to_graph(&render(&entries, &relations), "org00001");

        let resolvable = relations
            .iter()
            .filter(|r| {
                entries.iter().any(|e| e.id == r.entry1) && entries.iter().any(|e| e.id == r.entry2)
            })
            .count();
        prop_assert_eq!(result.edges.len(), resolvable);

        for edge in &result.edges {
            prop_assert!(result.nodes.iter().any(|n| n.id == edge.source));
            prop_assert!(result.nodes.iter().any(|n| n.id == edge.target));
        }
    }

    #[test]
    fn arbitrary_input_never_panics(input in "\\PC{0,200}") {
        let result = parse_kgml_to_graph(&input, "fuzz");
        if result.error.is_some() {
            prop_assert!(result.nodes.is_empty());
            prop_assert!(result.edges.is_empty());
        }
    }
}
