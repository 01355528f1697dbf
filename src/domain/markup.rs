//! Structural serialization: node tree → labeled element tree → XML.

use std::io;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::domain::entities::{Node, NodeKind};
use crate::domain::tree::NodeTree;

const DIRECTORY_PREFIX: &str = "Dir_";
const FILE_PREFIX: &str = "File_";

/// One labeled element mirroring a node.
///
/// Files carry a text payload and no children; directories the reverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub label: String,
    pub text: Option<String>,
    pub children: Vec<Element>,
}

impl Element {
    /// Render as indented XML (two spaces per level, no declaration).
    pub fn to_xml(&self) -> io::Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
        self.write(&mut writer)?;
        String::from_utf8(writer.into_inner())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write<W: io::Write>(&self, writer: &mut Writer<W>) -> io::Result<()> {
        let label = self.label.as_str();
        match &self.text {
            Some(text) => {
                writer.write_event(Event::Start(BytesStart::new(label)))?;
                writer.write_event(Event::Text(BytesText::new(text)))?;
                writer.write_event(Event::End(BytesEnd::new(label)))?;
            }
            None if self.children.is_empty() => {
                writer.write_event(Event::Empty(BytesStart::new(label)))?;
            }
            None => {
                writer.write_event(Event::Start(BytesStart::new(label)))?;
                for child in &self.children {
                    child.write(writer)?;
                }
                writer.write_event(Event::End(BytesEnd::new(label)))?;
            }
        }
        Ok(())
    }

    /// Number of elements in this subtree, itself included.
    pub fn element_count(&self) -> usize {
        1 + self.children.iter().map(Element::element_count).sum::<usize>()
    }
}

/// Build the element tree for the whole assembled tree (post-order).
pub fn serialize(tree: &NodeTree) -> Element {
    serialize_node(tree, tree.root())
}

fn serialize_node(tree: &NodeTree, node: &Node) -> Element {
    match &node.kind {
        NodeKind::Directory { .. } => {
            let children = tree
                .children(node)
                .map(|child| serialize_node(tree, child))
                .collect();
            Element {
                label: element_label(&node.name, DIRECTORY_PREFIX),
                text: None,
                children,
            }
        }
        NodeKind::Word { .. } | NodeKind::Image { .. } | NodeKind::Text { .. } => Element {
            label: element_label(&node.name, FILE_PREFIX),
            text: node.attribute_summary(),
            children: Vec::new(),
        },
    }
}

/// Identifier-safe label: any character not allowed in an XML element name
/// becomes `_`, and a leading ASCII digit gets `prefix` in front.
pub fn element_label(name: &str, prefix: &str) -> String {
    let label: String = name
        .chars()
        .map(|c| if is_label_char(c) { c } else { '_' })
        .collect();

    match label.chars().next() {
        Some(first) if !first.is_ascii_digit() => label,
        _ => format!("{}{}", prefix, label),
    }
}

/// Letters and digits that may appear anywhere in an XML element name.
/// Non-ASCII characters must also fall in the XML 1.0 NameStartChar ranges.
fn is_label_char(c: char) -> bool {
    if c.is_ascii() {
        return c == '_' || c.is_ascii_alphanumeric();
    }
    c.is_alphanumeric()
        && matches!(c,
            '\u{C0}'..='\u{D6}'
            | '\u{D8}'..='\u{F6}'
            | '\u{F8}'..='\u{2FF}'
            | '\u{370}'..='\u{37D}'
            | '\u{37F}'..='\u{1FFF}'
            | '\u{2070}'..='\u{218F}'
            | '\u{2C00}'..='\u{2FEF}'
            | '\u{3001}'..='\u{D7FF}'
            | '\u{F900}'..='\u{FDCF}'
            | '\u{FDF0}'..='\u{FFFD}'
            | '\u{10000}'..='\u{EFFFF}')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::builder::TreeAssembler;
    use crate::domain::entities::FileSpec;

    #[test]
    fn given_leading_digit_when_labeling_then_prefixes() {
        assert_eq!(element_label("2025 Report.docx", FILE_PREFIX), "File_2025_Report_docx");
        assert_eq!(element_label("2025 (Archive)", DIRECTORY_PREFIX), "Dir_2025__Archive_");
        assert_eq!(element_label("notes.txt", FILE_PREFIX), "notes_txt");
    }

    #[test]
    fn given_non_name_characters_when_labeling_then_replaced() {
        assert_eq!(element_label("a×b.png", FILE_PREFIX), "a_b_png");
        assert_eq!(element_label("½ done.txt", FILE_PREFIX), "__done_txt");
        assert_eq!(element_label("µ-Übersicht", DIRECTORY_PREFIX), "__Übersicht");
        assert_eq!(element_label("résumé.docx", FILE_PREFIX), "résumé_docx");
    }

    #[test]
    fn given_non_ascii_numeral_first_when_labeling_then_no_prefix() {
        assert_eq!(element_label("٣ notes", DIRECTORY_PREFIX), "٣_notes");
    }

    #[test]
    fn given_tree_when_serializing_then_mirrors_structure() {
        let root = Node::directory("My Root", None);
        let img = Node::file(
            "a.png",
            2048.0,
            Some(root.id),
            FileSpec::Image { width: 1920, height: 1080 },
        );
        let empty = Node::directory("empty", Some(root.id));
        let tree = TreeAssembler::new(vec![root, img, empty]).assemble(None).unwrap();

        let element = serialize(&tree);

        assert_eq!(element.label, "My_Root");
        assert_eq!(element.text, None);
        assert_eq!(element.element_count(), 3);
        assert_eq!(
            element.children[0].text.as_deref(),
            Some("resolution: 1920x1080, size: 2048KB")
        );

        let xml = element.to_xml().unwrap();
        assert!(xml.starts_with("<My_Root>"));
        assert!(xml.contains("<a_png>resolution: 1920x1080, size: 2048KB</a_png>"));
        assert!(xml.contains("<empty/>"));
        assert!(xml.trim_end().ends_with("</My_Root>"));
    }
}
