//! Record types returned by the branch/content endpoints.

use serde::{Deserialize, Serialize};
use smol_str::SmolStr;

/// A branch record as returned by `GET` on a note id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchRecord {
    pub id: SmolStr,
    /// Category wire name: "note", "explore" or "promote".
    #[serde(rename = "type")]
    pub kind: SmolStr,
    pub title: SmolStr,
    /// Body content. Absent for branches that have no saved document yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<BranchContent>,
}

impl BranchRecord {
    /// The branch category, if the wire name is one we know.
    pub fn branch_kind(&self) -> Option<trellis_annotations::BranchKind> {
        trellis_annotations::BranchKind::parse(&self.kind)
    }

    /// The record's content flattened to plain text.
    pub fn text(&self) -> String {
        self.content.as_ref().map(BranchContent::text).unwrap_or_default()
    }
}

/// Content payloads come in two shapes: plain (or HTML) text, and a
/// structured text-tree that needs recursive extraction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BranchContent {
    Plain(String),
    Tree(ContentNode),
}

impl BranchContent {
    /// Flatten to plain text, recursing through tree nodes.
    pub fn text(&self) -> String {
        match self {
            BranchContent::Plain(s) => s.clone(),
            BranchContent::Tree(node) => {
                let mut out = String::new();
                node.collect_text(&mut out);
                out
            }
        }
    }
}

/// One node of a structured content tree.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<ContentNode>,
}

impl ContentNode {
    fn collect_text(&self, out: &mut String) {
        if let Some(text) = &self.text {
            out.push_str(text);
        }
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// A note document as returned by `GET` on a note id + panel id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NoteDocument {
    pub id: SmolStr,
    pub title: SmolStr,
    #[serde(default)]
    pub content: Option<BranchContent>,
}

impl NoteDocument {
    pub fn text(&self) -> String {
        self.content.as_ref().map(BranchContent::text).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_annotations::BranchKind;

    #[test]
    fn test_plain_content_record() {
        let record: BranchRecord = serde_json::from_str(
            r#"{"id":"br-1","type":"note","title":"First","content":"hello world"}"#,
        )
        .unwrap();
        assert_eq!(record.id, "br-1");
        assert_eq!(record.branch_kind(), Some(BranchKind::Note));
        assert_eq!(record.text(), "hello world");
    }

    #[test]
    fn test_tree_content_recursive_extraction() {
        let record: BranchRecord = serde_json::from_str(
            r#"{
                "id": "br-2",
                "type": "explore",
                "title": "Deep",
                "content": {
                    "text": "a",
                    "children": [
                        {"text": "b", "children": [{"text": "c"}]},
                        {"children": [{"text": "d"}]}
                    ]
                }
            }"#,
        )
        .unwrap();
        assert_eq!(record.text(), "abcd");
    }

    #[test]
    fn test_missing_content_is_empty_text() {
        let record: BranchRecord =
            serde_json::from_str(r#"{"id":"br-3","type":"promote","title":"Bare"}"#).unwrap();
        assert!(record.content.is_none());
        assert_eq!(record.text(), "");
    }

    #[test]
    fn test_unknown_kind_degrades() {
        let record: BranchRecord =
            serde_json::from_str(r#"{"id":"br-4","type":"archive","title":"Odd"}"#).unwrap();
        assert_eq!(record.branch_kind(), None);
    }
}
