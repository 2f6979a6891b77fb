//! Document tree model.
//!
//! A [`Document`] bundles the variable store with the pages of visual nodes
//! whose paints get rebound. Nodes own optional fill and stroke lists and an
//! optional list of children; leaf shapes have no children list at all, and
//! non-paintable containers have no paint lists, just like the host's nodes.
//!
//! Paint lists are replaced wholesale through [`Node::set_paints`], which is
//! also where non-editable nodes refuse the write.
//!
//! Documents are rewritten in place, so host fields the model does not name
//! (geometry, visibility, effects) are kept in the `extra` map of each page,
//! node and paint and written back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use swatch_core::paint::Paint;

use crate::{error::SwatchError, store::MemoryStore};

/// Why a node's paints could not be written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("node is locked")]
    Locked,

    #[error("node is read-only")]
    ReadOnly,
}

/// The two paint lists a node can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintSlot {
    Fills,
    Strokes,
}

impl PaintSlot {
    pub const ALL: [PaintSlot; 2] = [PaintSlot::Fills, PaintSlot::Strokes];
}

/// Host node type.
///
/// Types without a variant keep their host name in [`NodeKind::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Frame,
    Group,
    Section,
    Component,
    Instance,
    Rectangle,
    Ellipse,
    Line,
    Vector,
    Text,
    Other(String),
}

impl From<String> for NodeKind {
    fn from(kind: String) -> Self {
        match kind.as_str() {
            "FRAME" => Self::Frame,
            "GROUP" => Self::Group,
            "SECTION" => Self::Section,
            "COMPONENT" => Self::Component,
            "INSTANCE" => Self::Instance,
            "RECTANGLE" => Self::Rectangle,
            "ELLIPSE" => Self::Ellipse,
            "LINE" => Self::Line,
            "VECTOR" => Self::Vector,
            "TEXT" => Self::Text,
            _ => Self::Other(kind),
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Frame => "FRAME".to_string(),
            NodeKind::Group => "GROUP".to_string(),
            NodeKind::Section => "SECTION".to_string(),
            NodeKind::Component => "COMPONENT".to_string(),
            NodeKind::Instance => "INSTANCE".to_string(),
            NodeKind::Rectangle => "RECTANGLE".to_string(),
            NodeKind::Ellipse => "ELLIPSE".to_string(),
            NodeKind::Line => "LINE".to_string(),
            NodeKind::Vector => "VECTOR".to_string(),
            NodeKind::Text => "TEXT".to_string(),
            NodeKind::Other(kind) => kind,
        }
    }
}

/// A visual element of the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(rename = "type")]
    kind: NodeKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    locked: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    read_only: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    fills: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    strokes: Option<Vec<Paint>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    children: Option<Vec<Node>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Node {
    /// Creates an editable node with no paint lists and no children list.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            locked: false,
            read_only: false,
            fills: None,
            strokes: None,
            children: None,
            extra: Map::new(),
        }
    }

    pub fn with_fills(mut self, fills: Vec<Paint>) -> Self {
        self.fills = Some(fills);
        self
    }

    pub fn with_strokes(mut self, strokes: Vec<Paint>) -> Self {
        self.strokes = Some(strokes);
        self
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = locked;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Host fields this model does not name, such as `visible`.
    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// The paint list in `slot`, or `None` if this node type has none.
    pub fn paints(&self, slot: PaintSlot) -> Option<&[Paint]> {
        match slot {
            PaintSlot::Fills => self.fills.as_deref(),
            PaintSlot::Strokes => self.strokes.as_deref(),
        }
    }

    /// Replaces the paint list in `slot`.
    ///
    /// # Errors
    ///
    /// Returns an [`EditError`] if the node is locked or read-only; the
    /// existing list is left untouched.
    pub fn set_paints(&mut self, slot: PaintSlot, paints: Vec<Paint>) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::ReadOnly);
        }
        if self.locked {
            return Err(EditError::Locked);
        }
        match slot {
            PaintSlot::Fills => self.fills = Some(paints),
            PaintSlot::Strokes => self.strokes = Some(paints),
        }
        Ok(())
    }

    /// Child nodes; empty for leaf shapes.
    pub fn children(&self) -> &[Node] {
        self.children.as_deref().unwrap_or_default()
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        self.children.as_deref_mut().unwrap_or_default()
    }

    /// Depth-first search for a node by id, including this node.
    pub fn find(&self, id: &str) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children().iter().find_map(|child| child.find(id))
    }
}

/// A page of the document; its children are the top-level nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    name: String,
    #[serde(default)]
    children: Vec<Node>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl Page {
    pub fn new(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            children,
            extra: Map::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Top-level nodes.
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }

    /// Depth-first search for a node by id.
    pub fn find(&self, id: &str) -> Option<&Node> {
        self.children.iter().find_map(|node| node.find(id))
    }
}

/// A design document: variables plus pages.
///
/// # Examples
///
/// ```
/// use swatch::document::{Document, Node, NodeKind, Page};
///
/// let mut document = Document::new();
/// document.add_page(Page::new("Home", vec![Node::new("1:1", "Frame", NodeKind::Frame)]));
///
/// let json = document.to_json().unwrap();
/// let back = Document::from_json(&json).unwrap();
/// assert_eq!(back.current_page().unwrap().name(), "Home");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default)]
    variables: MemoryStore,
    #[serde(default)]
    pages: Vec<Page>,
    #[serde(default)]
    current_page: usize,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a document from its JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`SwatchError::Document`] if the JSON is malformed or does not
    /// describe a document.
    pub fn from_json(source: &str) -> Result<Self, SwatchError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, SwatchError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn store(&self) -> &MemoryStore {
        &self.variables
    }

    pub fn store_mut(&mut self) -> &mut MemoryStore {
        &mut self.variables
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Appends a page; the first page added becomes the current page.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    pub fn set_current_page(&mut self, index: usize) {
        self.current_page = index;
    }

    /// The page the rebinding walk runs on, if the index is valid.
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current_page)
    }

    pub fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.pages.get_mut(self.current_page)
    }
}

#[cfg(test)]
mod tests {
    use swatch_core::{color::Color, paint::SolidPaint};

    use super::*;

    fn solid(hex: &str) -> Paint {
        SolidPaint::new(Color::new(hex).unwrap(), 1.0).into()
    }

    #[test]
    fn test_set_paints_replaces_list() {
        let mut node = Node::new("1:1", "Box", NodeKind::Rectangle).with_fills(vec![solid("#fff")]);
        node.set_paints(PaintSlot::Fills, vec![solid("#000"), solid("#ccc")])
            .unwrap();
        assert_eq!(node.paints(PaintSlot::Fills).unwrap().len(), 2);
        assert!(node.paints(PaintSlot::Strokes).is_none());
    }

    #[test]
    fn test_locked_node_refuses_write() {
        let original = vec![solid("#fff")];
        let mut node = Node::new("1:1", "Box", NodeKind::Rectangle)
            .with_fills(original.clone())
            .with_locked(true);

        let err = node.set_paints(PaintSlot::Fills, Vec::new()).unwrap_err();
        assert_eq!(err, EditError::Locked);
        assert_eq!(node.paints(PaintSlot::Fills), Some(original.as_slice()));
    }

    #[test]
    fn test_read_only_node_refuses_write() {
        let mut node = Node::new("1:1", "Label", NodeKind::Text).with_read_only(true);
        let err = node.set_paints(PaintSlot::Strokes, Vec::new()).unwrap_err();
        assert_eq!(err, EditError::ReadOnly);
    }

    #[test]
    fn test_find_nested() {
        let page = Page::new(
            "Home",
            vec![Node::new("1:1", "Frame", NodeKind::Frame).with_children(vec![
                Node::new("1:2", "Group", NodeKind::Group)
                    .with_children(vec![Node::new("1:3", "Dot", NodeKind::Ellipse)]),
            ])],
        );
        assert_eq!(page.find("1:3").unwrap().name(), "Dot");
        assert!(page.find("9:9").is_none());
    }

    #[test]
    fn test_leaf_has_no_children() {
        let mut node = Node::new("1:1", "Dot", NodeKind::Ellipse);
        assert!(node.children().is_empty());
        assert!(node.children_mut().is_empty());
    }

    #[test]
    fn test_unknown_node_type_keeps_its_name() {
        let node: Node = serde_json::from_str(r#"{"id":"1:1","type":"STAR"}"#).unwrap();
        assert_eq!(node.kind(), &NodeKind::Other("STAR".to_string()));

        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"STAR""#));
    }

    #[test]
    fn test_known_node_type_round_trip() {
        let node = Node::new("1:1", "Box", NodeKind::Rectangle);
        let json = serde_json::to_string(&node).unwrap();
        assert!(json.contains(r#""type":"RECTANGLE""#));
        let back: Node = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kind(), &NodeKind::Rectangle);
    }

    #[test]
    fn test_unmodeled_fields_survive_round_trip() {
        let source = r#"{
            "pages": [{
                "name": "Home",
                "backgrounds": [],
                "children": [{
                    "id": "1:1",
                    "type": "RECTANGLE",
                    "visible": false,
                    "absoluteBoundingBox": { "x": 0, "y": 0, "width": 120, "height": 40 }
                }]
            }]
        }"#;

        let document = Document::from_json(source).unwrap();
        let node = document.current_page().unwrap().find("1:1").unwrap();
        assert_eq!(node.extra().get("visible"), Some(&Value::Bool(false)));

        let written: Value = serde_json::from_str(&document.to_json().unwrap()).unwrap();
        assert_eq!(written["pages"][0]["backgrounds"], Value::Array(Vec::new()));
        let node = &written["pages"][0]["children"][0];
        assert_eq!(node["visible"], false);
        assert_eq!(node["absoluteBoundingBox"]["width"], 120);
    }

    #[test]
    fn test_missing_current_page() {
        let mut document = Document::new();
        assert!(document.current_page().is_none());
        document.add_page(Page::new("Home", Vec::new()));
        document.set_current_page(3);
        assert!(document.current_page_mut().is_none());
    }

    #[test]
    fn test_malformed_json_is_document_error() {
        let err = Document::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SwatchError::Document(_)));
    }
}
