// crates/guideline-audit-assess/src/memdoc.rs
// ============================================================================
// Module: In-Memory Document
// Description: Arena-backed document tree implementing the query interface.
// Purpose: Provide a deterministic document model for tests and demos.
// Dependencies: guideline-audit-core
// ============================================================================

//! ## Overview
//! [`MemDocument`] stores nodes in an arena and implements [`DocumentQuery`]
//! with a minimal selector dialect: `tag`, `.class`, `tag.class`, and `*`.
//! Selector matches and child listings are in document (pre-order) order.
//! Node references encode the arena index; a stale or foreign reference
//! resolves to nothing rather than panicking.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::BTreeSet;

use guideline_audit_core::DocumentQuery;
use guideline_audit_core::NodeRef;

// ============================================================================
// SECTION: Node Storage
// ============================================================================

/// Reference prefix for nodes owned by a [`MemDocument`].
const NODE_REF_PREFIX: &str = "mem:";

/// One element in the arena.
#[derive(Debug, Clone)]
struct MemNode {
    /// Lowercase tag name.
    tag: String,
    /// Class names attached to the element.
    classes: BTreeSet<String>,
    /// Attribute name -> value.
    attributes: BTreeMap<String, String>,
    /// Text content owned directly by this element.
    text: String,
    /// Child indices in document order.
    children: Vec<usize>,
}

impl MemNode {
    /// Creates an empty element with the given tag.
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: BTreeSet::new(),
            attributes: BTreeMap::new(),
            text: String::new(),
            children: Vec::new(),
        }
    }
}

// ============================================================================
// SECTION: Selector Dialect
// ============================================================================

/// Parsed form of the supported selector dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Selector {
    /// `*` matches every element.
    Any,
    /// `tag` matches elements by tag name.
    Tag(String),
    /// `.class` matches elements carrying the class.
    Class(String),
    /// `tag.class` matches both at once.
    TagClass(String, String),
}

impl Selector {
    /// Parses a selector; unsupported syntax yields `None`.
    fn parse(selector: &str) -> Option<Self> {
        let trimmed = selector.trim();
        if trimmed.is_empty() || trimmed.contains(char::is_whitespace) {
            return None;
        }
        if trimmed == "*" {
            return Some(Self::Any);
        }
        if let Some(class) = trimmed.strip_prefix('.') {
            if class.is_empty() || class.contains('.') {
                return None;
            }
            return Some(Self::Class(class.to_ascii_lowercase()));
        }
        match trimmed.split_once('.') {
            Some((tag, class)) if !tag.is_empty() && !class.is_empty() && !class.contains('.') => {
                Some(Self::TagClass(
                    tag.to_ascii_lowercase(),
                    class.to_ascii_lowercase(),
                ))
            }
            Some(_) => None,
            None => Some(Self::Tag(trimmed.to_ascii_lowercase())),
        }
    }

    /// Returns true when the node satisfies the selector.
    fn matches(&self, node: &MemNode) -> bool {
        match self {
            Self::Any => true,
            Self::Tag(tag) => node.tag == *tag,
            Self::Class(class) => node.classes.contains(class),
            Self::TagClass(tag, class) => node.tag == *tag && node.classes.contains(class),
        }
    }
}

// ============================================================================
// SECTION: Document
// ============================================================================

/// Arena-backed in-memory document tree.
///
/// # Invariants
/// - Index 0 is always the root.
/// - Children are stored in document order and never reparented.
#[derive(Debug, Clone)]
pub struct MemDocument {
    /// Arena of all elements; index 0 is the root.
    nodes: Vec<MemNode>,
}

impl MemDocument {
    /// Creates a document with a root element of the given tag.
    #[must_use]
    pub fn new(root_tag: &str) -> Self {
        Self {
            nodes: vec![MemNode::new(root_tag)],
        }
    }

    /// Appends a child element and returns its reference.
    ///
    /// An invalid parent reference leaves the document unchanged and returns
    /// a reference to the root.
    pub fn append(&mut self, parent: &NodeRef, tag: &str) -> NodeRef {
        let Some(parent_index) = self.decode(parent) else {
            return self.encode(0);
        };
        let index = self.nodes.len();
        self.nodes.push(MemNode::new(tag));
        self.nodes[parent_index].children.push(index);
        self.encode(index)
    }

    /// Sets the direct text content of an element.
    pub fn set_text(&mut self, node: &NodeRef, text: &str) {
        if let Some(index) = self.decode(node) {
            self.nodes[index].text = text.to_string();
        }
    }

    /// Sets an attribute on an element.
    pub fn set_attribute(&mut self, node: &NodeRef, name: &str, value: &str) {
        if let Some(index) = self.decode(node) {
            self.nodes[index]
                .attributes
                .insert(name.to_ascii_lowercase(), value.to_string());
        }
    }

    /// Adds a class to an element.
    pub fn add_class(&mut self, node: &NodeRef, class: &str) {
        if let Some(index) = self.decode(node) {
            self.nodes[index].classes.insert(class.to_ascii_lowercase());
        }
    }

    /// Returns the number of elements in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns false; a document always holds at least the root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Encodes an arena index as a node reference.
    fn encode(&self, index: usize) -> NodeRef {
        NodeRef::new(format!("{NODE_REF_PREFIX}{index}"))
    }

    /// Decodes a node reference back to an arena index, when valid.
    fn decode(&self, node: &NodeRef) -> Option<usize> {
        let index: usize = node.as_str().strip_prefix(NODE_REF_PREFIX)?.parse().ok()?;
        (index < self.nodes.len()).then_some(index)
    }

    /// Collects matching strict descendants of `scope` in pre-order.
    fn collect(&self, selector: &Selector, scope: usize, matched: &mut Vec<NodeRef>) {
        for &child in &self.nodes[scope].children {
            if selector.matches(&self.nodes[child]) {
                matched.push(self.encode(child));
            }
            self.collect(selector, child, matched);
        }
    }

    /// Appends the subtree text of `index` to `segments`.
    fn gather_text(&self, index: usize, segments: &mut Vec<String>) {
        let own = self.nodes[index].text.trim();
        if !own.is_empty() {
            segments.push(own.to_string());
        }
        for &child in &self.nodes[index].children {
            self.gather_text(child, segments);
        }
    }
}

impl DocumentQuery for MemDocument {
    fn root(&self) -> NodeRef {
        self.encode(0)
    }

    fn scry(&self, selector: &str, scope: &NodeRef) -> Vec<NodeRef> {
        let Some(parsed) = Selector::parse(selector) else {
            return Vec::new();
        };
        let Some(scope_index) = self.decode(scope) else {
            return Vec::new();
        };
        let mut matched = Vec::new();
        self.collect(&parsed, scope_index, &mut matched);
        matched
    }

    fn tag(&self, node: &NodeRef) -> Option<String> {
        self.decode(node).map(|index| self.nodes[index].tag.clone())
    }

    fn attribute(&self, node: &NodeRef, name: &str) -> Option<String> {
        let index = self.decode(node)?;
        self.nodes[index]
            .attributes
            .get(&name.to_ascii_lowercase())
            .cloned()
    }

    fn text(&self, node: &NodeRef) -> String {
        let Some(index) = self.decode(node) else {
            return String::new();
        };
        let mut segments = Vec::new();
        self.gather_text(index, &mut segments);
        segments.join(" ")
    }

    fn children(&self, node: &NodeRef) -> Vec<NodeRef> {
        let Some(index) = self.decode(node) else {
            return Vec::new();
        };
        self.nodes[index]
            .children
            .iter()
            .map(|&child| self.encode(child))
            .collect()
    }
}
