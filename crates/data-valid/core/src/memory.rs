//! In-memory element tree
//!
//! A small reference-counted element tree implementing [`FieldElement`], so
//! the validator lifecycle can run without a browser.
//!
//! ```
//! use data_valid_core::memory::Node;
//!
//! let form = Node::element("form");
//! let row = Node::element("div");
//! let phone = Node::input(r#"{"type":"validPhone"}"#);
//! form.append(&row);
//! row.append(&phone);
//!
//! assert_eq!(form.tagged_inputs("data-valid").len(), 1);
//! assert!(form.contains(&phone));
//! ```

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::present::FieldElement;

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: BTreeMap<String, String>,
    classes: Vec<String>,
    style: BTreeMap<String, String>,
    value: String,
    text: String,
    children: Vec<Node>,
    parent: Option<Weak<RefCell<NodeData>>>,
}

/// Shared handle to an element
#[derive(Debug, Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    pub fn element(tag: &str) -> Self {
        Node(Rc::new(RefCell::new(NodeData {
            tag: tag.to_string(),
            ..NodeData::default()
        })))
    }

    /// An `<input>` tagged with `data-valid` set to `config`
    pub fn input(config: &str) -> Self {
        let node = Self::element("input");
        node.set_attribute("data-valid", config);
        node
    }

    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn set_attribute(&self, name: &str, value: &str) {
        self.0
            .borrow_mut()
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    pub fn get_attribute(&self, name: &str) -> Option<String> {
        self.0.borrow().attributes.get(name).cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.0.borrow().classes.iter().any(|c| c == class)
    }

    pub fn add_class(&self, class: &str) {
        if !self.has_class(class) {
            self.0.borrow_mut().classes.push(class.to_string());
        }
    }

    pub fn remove_class(&self, class: &str) {
        self.0.borrow_mut().classes.retain(|c| c != class);
    }

    pub fn style(&self, property: &str) -> Option<String> {
        self.0.borrow().style.get(property).cloned()
    }

    pub fn set_style(&self, property: &str, value: &str) {
        self.0
            .borrow_mut()
            .style
            .insert(property.to_string(), value.to_string());
    }

    pub fn value(&self) -> String {
        self.0.borrow().value.clone()
    }

    pub fn set_value(&self, value: &str) {
        self.0.borrow_mut().value = value.to_string();
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn set_text(&self, text: &str) {
        self.0.borrow_mut().text = text.to_string();
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn parent(&self) -> Option<Node> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Node)
    }

    /// Append `child`, detaching it from any previous parent
    pub fn append(&self, child: &Node) {
        child.remove();
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child.clone());
    }

    /// Detach from the parent
    pub fn remove(&self) {
        if let Some(parent) = self.parent() {
            parent
                .0
                .borrow_mut()
                .children
                .retain(|c| !Rc::ptr_eq(&c.0, &self.0));
        }
        self.0.borrow_mut().parent = None;
    }

    pub fn ptr_eq(&self, other: &Node) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Whether `other` is this node or one of its descendants
    pub fn contains(&self, other: &Node) -> bool {
        let mut current = Some(other.clone());
        while let Some(node) = current {
            if node.ptr_eq(self) {
                return true;
            }
            current = node.parent();
        }
        false
    }

    /// The topmost ancestor, or self when detached
    pub fn root(&self) -> Node {
        let mut current = self.clone();
        while let Some(parent) = current.parent() {
            current = parent;
        }
        current
    }

    /// Whether the node sits in a document, i.e. under an `html` or `body` root
    pub fn is_connected(&self) -> bool {
        matches!(self.root().tag().as_str(), "html" | "body")
    }

    /// Descendants in document order, excluding self
    pub fn descendants(&self) -> Vec<Node> {
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child.clone());
            out.extend(child.descendants());
        }
        out
    }

    pub fn find_by_class(&self, class: &str) -> Vec<Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.has_class(class))
            .collect()
    }

    /// Descendant `<input>` elements carrying `attribute`
    pub fn tagged_inputs(&self, attribute: &str) -> Vec<Node> {
        self.descendants()
            .into_iter()
            .filter(|n| n.tag() == "input" && n.get_attribute(attribute).is_some())
            .collect()
    }
}

impl FieldElement for Node {
    fn attribute(&self, name: &str) -> Option<String> {
        self.get_attribute(name)
    }

    fn value(&self) -> String {
        Node::value(self)
    }

    fn add_class(&self, class: &str) {
        Node::add_class(self, class)
    }

    fn remove_class(&self, class: &str) {
        Node::remove_class(self, class)
    }

    fn position_parent(&self) {
        if let Some(parent) = self.parent() {
            parent.set_style("position", "relative");
        }
    }

    fn add_parent_class(&self, class: &str) {
        if let Some(parent) = self.parent() {
            parent.add_class(class);
        }
    }

    fn remove_parent_class(&self, class: &str) {
        if let Some(parent) = self.parent() {
            parent.remove_class(class);
        }
    }

    fn parent_has_class(&self, class: &str) -> bool {
        self.parent().is_some_and(|p| p.has_class(class))
    }

    fn remove_tips(&self, class: &str) {
        let Some(parent) = self.parent() else {
            return;
        };
        for tip in parent.children().iter().filter(|c| c.has_class(class)) {
            tip.remove();
        }
    }

    fn append_tip(&self, class: &str, message: &str) {
        let Some(parent) = self.parent() else {
            return;
        };
        let tip = Node::element("div");
        tip.add_class(class);
        tip.set_text(message);
        parent.append(&tip);
    }

    fn is_same(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }

    fn is_connected(&self) -> bool {
        Node::is_connected(self)
    }
}
