//! Document tree shared by the XML editor, the query engine and the merge.
//!
//! A document is an ordered tree of [`Node`]s. Elements carry a name, an
//! optional scalar value, an insertion-ordered attribute map and their
//! children; comments are first-class siblings so that they keep their
//! position through queries and merges without a separate side channel.

use indexmap::IndexMap;

/// Attribute controlling how an element merges with its recessive twin.
pub const SELF_COMBINATION_MODE: &str = "combine.self";
/// Attribute controlling how an element's children merge.
pub const CHILDREN_COMBINATION_MODE: &str = "combine.children";

/// `combine.self` value that ignores the recessive element entirely.
pub const SELF_COMBINATION_OVERRIDE: &str = "override";
/// `combine.children` value that appends recessive children instead of merging by name.
pub const CHILDREN_COMBINATION_APPEND: &str = "append";

/// One member of a document tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// A named element with attributes and children
    Element(Element),
    /// A comment, kept in its original position
    Comment(String),
}

impl Node {
    /// The element behind this node, if it is one
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        }
    }

    /// Mutable access to the element behind this node, if it is one
    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Comment(_) => None,
        }
    }

    /// True when this node is an element with the given name
    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, Node::Element(element) if element.name == name)
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

/// An XML element
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub value: Option<String>,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
}

impl Element {
    /// Create an empty element
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Create a leaf element holding a scalar value
    pub fn leaf(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    /// Builder-style child append
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Builder-style attribute
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder-style leaf child, skipped when the value is `None`
    pub fn with_leaf(self, name: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.with_child(Element::leaf(name, value)),
            None => self,
        }
    }

    /// The scalar value, treating an empty string as absent
    pub fn text(&self) -> Option<&str> {
        self.value.as_deref().filter(|v| !v.is_empty())
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = Some(value.into());
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// True when the element has no element children
    pub fn is_leaf(&self) -> bool {
        !self.children.iter().any(|c| matches!(c, Node::Element(_)))
    }

    /// Iterate over element children, skipping comments
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Iterate over element children with the given name
    pub fn elements_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> {
        self.elements().filter(move |e| e.name == name)
    }

    /// First element child with the given name
    pub fn child(&self, name: &str) -> Option<&Element> {
        self.elements().find(|e| e.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Element> {
        self.children
            .iter_mut()
            .filter_map(Node::as_element_mut)
            .find(|e| e.name == name)
    }

    /// Position of the first element child with the given name
    pub fn child_index(&self, name: &str) -> Option<usize> {
        self.children.iter().position(|c| c.is_named(name))
    }

    /// Text of the first element child with the given name
    pub fn child_text(&self, name: &str) -> Option<&str> {
        self.child(name).and_then(Element::text)
    }

    /// Follow a slash separated path of element names
    pub fn descendant(&self, path: &str) -> Option<&Element> {
        path.split('/')
            .filter(|s| !s.is_empty())
            .try_fold(self, |element, segment| element.child(segment))
    }

    pub fn descendant_mut(&mut self, path: &str) -> Option<&mut Element> {
        let mut current = self;
        for segment in path.split('/').filter(|s| !s.is_empty()) {
            current = current.child_mut(segment)?;
        }
        Some(current)
    }

    /// Set the text of the named child, appending the child when missing
    pub fn set_child_text(&mut self, name: &str, value: impl Into<String>) {
        match self.child_mut(name) {
            Some(child) => child.set_value(value),
            None => self.children.push(Element::leaf(name, value).into()),
        }
    }

    /// Remove every element child with the given name, returning how many went
    pub fn remove_children_named(&mut self, name: &str) -> usize {
        let before = self.children.len();
        self.children.retain(|c| !c.is_named(name));
        before - self.children.len()
    }

    /// Remove children at the given positions
    ///
    /// Indices refer to the current `children` vector; duplicates and
    /// out-of-range positions are ignored.
    pub fn remove_indices(&mut self, indices: &[usize]) -> usize {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.children.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for &index in sorted.iter().rev() {
            self.children.remove(index);
        }
        sorted.len()
    }
}
