use crate::surface::{ElementId, UiSurface};
use indexmap::{IndexMap, IndexSet};

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    classes: IndexSet<String>,
    styles: IndexMap<String, String>,
    attributes: IndexMap<String, String>,
    disabled: bool,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    width: Option<f64>,
}

impl Node {
    fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            classes: IndexSet::new(),
            styles: IndexMap::new(),
            attributes: IndexMap::new(),
            disabled: false,
            parent: None,
            children: Vec::new(),
            width: None,
        }
    }
}

/// Parsed form of the `tag.class.class` selector subset
struct Selector<'a> {
    tag: Option<&'a str>,
    classes: Vec<&'a str>,
}

impl<'a> Selector<'a> {
    fn parse(selector: &'a str) -> Option<Self> {
        let selector = selector.trim();
        if selector.is_empty() {
            return None;
        }

        let mut parts = selector.split('.');
        let tag = parts.next().filter(|t| !t.is_empty());
        let classes: Vec<&str> = parts.collect();

        if classes.iter().any(|c| c.is_empty()) {
            return None;
        }

        Some(Self { tag, classes })
    }

    fn matches(&self, node: &Node) -> bool {
        if let Some(tag) = self.tag {
            if !node.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        self.classes.iter().all(|c| node.classes.contains(*c))
    }
}

/// In-memory element tree implementing [`UiSurface`].
///
/// The document root is a `body` element. Elements created with
/// [`UiSurface::create_element`] stay detached (invisible to queries) until
/// appended somewhere under the body. Widths default to the viewport width
/// unless set with [`MemoryDocument::set_offset_width`].
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    viewport_width: u32,
}

impl MemoryDocument {
    pub fn new(viewport_width: u32) -> Self {
        Self {
            nodes: vec![Node::new("body")],
            viewport_width,
        }
    }

    pub fn body(&self) -> ElementId {
        ElementId(0)
    }

    /// Create an element with `classes` and append it to `parent`
    pub fn element(&mut self, parent: ElementId, tag: &str, classes: &[&str]) -> ElementId {
        let id = self.create_element(tag);
        for class in classes {
            self.add_class(id, class);
        }
        self.append_child(parent, id);
        id
    }

    pub fn set_viewport_width(&mut self, width: u32) {
        self.viewport_width = width;
    }

    pub fn set_offset_width(&mut self, element: ElementId, width: f64) {
        if let Some(node) = self.node_mut(element) {
            node.width = Some(width);
        }
    }

    /// Inline style value, if set
    pub fn style(&self, element: ElementId, property: &str) -> Option<&str> {
        self.node(element)
            .and_then(|n| n.styles.get(property))
            .map(String::as_str)
    }

    pub fn attribute(&self, element: ElementId, name: &str) -> Option<&str> {
        self.node(element)
            .and_then(|n| n.attributes.get(name))
            .map(String::as_str)
    }

    pub fn is_disabled(&self, element: ElementId) -> bool {
        self.node(element).is_some_and(|n| n.disabled)
    }

    /// Class list in insertion order
    pub fn classes(&self, element: ElementId) -> Vec<&str> {
        self.node(element)
            .map(|n| n.classes.iter().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn children(&self, element: ElementId) -> &[ElementId] {
        self.node(element)
            .map(|n| n.children.as_slice())
            .unwrap_or(&[])
    }

    pub fn tag(&self, element: ElementId) -> Option<&str> {
        self.node(element).map(|n| n.tag.as_str())
    }

    pub fn parent(&self, element: ElementId) -> Option<ElementId> {
        self.node(element).and_then(|n| n.parent)
    }

    fn node(&self, element: ElementId) -> Option<&Node> {
        self.nodes.get(element.0)
    }

    fn node_mut(&mut self, element: ElementId) -> Option<&mut Node> {
        self.nodes.get_mut(element.0)
    }

    /// Pre-order walk of everything below `root`
    fn descendants(&self, root: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.children(root).iter().rev().copied().collect();

        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.children(id).iter().rev().copied());
        }

        out
    }

    fn find_all(&self, root: ElementId, selector: &str, include_root: bool) -> Vec<ElementId> {
        let Some(selector) = Selector::parse(selector) else {
            return Vec::new();
        };

        let mut candidates = Vec::new();
        if include_root {
            candidates.push(root);
        }
        candidates.extend(self.descendants(root));

        candidates
            .into_iter()
            .filter(|id| self.node(*id).is_some_and(|n| selector.matches(n)))
            .collect()
    }
}

impl UiSurface for MemoryDocument {
    fn query(&self, selector: &str) -> Option<ElementId> {
        self.find_all(self.body(), selector, true).into_iter().next()
    }

    fn query_within(&self, root: ElementId, selector: &str) -> Option<ElementId> {
        self.find_all(root, selector, false).into_iter().next()
    }

    fn query_all_within(&self, root: ElementId, selector: &str) -> Vec<ElementId> {
        self.find_all(root, selector, false)
    }

    fn contains(&self, ancestor: ElementId, node: ElementId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.node(element).is_some_and(|n| n.classes.contains(class))
    }

    fn add_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.insert(class.to_string());
        }
    }

    fn remove_class(&mut self, element: ElementId, class: &str) {
        if let Some(node) = self.node_mut(element) {
            node.classes.shift_remove(class);
        }
    }

    fn set_style(&mut self, element: ElementId, property: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn set_attribute(&mut self, element: ElementId, name: &str, value: &str) {
        if let Some(node) = self.node_mut(element) {
            node.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn set_disabled(&mut self, element: ElementId, disabled: bool) {
        if let Some(node) = self.node_mut(element) {
            node.disabled = disabled;
        }
    }

    fn create_element(&mut self, tag: &str) -> ElementId {
        self.nodes.push(Node::new(tag));
        ElementId(self.nodes.len() - 1)
    }

    fn append_child(&mut self, parent: ElementId, child: ElementId) {
        if self.node(parent).is_none() || self.node(child).is_none() {
            return;
        }
        // Refuse to build a cycle
        if self.contains(child, parent) {
            return;
        }

        if let Some(old_parent) = self.parent(child) {
            if let Some(node) = self.node_mut(old_parent) {
                node.children.retain(|c| *c != child);
            }
        }

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            node.children.push(child);
        }
    }

    fn viewport_width(&self) -> u32 {
        self.viewport_width
    }

    fn offset_width(&self, element: ElementId) -> f64 {
        self.node(element)
            .and_then(|n| n.width)
            .unwrap_or(self.viewport_width as f64)
    }
}
