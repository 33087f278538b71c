//! Free functions over `RcDom` handles.

use html5ever::{Attribute, LocalName, Namespace, QualName};
use markup5ever_rcdom::{Handle, NodeData};

pub(crate) const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Lower-case local name of an element node, `None` for every other node kind.
pub fn tag_name(node: &Handle) -> Option<&str> {
    match node.data {
        NodeData::Element { ref name, .. } => Some(&*name.local),
        _ => None,
    }
}

pub fn is_element(node: &Handle) -> bool {
    matches!(node.data, NodeData::Element { .. })
}

/// Value of attribute `name`, if present.
pub fn attribute(node: &Handle, name: &str) -> Option<String> {
    match node.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// Set attribute `name` to `value`, replacing any existing value.
/// Does nothing for non-element nodes.
pub fn set_attribute(node: &Handle, name: &str, value: &str) {
    if let NodeData::Element { ref attrs, .. } = node.data {
        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| &*attr.name.local == name) {
            Some(existing) => existing.value = value.into(),
            None => attrs.push(new_attribute(name, value)),
        }
    }
}

pub fn has_class(node: &Handle, class: &str) -> bool {
    attribute(node, "class")
        .map(|value| value.split_ascii_whitespace().any(|candidate| candidate == class))
        .unwrap_or(false)
}

/// Element id, treating an empty attribute as absent.
pub fn id(node: &Handle) -> Option<String> {
    attribute(node, "id").filter(|value| !value.is_empty())
}

/// Concatenated text of every descendant text node, like DOM `textContent`.
pub fn text_content(node: &Handle) -> String {
    let mut text = String::new();
    let mut stack = vec![node.clone()];
    while let Some(current) = stack.pop() {
        if let NodeData::Text { ref contents } = current.data {
            text.push_str(&contents.borrow());
        }
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }
    text
}

/// Parent of `node`, if it is attached to a tree.
pub fn parent(node: &Handle) -> Option<Handle> {
    let weak = node.parent.take();
    let parent = weak.as_ref().and_then(|weak| weak.upgrade());
    node.parent.set(weak);
    parent
}

/// Nearest ancestor that is an element.
pub fn parent_element(node: &Handle) -> Option<Handle> {
    let mut current = parent(node);
    while let Some(candidate) = current {
        if is_element(&candidate) {
            return Some(candidate);
        }
        current = parent(&candidate);
    }
    None
}

/// Every element below `node` in document (pre-)order, excluding `node` itself.
pub fn descendant_elements(node: &Handle) -> Vec<Handle> {
    let mut elements = Vec::new();
    let mut stack: Vec<Handle> = node.children.borrow().iter().rev().cloned().collect();
    while let Some(current) = stack.pop() {
        if is_element(&current) {
            elements.push(current.clone());
        }
        for child in current.children.borrow().iter().rev() {
            stack.push(child.clone());
        }
    }
    elements
}

pub(crate) fn html_name(tag: &str) -> QualName {
    QualName::new(None, Namespace::from(HTML_NAMESPACE), LocalName::from(tag))
}

pub(crate) fn new_attribute(name: &str, value: &str) -> Attribute {
    Attribute {
        name: QualName::new(None, Namespace::from(""), LocalName::from(name)),
        value: value.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Document;

    #[test]
    fn text_content_joins_nested_text() {
        let doc = Document::parse("<h2 id=x>Hello <em>big</em> world<!-- note --></h2>");
        let heading = doc.element_by_id("x").unwrap();
        assert_eq!(text_content(&heading), "Hello big world");
    }

    #[test]
    fn empty_id_counts_as_missing() {
        let doc = Document::parse("<h2 id=\"\" class=\"a b\">T</h2>");
        let heading = descendant_elements(&doc.root())
            .into_iter()
            .find(|node| tag_name(node) == Some("h2"))
            .unwrap();
        assert_eq!(id(&heading), None);
        assert!(has_class(&heading, "b"));
        assert!(!has_class(&heading, "c"));

        set_attribute(&heading, "id", "fresh");
        assert_eq!(id(&heading).as_deref(), Some("fresh"));
    }

    #[test]
    fn parent_element_skips_document_node() {
        let doc = Document::parse("<p id=p>x</p>");
        let html = descendant_elements(&doc.root())
            .into_iter()
            .find(|node| tag_name(node) == Some("html"))
            .unwrap();
        assert!(parent_element(&html).is_none());
        assert!(parent(&html).is_some());
    }
}
