use html5ever::serialize::{serialize, SerializeOpts, TraversalScope};
use html5ever::tendril::TendrilSink;
use html5ever::tree_builder::{ElementFlags, NodeOrText, TreeSink};
use html5ever::{parse_document, ParseOpts};
use log::debug;
use markup5ever_rcdom::{Handle, RcDom, SerializableHandle};

use crate::error::DomError;
use crate::node;
use crate::selector::Selector;

/// A parsed HTML page.
pub struct Document {
    dom: RcDom,
}

impl Document {
    /// Parse a complete page. The HTML parser recovers from malformed
    /// markup, so parsing itself never fails.
    pub fn parse(html: &str) -> Self {
        let dom = parse_document(RcDom::default(), ParseOpts::default()).one(html);
        Self::from_dom(dom)
    }

    fn from_dom(dom: RcDom) -> Self {
        if !dom.errors.is_empty() {
            debug!("html parser recovered from {} error(s)", dom.errors.len());
        }
        Document { dom }
    }

    /// The document node.
    pub fn root(&self) -> Handle {
        self.dom.document.clone()
    }

    /// First element in document order matching `selector`.
    pub fn query_selector(&self, selector: &Selector) -> Option<Handle> {
        node::descendant_elements(&self.dom.document)
            .into_iter()
            .find(|element| selector.matches(element))
    }

    /// Every element below `scope` matching `selector`, in document order.
    pub fn query_selector_all(&self, scope: &Handle, selector: &Selector) -> Vec<Handle> {
        node::descendant_elements(scope)
            .into_iter()
            .filter(|element| selector.matches(element))
            .collect()
    }

    pub fn element_by_id(&self, id: &str) -> Option<Handle> {
        node::descendant_elements(&self.dom.document)
            .into_iter()
            .find(|element| node::attribute(element, "id").as_deref() == Some(id))
    }

    /// Every non-empty `id` attribute in the document, in document order.
    pub fn ids(&self) -> Vec<String> {
        node::descendant_elements(&self.dom.document)
            .iter()
            .filter_map(node::id)
            .collect()
    }

    /// Create a detached HTML element carrying the given class attribute.
    pub fn create_element(&mut self, tag: &str, class: Option<&str>) -> Handle {
        let attrs = class
            .map(|value| vec![node::new_attribute("class", value)])
            .unwrap_or_default();
        self.dom
            .create_element(node::html_name(tag), attrs, ElementFlags::default())
    }

    pub fn append_child(&mut self, parent: &Handle, child: &Handle) {
        self.dom.append(parent, NodeOrText::AppendNode(child.clone()));
    }

    pub fn append_text(&mut self, parent: &Handle, text: &str) {
        if text.is_empty() {
            return;
        }
        self.dom.append(parent, NodeOrText::AppendText(text.into()));
    }

    /// Insert the detached `node` immediately before `sibling`.
    /// Returns `false` (and does nothing) when `sibling` has no parent.
    pub fn insert_before(&mut self, sibling: &Handle, node: &Handle) -> bool {
        if node::parent(sibling).is_none() {
            return false;
        }
        self.dom
            .append_before_sibling(sibling, NodeOrText::AppendNode(node.clone()));
        true
    }

    /// Detach `node` from its parent so it can be re-inserted elsewhere.
    pub fn detach(&mut self, node: &Handle) {
        self.dom.remove_from_parent(node);
    }

    /// Serialise the whole page back to HTML.
    pub fn to_html(&self) -> Result<String, DomError> {
        let mut bytes = Vec::new();
        let opts = SerializeOpts {
            traversal_scope: TraversalScope::ChildrenOnly(None),
            ..SerializeOpts::default()
        };
        let handle: SerializableHandle = self.dom.document.clone().into();
        serialize(&mut bytes, &handle, opts)?;
        Ok(String::from_utf8(bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn collects_ids_in_document_order() {
        let doc = Document::parse(r#"<div id="a"><p id="b"></p><p id=""></p></div><span id="c"></span>"#);
        assert_eq!(doc.ids(), vec!["a", "b", "c"]);
    }

    #[test]
    fn relocates_nodes_and_serialises() {
        let mut doc = Document::parse(r#"<body><p id="content">Body</p></body>"#);
        let content = doc.element_by_id("content").unwrap();

        let wrapper = doc.create_element("div", Some("wrap"));
        assert!(doc.insert_before(&content, &wrapper));
        doc.detach(&content);
        doc.append_child(&wrapper, &content);
        doc.append_text(&wrapper, "!");

        let html = doc.to_html().unwrap();
        assert!(html.contains(r#"<div class="wrap"><p id="content">Body</p>!</div>"#));
    }

    #[test]
    fn insert_before_requires_attached_sibling() {
        let mut doc = Document::parse("<p>x</p>");
        let orphan = doc.create_element("div", None);
        let other = doc.create_element("span", None);
        assert!(!doc.insert_before(&orphan, &other));
    }
}
