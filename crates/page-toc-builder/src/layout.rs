use page_toc_config::ClassNames;
use page_toc_dom::{Document, Handle};

/// Wrap `content` in the two-column layout with `nav` in the sidebar.
///
/// The wrapper takes the content's place in its parent; the content itself is
/// moved into the main region. Returns `false` without touching the document
/// when `content` is detached.
pub(crate) fn splice(doc: &mut Document, content: &Handle, nav: &Handle, classes: &ClassNames) -> bool {
    let layout = doc.create_element("div", Some(&classes.layout));
    if !doc.insert_before(content, &layout) {
        return false;
    }

    let aside = doc.create_element("aside", Some(&classes.sidebar));
    doc.append_child(&aside, nav);

    let main = doc.create_element("div", Some(&classes.main));
    doc.append_child(&layout, &aside);
    doc.append_child(&layout, &main);

    doc.detach(content);
    doc.append_child(&main, content);
    true
}
