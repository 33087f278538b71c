use page_toc_config::ClassNames;
use page_toc_dom::{node, Document, Handle};

use crate::model::{HeadingLevel, TocEntry, TocTree};

/// Build the detached `<nav>` element for `tree`.
pub(crate) fn render_nav(
    doc: &mut Document,
    tree: &TocTree,
    title: &str,
    classes: &ClassNames,
) -> Handle {
    let nav = doc.create_element("nav", Some(&classes.nav));

    let heading = doc.create_element("div", Some(&classes.title));
    doc.append_text(&heading, title);
    doc.append_child(&nav, &heading);

    let list = doc.create_element("ul", Some(&classes.list));
    for entry in &tree.entries {
        let item = render_item(doc, entry, classes);
        if entry.opens_sublist() {
            let sublist = doc.create_element("ul", Some(&classes.sublist));
            for child in &entry.children {
                let child_item = render_item(doc, child, classes);
                doc.append_child(&sublist, &child_item);
            }
            doc.append_child(&item, &sublist);
        }
        doc.append_child(&list, &item);
    }
    doc.append_child(&nav, &list);

    nav
}

fn render_item(doc: &mut Document, entry: &TocEntry, classes: &ClassNames) -> Handle {
    let level_class = match entry.level {
        HeadingLevel::Section => &classes.level2,
        HeadingLevel::Subsection => &classes.level3,
    };
    let item = doc.create_element("li", Some(&format!("{} {}", classes.item, level_class)));

    let link = doc.create_element("a", Some(&classes.link));
    node::set_attribute(&link, "href", &format!("#{}", entry.target));
    doc.append_text(&link, &entry.text);
    doc.append_child(&item, &link);

    item
}
