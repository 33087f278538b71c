use log::trace;

use crate::model::{HeadingLevel, HeadingNode, Nesting, TocEntry, TocTree};
use crate::slug::{slugify, IdRegistry};

/// An identifier the caller must write onto heading `heading_index`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IdAssignment {
    pub heading_index: usize,
    pub id: String,
}

/// Navigation tree plus the id write-backs needed to make its links resolve.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocPlan {
    pub tree: TocTree,
    pub assignments: Vec<IdAssignment>,
}

/// Compute the navigation for `headings` (in document order).
///
/// `registry` must already hold every id present in the document; ids handed
/// out here are added to it. Returns `None` when there are no headings.
pub fn plan(headings: &[HeadingNode], registry: &mut IdRegistry, fallback: &str) -> Option<TocPlan> {
    if headings.is_empty() {
        return None;
    }

    let mut entries: Vec<TocEntry> = Vec::new();
    let mut assignments = Vec::new();
    // Index into `entries` of the section whose sublist is currently open.
    let mut open_section: Option<usize> = None;

    for (index, heading) in headings.iter().enumerate() {
        let target = match &heading.id {
            Some(id) => id.clone(),
            None => {
                let id = registry.reserve_unique(&slugify(&heading.text, fallback));
                trace!("assigning id '{id}' to heading {index}");
                assignments.push(IdAssignment {
                    heading_index: index,
                    id: id.clone(),
                });
                id
            }
        };

        let mut entry = TocEntry {
            text: heading.text.clone(),
            target,
            level: heading.level,
            nesting: Nesting::TopLevel,
            children: Vec::new(),
        };

        match (heading.level, open_section) {
            (HeadingLevel::Section, _) => {
                entries.push(entry);
                open_section = Some(entries.len() - 1);
            }
            (HeadingLevel::Subsection, Some(section)) => {
                entry.nesting = Nesting::Nested;
                entries[section].children.push(entry);
            }
            (HeadingLevel::Subsection, None) => entries.push(entry),
        }
    }

    Some(TocPlan {
        tree: TocTree { entries },
        assignments,
    })
}
