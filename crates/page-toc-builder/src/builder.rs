use std::fmt;

use log::debug;
use page_toc_config::{ClassNames, Config, TocSettings};
use page_toc_dom::{node, Document, Handle, Selector};

use crate::layout::splice;
use crate::model::{HeadingLevel, HeadingNode, TocTree};
use crate::plan::{plan, TocPlan};
use crate::render::render_nav;
use crate::slug::IdRegistry;

/// Builds the navigation for a page and splices it into the layout.
#[derive(Clone, Debug)]
pub struct TocBuilder {
    selectors: Vec<Selector>,
    toc: TocSettings,
    classes: ClassNames,
}

/// What happened to a page passed to [`TocBuilder::enhance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnhanceOutcome {
    Enhanced { tree: TocTree, assigned_ids: usize },
    Skipped(SkipReason),
}

/// Why a page was left untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SkipReason {
    NoContainer,
    NoHeadings,
    AlreadyEnhanced,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SkipReason::NoContainer => "no content container",
            SkipReason::NoHeadings => "no h2/h3 headings",
            SkipReason::AlreadyEnhanced => "already has a table of contents",
        };
        f.write_str(label)
    }
}

impl TocBuilder {
    pub fn new(config: &Config) -> Self {
        Self::from_parts(
            config.content.selectors.clone(),
            config.toc.clone(),
            config.classes.clone(),
        )
    }

    pub fn from_parts(selectors: Vec<Selector>, toc: TocSettings, classes: ClassNames) -> Self {
        TocBuilder {
            selectors,
            toc,
            classes,
        }
    }

    /// The content container: first match of the first selector that matches anything.
    pub fn locate_content(&self, doc: &Document) -> Option<Handle> {
        self.selectors.iter().find_map(|selector| {
            let found = doc.query_selector(selector);
            if found.is_some() {
                debug!("content container matched '{selector}'");
            }
            found
        })
    }

    /// The h2/h3 elements below `container`, in document order.
    pub fn collect_headings(&self, container: &Handle) -> Vec<(Handle, HeadingNode)> {
        node::descendant_elements(container)
            .into_iter()
            .filter_map(|element| {
                let level = node::tag_name(&element).and_then(HeadingLevel::from_tag)?;
                let heading = HeadingNode {
                    level,
                    text: node::text_content(&element),
                    id: node::id(&element),
                };
                Some((element, heading))
            })
            .collect()
    }

    /// Plan the navigation for `container` without modifying the document.
    pub fn plan(&self, doc: &Document, container: &Handle) -> Option<TocPlan> {
        let headings: Vec<HeadingNode> = self
            .collect_headings(container)
            .into_iter()
            .map(|(_, heading)| heading)
            .collect();
        let mut registry: IdRegistry = doc.ids().into_iter().collect();
        plan(&headings, &mut registry, &self.toc.fallback_slug)
    }

    /// Plan the navigation of the page's content container, read-only.
    pub fn outline(&self, doc: &Document) -> Option<TocTree> {
        let container = self.locate_content(doc)?;
        self.plan(doc, &container).map(|plan| plan.tree)
    }

    /// Build the `<nav>` element for `container`, writing generated ids onto
    /// headings that lack one. Returns `None`, leaving the document untouched,
    /// when the container holds no h2/h3 headings.
    pub fn build(&self, doc: &mut Document, container: &Handle) -> Option<Handle> {
        self.build_with_plan(doc, container).map(|(nav, _)| nav)
    }

    fn build_with_plan(&self, doc: &mut Document, container: &Handle) -> Option<(Handle, TocPlan)> {
        let (elements, headings): (Vec<Handle>, Vec<HeadingNode>) =
            self.collect_headings(container).into_iter().unzip();

        let mut registry: IdRegistry = doc.ids().into_iter().collect();
        let plan = plan(&headings, &mut registry, &self.toc.fallback_slug)?;

        for assignment in &plan.assignments {
            node::set_attribute(&elements[assignment.heading_index], "id", &assignment.id);
        }

        let nav = render_nav(doc, &plan.tree, &self.toc.title, &self.classes);
        Some((nav, plan))
    }

    /// Locate the content container, build its navigation and splice the
    /// sidebar layout around it.
    pub fn enhance(&self, doc: &mut Document) -> EnhanceOutcome {
        if self.is_enhanced(doc) {
            debug!("page already carries '.{}'", self.classes.nav);
            return EnhanceOutcome::Skipped(SkipReason::AlreadyEnhanced);
        }

        let Some(container) = self
            .locate_content(doc)
            .filter(|container| node::parent(container).is_some())
        else {
            debug!("no content container found");
            return EnhanceOutcome::Skipped(SkipReason::NoContainer);
        };

        let Some((nav, plan)) = self.build_with_plan(doc, &container) else {
            debug!("content container has no h2/h3 headings");
            return EnhanceOutcome::Skipped(SkipReason::NoHeadings);
        };

        if !splice(doc, &container, &nav, &self.classes) {
            return EnhanceOutcome::Skipped(SkipReason::NoContainer);
        }

        EnhanceOutcome::Enhanced {
            assigned_ids: plan.assignments.len(),
            tree: plan.tree,
        }
    }

    fn is_enhanced(&self, doc: &Document) -> bool {
        node::descendant_elements(&doc.root())
            .iter()
            .any(|element| node::has_class(element, &self.classes.nav))
    }
}
