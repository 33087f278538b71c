//! Table-of-contents generation for rendered HTML pages.
//!
//! The work is split in two: [`plan`] is a pure function that turns an ordered
//! list of headings into a [`TocTree`] plus the identifiers that must be
//! written back, and [`TocBuilder`] applies that plan to a live
//! [`page_toc_dom::Document`] (id write-back, navigation markup, layout splice).

mod builder;
mod layout;
mod model;
mod plan;
mod render;
mod slug;

pub use builder::{EnhanceOutcome, SkipReason, TocBuilder};
pub use model::{HeadingLevel, HeadingNode, Nesting, TocEntry, TocTree};
pub use plan::{plan, IdAssignment, TocPlan};
pub use slug::{slugify, IdRegistry};
