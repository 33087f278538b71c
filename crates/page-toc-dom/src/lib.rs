//! In-memory HTML document model used by the page-toc toolkit.
//!
//! Pages are parsed with `html5ever` into an `RcDom`. This crate wraps the
//! handful of DOM primitives the table-of-contents builder relies on
//! (selector queries, text content, attribute access, element creation and
//! relocation) and serialises the document back to HTML.

mod document;
mod error;
pub mod node;
mod selector;

pub use document::Document;
pub use error::{DomError, SelectorError};
pub use markup5ever_rcdom::Handle;
pub use selector::Selector;
