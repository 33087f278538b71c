//! High-level operations shared by page-toc commands.

mod apply;
mod diff;
mod error;
mod scan;

use log::debug;
use page_toc_builder::{EnhanceOutcome, TocBuilder, TocTree};
use page_toc_config::Config;
use page_toc_dom::Document;

pub use apply::{ApplyMode, ApplyOptions, ApplyOutcome};
pub use error::OperationError;
pub use page_toc_format::PageChange;
pub use scan::ScanOptions;

/// Operation bundle the CLI drives: owns the resolved configuration and the
/// builder derived from it.
pub struct Operations {
    config: Config,
    builder: TocBuilder,
}

/// Result of enhancing a single page held in memory.
#[derive(Clone, Debug)]
pub struct RenderOutcome {
    /// The enhanced page, or the input verbatim when nothing changed.
    pub html: String,
    pub outcome: EnhanceOutcome,
}

impl RenderOutcome {
    pub fn changed(&self) -> bool {
        matches!(self.outcome, EnhanceOutcome::Enhanced { .. })
    }
}

impl Operations {
    pub fn new(config: Config) -> Self {
        let builder = TocBuilder::new(&config);
        Self { config, builder }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Enhance one page. Pages that are skipped come back byte-for-byte.
    pub fn render(&self, html: &str) -> Result<RenderOutcome, OperationError> {
        let mut doc = Document::parse(html);
        let outcome = self.builder.enhance(&mut doc);
        let html = match &outcome {
            EnhanceOutcome::Enhanced { .. } => doc.to_html()?,
            EnhanceOutcome::Skipped(reason) => {
                debug!("page left unchanged: {reason}");
                html.to_string()
            }
        };
        Ok(RenderOutcome { html, outcome })
    }

    /// The navigation tree a page would receive, without modifying it.
    pub fn outline(&self, html: &str) -> Option<TocTree> {
        self.builder.outline(&Document::parse(html))
    }

    /// Enhance every in-scope page according to `options.mode`.
    pub fn apply(&self, options: ApplyOptions) -> Result<ApplyOutcome, OperationError> {
        apply::run(self, options)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_toc_test_support::{page, test_config};

    #[test]
    fn render_returns_input_verbatim_when_skipped() {
        let ops = Operations::new(test_config("/site"));
        let input = "<html><body><main><p>No headings</p></main></body></html>";
        let rendered = ops.render(input).unwrap();
        assert!(!rendered.changed());
        assert_eq!(rendered.html, input);
    }

    #[test]
    fn render_splices_navigation() {
        let ops = Operations::new(test_config("/site"));
        let rendered = ops.render(&page("<main><h2>Intro</h2></main>")).unwrap();
        assert!(rendered.changed());
        assert!(rendered.html.contains(r##"<a class="toc-link" href="#intro">Intro</a>"##));
        assert!(rendered.html.starts_with("<!DOCTYPE html>"));
    }
}
