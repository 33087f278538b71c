use std::fs;
use std::path::PathBuf;

use log::{debug, info, warn};
use page_toc_builder::EnhanceOutcome;
use page_toc_format::{render_changes, PageChange};
use page_toc_utils::{atomic_write, parallel_map};

use crate::diff::build_unified_diff;
use crate::scan::{collect_targets, ScanOptions, Target};
use crate::{OperationError, Operations};

/// What `apply` does with pages that would change.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyMode {
    /// Report pages that would change; exit code 1 when any would.
    Check,
    /// Rewrite changed pages in place.
    Update,
    /// Print unified diffs; exit code 1 when any page would change.
    Diff,
}

#[derive(Clone, Debug)]
pub struct ApplyOptions {
    pub scan: ScanOptions,
    pub mode: ApplyMode,
    /// Suppress the summary line when nothing needs to change.
    pub quiet: bool,
}

#[derive(Clone, Debug)]
pub struct ApplyOutcome {
    pub changes: Vec<PageChange>,
    /// Text for stdout (change list, diffs or summary).
    pub rendered: String,
    pub exit_code: i32,
    pub pages_scanned: usize,
}

struct PendingPage {
    target: Target,
    original: String,
    enhanced: String,
    change: PageChange,
}

pub(crate) fn run(ops: &Operations, options: ApplyOptions) -> Result<ApplyOutcome, OperationError> {
    let targets = collect_targets(ops.config(), &options.scan)?;
    let pages_scanned = targets.len();
    debug!("scanning {pages_scanned} page(s)");

    let results = parallel_map(targets, |target| process_page(ops, target));
    let mut pending = Vec::new();
    for result in results {
        if let Some(page) = result? {
            pending.push(page);
        }
    }

    let changes: Vec<PageChange> = pending.iter().map(|page| page.change.clone()).collect();
    let mut rendered = String::new();

    let exit_code = match options.mode {
        ApplyMode::Check => {
            rendered.push_str(&render_changes(&changes, "would enhance"));
            if changes.is_empty() {
                0
            } else {
                1
            }
        }
        ApplyMode::Update => {
            for page in &pending {
                atomic_write(&page.target.absolute, &page.enhanced)
                    .map_err(|source| OperationError::io(&page.target.absolute, source))?;
                info!("enhanced {}", page.target.display.display());
            }
            rendered.push_str(&render_changes(&changes, "enhanced"));
            0
        }
        ApplyMode::Diff => {
            for page in &pending {
                let label = page.target.display.to_string_lossy().replace('\\', "/");
                let diff = build_unified_diff(&page.original, &page.enhanced, &label)
                    .map_err(|source| OperationError::io(&page.target.absolute, source))?;
                if let Some(diff) = diff {
                    rendered.push_str(&diff);
                }
            }
            if changes.is_empty() {
                0
            } else {
                1
            }
        }
    };

    if changes.is_empty() && !options.quiet {
        rendered.push_str(&format!("all {pages_scanned} page(s) up to date\n"));
    }

    Ok(ApplyOutcome {
        changes,
        rendered,
        exit_code,
        pages_scanned,
    })
}

fn process_page(ops: &Operations, target: Target) -> Result<Option<PendingPage>, OperationError> {
    let bytes =
        fs::read(&target.absolute).map_err(|source| OperationError::io(&target.absolute, source))?;
    let original = match String::from_utf8(bytes) {
        Ok(original) => original,
        Err(err) => {
            warn!(
                "{}: not valid UTF-8 ({}), leaving page unchanged",
                target.display.display(),
                err.utf8_error()
            );
            return Ok(None);
        }
    };
    let rendered = ops.render(&original)?;

    match rendered.outcome {
        EnhanceOutcome::Enhanced { tree, assigned_ids } => {
            let change = PageChange {
                path: PathBuf::from(&target.display),
                entries: tree.len(),
                assigned_ids,
            };
            Ok(Some(PendingPage {
                target,
                original,
                enhanced: rendered.html,
                change,
            }))
        }
        EnhanceOutcome::Skipped(reason) => {
            debug!("{}: {reason}", target.display.display());
            Ok(None)
        }
    }
}
