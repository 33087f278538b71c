use std::path::{Path, PathBuf};

use log::debug;
use page_toc_config::Config;
use walkdir::WalkDir;

use crate::OperationError;

/// Which pages an operation should visit.
#[derive(Clone, Debug, Default)]
pub struct ScanOptions {
    /// Files or directories to restrict processing to. Relative paths resolve
    /// against the working directory; an empty list means the project root.
    pub paths: Vec<PathBuf>,
}

/// A page selected for processing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Target {
    pub absolute: PathBuf,
    /// Path relative to the project root when the page lives under it.
    pub display: PathBuf,
}

pub(crate) fn collect_targets(
    config: &Config,
    options: &ScanOptions,
) -> Result<Vec<Target>, OperationError> {
    let root = &config.project.root;
    let starts: Vec<PathBuf> = if options.paths.is_empty() {
        vec![root.clone()]
    } else {
        options
            .paths
            .iter()
            .map(|path| {
                if path.is_absolute() {
                    path.clone()
                } else {
                    config.sources.working_directory.join(path)
                }
            })
            .collect()
    };

    let mut targets = Vec::new();
    for start in starts {
        if start.is_file() {
            let display = display_path(root, &start);
            if config.project.exclude.matches(&display) {
                debug!("skipping excluded page {}", display.display());
                continue;
            }
            targets.push(Target {
                absolute: start,
                display,
            });
        } else if start.is_dir() {
            walk_dir(config, &start, &mut targets)?;
        } else {
            return Err(OperationError::InvalidInput(format!(
                "path does not exist: {}",
                start.display()
            )));
        }
    }

    targets.sort_by(|a, b| a.display.cmp(&b.display));
    targets.dedup_by(|a, b| a.absolute == b.absolute);
    Ok(targets)
}

fn walk_dir(config: &Config, dir: &Path, targets: &mut Vec<Target>) -> Result<(), OperationError> {
    let walker = WalkDir::new(dir)
        .follow_links(false)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != ".git");

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(dir).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            OperationError::io(path, source)
        })?;
        if !entry.file_type().is_file() {
            continue;
        }

        let display = display_path(&config.project.root, entry.path());
        if !config.project.include.matches(&display) || config.project.exclude.matches(&display) {
            continue;
        }
        targets.push(Target {
            absolute: entry.into_path(),
            display,
        });
    }
    Ok(())
}

fn display_path(root: &Path, path: &Path) -> PathBuf {
    path.strip_prefix(root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| path.to_path_buf())
}
