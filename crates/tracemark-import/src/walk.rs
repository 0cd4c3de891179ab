//! Gitignore-aware tree import (feature `walk`).
//!
//! Walks a directory for supported document files and runs one engine per
//! file. Engines own their state exclusively, so with the `parallel` feature
//! the per-file imports run on the rayon pool; results are returned in
//! sorted path order either way, keeping tree imports deterministic.

use crate::import::{import_file, is_supported_extension};
use eyre::Result;
use std::path::{Path, PathBuf};
use tracemark_core::{EventCollector, ImportEvent};
use tracing::debug;

/// Everything one document delivered, in delivery order.
#[derive(Debug)]
pub struct DocumentImport {
    pub path: PathBuf,
    pub events: Vec<ImportEvent>,
}

/// Import every supported document under `root`, honoring gitignore rules.
///
/// Fails on the first unreadable document. Callers that need per-file
/// streaming or error recovery should use
/// [`import_file`](crate::import_file) directly.
pub fn import_tree(root: impl AsRef<Path>) -> Result<Vec<DocumentImport>> {
    let root = root.as_ref();
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in ignore::WalkBuilder::new(root)
        .follow_links(true)
        .hidden(false)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(_) => continue,
        };
        let path = entry.path();
        if path.extension().is_some_and(is_supported_extension) {
            paths.push(path.to_path_buf());
        }
    }
    paths.sort();
    debug!(root = %root.display(), documents = paths.len(), "importing tree");

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        let documents = paths
            .par_iter()
            .map(|path| import_one(path))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(documents)
    }

    #[cfg(not(feature = "parallel"))]
    {
        let mut documents = Vec::with_capacity(paths.len());
        for path in &paths {
            documents.push(import_one(path)?);
        }
        Ok(documents)
    }
}

fn import_one(path: &Path) -> Result<DocumentImport> {
    let mut collector = EventCollector::new();
    import_file(path, &mut collector)?;
    Ok(DocumentImport {
        path: path.to_path_buf(),
        events: collector.into_events(),
    })
}
