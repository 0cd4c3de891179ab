//! Import entry points and dialect selection.

use crate::engine::{ImportEngine, TransitionTable};
use crate::reader::{ImportError, read_lines};
use crate::{markdown, restructuredtext};
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use tracemark_core::ImportEventListener;
use tracing::debug;

/// File extensions the importer recognizes.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "md",       // Markdown
    "markdown", // Markdown
    "rst",      // reStructuredText
];

/// Check whether a file extension maps to a known dialect.
pub fn is_supported_extension(ext: &OsStr) -> bool {
    ext.to_str()
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// A supported markup dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Markdown,
    RestructuredText,
}

impl Dialect {
    /// The dialect's transition table (compiled once, shared).
    pub fn table(self) -> &'static TransitionTable {
        match self {
            Dialect::Markdown => markdown::table(),
            Dialect::RestructuredText => restructuredtext::table(),
        }
    }

    /// Pick a dialect from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(OsStr::to_str) {
            Some("md") | Some("markdown") => Some(Dialect::Markdown),
            Some("rst") => Some(Dialect::RestructuredText),
            _ => None,
        }
    }
}

/// Import in-memory document content.
///
/// `source_name` only labels log output and has no other meaning here.
pub fn import_str(
    source_name: &str,
    content: &str,
    dialect: Dialect,
    listener: &mut dyn ImportEventListener,
) {
    let mut engine = ImportEngine::new(dialect.table(), listener);
    read_lines(source_name, content.as_bytes(), &mut engine)
        .expect("reading from memory cannot fail");
}

/// Import a document file, picking the dialect from its extension.
pub fn import_file(
    path: &Path,
    listener: &mut dyn ImportEventListener,
) -> Result<(), ImportError> {
    let dialect = Dialect::from_path(path).ok_or_else(|| ImportError::UnsupportedFormat {
        file: path.display().to_string(),
    })?;
    import_file_as(path, dialect, listener)
}

/// Import a document file with an explicit dialect.
///
/// The file handle lives only for the duration of this call and is released
/// on every exit path. A read failure aborts the rest of the import; items
/// already delivered stay delivered, the item open at the time of failure is
/// discarded.
pub fn import_file_as(
    path: &Path,
    dialect: Dialect,
    listener: &mut dyn ImportEventListener,
) -> Result<(), ImportError> {
    let name = path.display().to_string();
    debug!(file = %name, dialect = dialect.table().dialect(), "importing document");
    let file = File::open(path).map_err(|source| ImportError::Open {
        file: name.clone(),
        source,
    })?;
    let mut engine = ImportEngine::new(dialect.table(), listener);
    read_lines(&name, BufReader::new(file), &mut engine)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dialect_from_extension() {
        assert_eq!(
            Dialect::from_path(Path::new("spec/feature.md")),
            Some(Dialect::Markdown)
        );
        assert_eq!(
            Dialect::from_path(Path::new("doc.markdown")),
            Some(Dialect::Markdown)
        );
        assert_eq!(
            Dialect::from_path(Path::new("spec/feature.rst")),
            Some(Dialect::RestructuredText)
        );
        assert_eq!(Dialect::from_path(Path::new("spec/feature.txt")), None);
        assert_eq!(Dialect::from_path(Path::new("README")), None);
    }

    #[test]
    fn supported_extensions_match_dialects() {
        assert!(is_supported_extension(OsStr::new("md")));
        assert!(is_supported_extension(OsStr::new("rst")));
        assert!(!is_supported_extension(OsStr::new("rs")));
    }

    #[test]
    fn importing_an_unknown_format_fails() {
        let mut collector = tracemark_core::EventCollector::new();
        let err = import_file(Path::new("notes.txt"), &mut collector)
            .expect_err("txt has no dialect");
        assert!(matches!(err, ImportError::UnsupportedFormat { .. }));
    }
}
