//! tracemark-import - extracting specification items from markup documents.
//!
//! This crate is the ingestion front end of tracemark: it recognizes
//! lightly-structured specification items (id, status, description,
//! rationale, comment, tags, coverage/dependency/needs references, titles)
//! embedded as prose in Markdown and reStructuredText documents, and streams
//! them as flat records to an
//! [`ImportEventListener`](tracemark_core::ImportEventListener).
//!
//! The parser is a line-oriented state machine: a dialect is nothing but an
//! ordered [`TransitionTable`] of `(state, pattern) -> (state, action)`
//! edges, executed by the shared [`ImportEngine`]. Patterns match whole
//! lines; the first matching transition in declaration order wins; lines
//! matching nothing are surrounding prose and are skipped.
//!
//! # Example
//!
//! ```
//! use tracemark_core::EventCollector;
//! use tracemark_import::{Dialect, import_str};
//!
//! let document = "\
//! ## Feature X
//! `req~feature.x~1`
//! Status: approved
//! Description:
//! This does Y.
//! Covers:
//! - req~parent~1
//! ";
//!
//! let mut collector = EventCollector::new();
//! import_str("example.md", document, Dialect::Markdown, &mut collector);
//!
//! let item = collector.items().next().unwrap();
//! assert_eq!(item.id.to_string(), "req~feature.x~1");
//! assert_eq!(item.title.as_deref(), Some("Feature X"));
//! assert_eq!(item.description, "This does Y.");
//! assert_eq!(item.covers[0].to_string(), "req~parent~1");
//! assert!(collector.is_finished());
//! ```
//!
//! # Features
//!
//! - `walk` - [`import_tree`] for gitignore-aware directory walking (brings
//!   in `ignore`)
//! - `parallel` - per-file engines run on the rayon pool during tree imports

mod builder;
mod engine;
mod import;
pub mod markdown;
mod patterns;
mod reader;
pub mod restructuredtext;
#[cfg(feature = "walk")]
mod walk;

pub use builder::{Action, ItemBuilder};
pub use engine::{
    ImportEngine, LinePattern, ParserState, Transition, TransitionTable, transition,
};
pub use import::{
    Dialect, SUPPORTED_EXTENSIONS, import_file, import_file_as, import_str,
    is_supported_extension,
};
pub use reader::{ImportError, LineContext, LineListener, read_lines};

#[cfg(feature = "walk")]
pub use walk::{DocumentImport, import_tree};
