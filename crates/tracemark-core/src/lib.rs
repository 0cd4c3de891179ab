//! tracemark-core - data model for specification items extracted from
//! lightly-structured markup documents.
//!
//! This crate defines the records the tracemark importer produces:
//!
//! - [`ItemId`] - artifact-type-qualified item ids (`req~feature.x~1`), with
//!   a legacy input grammar (`req:feature.x`) normalized to revision 1
//! - [`SpecificationItem`] - a flat requirement/design/implementation record
//! - [`ForwardingDeclaration`] - re-exports coverage of an item under
//!   additional artifact types (`dsn,req => impl @req~feature.x~1`)
//! - [`ImportEventListener`] - the sink an import run delivers records to,
//!   with [`EventCollector`] as the provided buffering implementation
//!
//! The importer itself (line reader, parsing engine, dialect tables) lives in
//! the `tracemark-import` crate.
//!
//! ```
//! use tracemark_core::{ItemId, parse_item_id};
//!
//! let id = parse_item_id("req~feature.x~1").unwrap();
//! assert_eq!(id.artifact_type, "req");
//! assert_eq!(id.name, "feature.x");
//! assert_eq!(id.revision, 1);
//!
//! // The legacy notation is accepted on input but never written back out.
//! let legacy = parse_item_id("req:feature.x").unwrap();
//! assert_eq!(legacy.to_string(), "req~feature.x~1");
//! ```

mod item;
mod item_id;
mod listener;

pub use item::{ForwardingDeclaration, ItemStatus, SpecificationItem};
pub use item_id::{
    FORWARD_MARKER, ID_PATTERN, ItemId, LEGACY_ID_PATTERN, ORIGINAL_MARKER, parse_item_id,
};
pub use listener::{EventCollector, ImportEvent, ImportEventListener};
