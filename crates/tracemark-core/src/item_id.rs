//! Specification item id notation.
//!
//! An item id qualifies a name with an artifact type and a revision:
//! `req~feature.x~1`. A legacy notation without an explicit revision
//! (`req:feature.x`) is still accepted on input and normalized to revision 1,
//! but never produced on output.

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Display, Formatter};

/// Regex fragment matching the current id grammar (`type~name~revision`).
///
/// Contains no capture groups so it can be embedded in larger patterns.
pub const ID_PATTERN: &str = r"[a-zA-Z]+~[a-zA-Z][a-zA-Z0-9_-]*(?:\.[a-zA-Z0-9_-]+)*~\d+";

/// Regex fragment matching the legacy id grammar (`type:name`, no revision).
pub const LEGACY_ID_PATTERN: &str = r"[a-zA-Z]+:[a-zA-Z][a-zA-Z0-9_-]*(?:\.[a-zA-Z0-9_-]+)*";

/// Marker separating source from target artifact types in a forwarding
/// notation (`dsn,req => impl @req~feature.x~1`).
pub const FORWARD_MARKER: &str = "=>";

/// Marker introducing the original item id in a forwarding notation.
pub const ORIGINAL_MARKER: &str = "@";

/// Structured specification item id.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId {
    /// Artifact type classifying the item (e.g. "req", "dsn", "impl").
    pub artifact_type: String,
    /// Dotted item name (e.g. "feature.x").
    pub name: String,
    /// Revision number; legacy ids without one are normalized to 1.
    pub revision: u32,
}

impl ItemId {
    /// Build an id, validating the artifact type and name against the id
    /// grammar. Returns `None` when either component is malformed.
    pub fn new(artifact_type: impl Into<String>, name: impl Into<String>, revision: u32) -> Option<Self> {
        let artifact_type = artifact_type.into();
        let name = name.into();
        if !is_valid_artifact_type(&artifact_type) || !is_valid_name(&name) {
            return None;
        }
        Some(Self {
            artifact_type,
            name,
            revision,
        })
    }

    /// Canonical string form, always the current grammar.
    pub fn canonical(&self) -> String {
        self.to_string()
    }
}

impl Display for ItemId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}~{}~{}", self.artifact_type, self.name, self.revision)
    }
}

impl Serialize for ItemId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct IdVisitor;

        impl Visitor<'_> for IdVisitor {
            type Value = ItemId;

            fn expecting(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str("a specification item id like `req~feature.x~1`")
            }

            fn visit_str<E>(self, value: &str) -> Result<ItemId, E>
            where
                E: de::Error,
            {
                parse_item_id(value)
                    .ok_or_else(|| E::custom(format!("malformed item id: {value}")))
            }
        }

        deserializer.deserialize_str(IdVisitor)
    }
}

/// Parse an id in either the current or the legacy grammar.
///
/// Legacy ids carry no revision and are normalized to revision 1.
pub fn parse_item_id(text: &str) -> Option<ItemId> {
    if let Some((artifact_type, rest)) = text.split_once('~') {
        let (name, revision) = rest.rsplit_once('~')?;
        let revision = revision.parse::<u32>().ok()?;
        ItemId::new(artifact_type, name, revision)
    } else if let Some((artifact_type, name)) = text.split_once(':') {
        ItemId::new(artifact_type, name, 1)
    } else {
        None
    }
}

fn is_valid_artifact_type(artifact_type: &str) -> bool {
    !artifact_type.is_empty() && artifact_type.chars().all(|c| c.is_ascii_alphabetic())
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn is_valid_name(name: &str) -> bool {
    let mut segments = name.split('.');
    let Some(first) = segments.next() else {
        return false;
    };
    let mut chars = first.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    if !chars.all(is_name_char) {
        return false;
    }
    segments.all(|s| !s.is_empty() && s.chars().all(is_name_char))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_current_grammar() {
        let id = parse_item_id("req~feature.x~1").expect("must parse");
        assert_eq!(id.artifact_type, "req");
        assert_eq!(id.name, "feature.x");
        assert_eq!(id.revision, 1);
    }

    #[test]
    fn parse_legacy_grammar_defaults_to_revision_1() {
        let id = parse_item_id("req:feature.x").expect("must parse");
        assert_eq!(id.artifact_type, "req");
        assert_eq!(id.name, "feature.x");
        assert_eq!(id.revision, 1);
    }

    #[test]
    fn legacy_ids_are_never_produced_on_output() {
        let id = parse_item_id("dsn:engine.state").expect("must parse");
        assert_eq!(id.to_string(), "dsn~engine.state~1");
    }

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(parse_item_id("").is_none());
        assert!(parse_item_id("req~feature.x").is_none());
        assert!(parse_item_id("req~feature.x~").is_none());
        assert!(parse_item_id("req~feature.x~one").is_none());
        assert!(parse_item_id("r3q~feature.x~1").is_none());
        assert!(parse_item_id("req~.feature~1").is_none());
        assert!(parse_item_id("req~feature.~1").is_none());
        assert!(parse_item_id("req~1feature~1").is_none());
        assert!(parse_item_id("plain text").is_none());
    }

    #[test]
    fn names_allow_dashes_underscores_and_digits() {
        let id = parse_item_id("impl~line-reader.v2_draft~12").expect("must parse");
        assert_eq!(id.name, "line-reader.v2_draft");
        assert_eq!(id.revision, 12);
    }

    #[test]
    fn display_roundtrips_through_parse() {
        let id = ItemId::new("req", "feature.x", 3).expect("valid id");
        assert_eq!(parse_item_id(&id.to_string()), Some(id));
    }

    #[test]
    fn serializes_as_canonical_string() {
        let id = ItemId::new("req", "feature.x", 1).expect("valid id");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"req~feature.x~1\"");

        let back: ItemId = serde_json::from_str("\"req:feature.x\"").unwrap();
        assert_eq!(back, id);
        assert!(serde_json::from_str::<ItemId>("\"not an id\"").is_err());
    }
}
