//! Specification items and forwarding declarations.

use crate::item_id::{FORWARD_MARKER, ItemId, ORIGINAL_MARKER, parse_item_id};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Maturity of a specification item.
///
/// Only these three keywords are recognized in documents, case-sensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Approved,
    Proposed,
    Draft,
}

impl ItemStatus {
    /// Parse a status keyword from its document representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "approved" => Some(ItemStatus::Approved),
            "proposed" => Some(ItemStatus::Proposed),
            "draft" => Some(ItemStatus::Draft),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Approved => "approved",
            ItemStatus::Proposed => "proposed",
            ItemStatus::Draft => "draft",
        }
    }
}

impl Display for ItemStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A structured requirement/design/implementation record extracted from a
/// markup document.
///
/// Items are flat: the importer does not interpret document hierarchy, link
/// references, or deduplicate. Multi-line fields (description, rationale,
/// comment) are newline-joined exactly as encountered.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecificationItem {
    pub id: ItemId,
    /// Heading text preceding the item, when one was detected.
    pub title: Option<String>,
    pub status: Option<ItemStatus>,
    pub description: String,
    pub rationale: String,
    pub comment: String,
    /// Tag set, in first-seen order; duplicates are dropped.
    pub tags: Vec<String>,
    /// Artifact types this item additionally requires coverage from.
    pub needs_artifact_types: Vec<String>,
    /// Ids of items this item covers, in document order.
    pub covers: Vec<ItemId>,
    /// Ids of items this item depends on, in document order.
    pub depends: Vec<ItemId>,
}

impl SpecificationItem {
    /// Create an empty item for the given id.
    pub fn new(id: ItemId) -> Self {
        Self {
            id,
            title: None,
            status: None,
            description: String::new(),
            rationale: String::new(),
            comment: String::new(),
            tags: Vec::new(),
            needs_artifact_types: Vec::new(),
            covers: Vec::new(),
            depends: Vec::new(),
        }
    }
}

/// Declares that coverage of `original_id` under the source artifact types is
/// re-exported under the target artifact types, without restating the item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingDeclaration {
    pub source_artifact_types: Vec<String>,
    pub target_artifact_types: Vec<String>,
    pub original_id: ItemId,
}

impl ForwardingDeclaration {
    /// Parse the forwarding notation `src[,src…] => tgt[,tgt…] @<id>`.
    ///
    /// The token is expected to have been cut out of the surrounding line
    /// already; the id may use either id grammar.
    pub fn parse(token: &str) -> Option<Self> {
        let (sources, rest) = token.split_once(FORWARD_MARKER)?;
        let (targets, original) = rest.split_once(ORIGINAL_MARKER)?;
        let source_artifact_types = split_artifact_types(sources)?;
        let target_artifact_types = split_artifact_types(targets)?;
        let original_id = parse_item_id(original.trim())?;
        Some(Self {
            source_artifact_types,
            target_artifact_types,
            original_id,
        })
    }
}

/// Split a comma-separated artifact type list, keeping first-seen order and
/// dropping duplicates. Returns `None` when the list is empty or a token is
/// not purely alphabetic.
fn split_artifact_types(list: &str) -> Option<Vec<String>> {
    let mut types: Vec<String> = Vec::new();
    for token in list.split(',') {
        let token = token.trim();
        if token.is_empty() || !token.chars().all(|c| c.is_ascii_alphabetic()) {
            return None;
        }
        if !types.iter().any(|t| t == token) {
            types.push(token.to_string());
        }
    }
    if types.is_empty() { None } else { Some(types) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_keywords_are_case_sensitive() {
        assert_eq!(ItemStatus::parse("approved"), Some(ItemStatus::Approved));
        assert_eq!(ItemStatus::parse("proposed"), Some(ItemStatus::Proposed));
        assert_eq!(ItemStatus::parse("draft"), Some(ItemStatus::Draft));
        assert_eq!(ItemStatus::parse("Approved"), None);
        assert_eq!(ItemStatus::parse("rejected"), None);
    }

    #[test]
    fn parse_forwarding_with_multiple_sources() {
        let fwd = ForwardingDeclaration::parse("dsn,req => impl @req~feature.x~1")
            .expect("must parse");
        assert_eq!(fwd.source_artifact_types, ["dsn", "req"]);
        assert_eq!(fwd.target_artifact_types, ["impl"]);
        assert_eq!(fwd.original_id.to_string(), "req~feature.x~1");
    }

    #[test]
    fn parse_forwarding_with_multiple_targets_and_legacy_id() {
        let fwd = ForwardingDeclaration::parse("arch => impl, utest @req:feature.x")
            .expect("must parse");
        assert_eq!(fwd.source_artifact_types, ["arch"]);
        assert_eq!(fwd.target_artifact_types, ["impl", "utest"]);
        assert_eq!(fwd.original_id.to_string(), "req~feature.x~1");
    }

    #[test]
    fn parse_forwarding_rejects_garbage() {
        assert!(ForwardingDeclaration::parse("").is_none());
        assert!(ForwardingDeclaration::parse("dsn => impl").is_none());
        assert!(ForwardingDeclaration::parse("=> impl @req~feature.x~1").is_none());
        assert!(ForwardingDeclaration::parse("dsn => @req~feature.x~1").is_none());
        assert!(ForwardingDeclaration::parse("dsn => impl @not an id").is_none());
        assert!(ForwardingDeclaration::parse("d5n => impl @req~feature.x~1").is_none());
    }

    #[test]
    fn duplicate_artifact_types_collapse() {
        let fwd = ForwardingDeclaration::parse("req,req => impl @req~feature.x~1")
            .expect("must parse");
        assert_eq!(fwd.source_artifact_types, ["req"]);
    }

    #[test]
    fn item_serializes_with_camel_case_fields() {
        let mut item =
            SpecificationItem::new(parse_item_id("req~feature.x~1").expect("valid id"));
        item.needs_artifact_types.push("impl".to_string());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.contains("\"needsArtifactTypes\":[\"impl\"]"));
        assert!(json.contains("\"id\":\"req~feature.x~1\""));
    }
}
