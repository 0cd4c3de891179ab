//! Lexical roles shared by the markup dialects.
//!
//! Both dialects recognize the same record fields with the same wording;
//! only title detection differs (Markdown `#` headings vs. underline-
//! confirmed headings). The catalog is compiled once per dialect and shared
//! read-only across all imports of that dialect.

use crate::engine::LinePattern;
use std::sync::Arc;
use tracemark_core::{FORWARD_MARKER, ID_PATTERN, LEGACY_ID_PATTERN, ORIGINAL_MARKER};

pub(crate) const ARTIFACT_TYPE: &str = "[a-zA-Z]+";
pub(crate) const BULLETS: &str = r"[+*-]";
pub(crate) const UP_TO_3_WHITESPACES: &str = r"\s{0,3}";

/// Either id grammar, capture-free.
fn any_id() -> String {
    format!("(?:{ID_PATTERN})|(?:{LEGACY_ID_PATTERN})")
}

/// A reference id on a bullet line, tolerating shallow indentation and
/// surrounding prose. The reference itself is the single capture group; a
/// bullet line whose token fails the id grammar simply does not match.
fn reference_after_bullet() -> String {
    format!(r"{UP_TO_3_WHITESPACES}{BULLETS}(?:.*\W)?({})(?:\W.*)?", any_id())
}

/// The forwarding notation, embedded anywhere in the line. The whole token
/// (types, markers, original id) is the single capture group.
fn forward_notation() -> String {
    format!(
        r".*?({ARTIFACT_TYPE}(?:,\s*{ARTIFACT_TYPE})*\s*{FORWARD_MARKER}\s*{ARTIFACT_TYPE}(?:,\s*{ARTIFACT_TYPE})*\s*{ORIGINAL_MARKER}\s*(?:{})).*?",
        any_id()
    )
}

/// The patterns common to every dialect.
pub(crate) struct PatternCatalog {
    pub comment: Arc<LinePattern>,
    pub covers: Arc<LinePattern>,
    pub covers_ref: Arc<LinePattern>,
    pub depends: Arc<LinePattern>,
    pub depends_ref: Arc<LinePattern>,
    pub description: Arc<LinePattern>,
    pub empty: Arc<LinePattern>,
    pub everything: Arc<LinePattern>,
    pub forward: Arc<LinePattern>,
    pub id: Arc<LinePattern>,
    pub needs_int: Arc<LinePattern>,
    pub needs: Arc<LinePattern>,
    pub needs_ref: Arc<LinePattern>,
    pub not_empty: Arc<LinePattern>,
    pub rationale: Arc<LinePattern>,
    pub status: Arc<LinePattern>,
    pub tags_int: Arc<LinePattern>,
    pub tags: Arc<LinePattern>,
    pub tag_entry: Arc<LinePattern>,
    pub underline: Arc<LinePattern>,
}

impl PatternCatalog {
    pub(crate) fn compile() -> Self {
        Self {
            comment: LinePattern::new("comment", r"Comment:\s*"),
            covers: LinePattern::new("covers", r"Covers:\s*"),
            covers_ref: LinePattern::new("covers-ref", &reference_after_bullet()),
            depends: LinePattern::new("depends", r"Depends:\s*"),
            depends_ref: LinePattern::new("depends-ref", &reference_after_bullet()),
            description: LinePattern::new("description", r"Description:\s*"),
            empty: LinePattern::new("empty", r"(\s*)"),
            everything: LinePattern::new("everything", r"(.*)"),
            forward: LinePattern::new("forward", &forward_notation()),
            id: LinePattern::new("id", &format!("`?({})`?.*", any_id())),
            needs_int: LinePattern::new("needs-int", r"Needs:(\s*\w+\s*(?:,\s*\w+\s*)*)"),
            needs: LinePattern::new("needs", r"Needs:\s*"),
            needs_ref: LinePattern::new(
                "needs-ref",
                &format!(r"{UP_TO_3_WHITESPACES}{BULLETS}(?:.*\W)?({ARTIFACT_TYPE})(?:\W.*)?"),
            ),
            not_empty: LinePattern::new("not-empty", r"([^\n\r]+)"),
            rationale: LinePattern::new("rationale", r"Rationale:\s*"),
            status: LinePattern::new("status", r"Status:\s*(approved|proposed|draft)\s*"),
            tags_int: LinePattern::new("tags-int", r"Tags:(\s*\w+\s*(?:,\s*\w+\s*)*)"),
            tags: LinePattern::new("tags", r"Tags:\s*"),
            tag_entry: LinePattern::new(
                "tag-entry",
                &format!(r"{UP_TO_3_WHITESPACES}{BULLETS}\s*(.*)"),
            ),
            underline: LinePattern::new("underline", r"([=-]{3,})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_pattern_accepts_backticks_and_trailing_text() {
        let catalog = PatternCatalog::compile();
        for line in [
            "req~feature.x~1",
            "`req~feature.x~1`",
            "`req~feature.x~1` <- the id",
            "req:legacy.name",
        ] {
            let captures = catalog.id.matches(line).unwrap_or_else(|| {
                panic!("id pattern must match {line:?}");
            });
            assert!(captures.get(1).is_some());
        }
        assert!(catalog.id.matches("see req~feature.x~1").is_none());
    }

    #[test]
    fn bullet_references_tolerate_shallow_indentation() {
        let catalog = PatternCatalog::compile();
        for line in [
            "- req~parent~1",
            "* req~parent~1",
            "+ req~parent~1",
            "   - req~parent~1",
            "- covers `req~parent~1` (see above)",
        ] {
            let captures = catalog
                .covers_ref
                .matches(line)
                .unwrap_or_else(|| panic!("covers-ref must match {line:?}"));
            assert_eq!(captures.get(1).map(|m| m.as_str()), Some("req~parent~1"));
        }
    }

    #[test]
    fn bullet_with_malformed_reference_does_not_match() {
        let catalog = PatternCatalog::compile();
        assert!(catalog.covers_ref.matches("- not-an-id").is_none());
        assert!(catalog.covers_ref.matches("- req~~1").is_none());
    }

    #[test]
    fn forward_pattern_captures_the_whole_notation() {
        let catalog = PatternCatalog::compile();
        let captures = catalog
            .forward
            .matches("See dsn,req => impl @req~feature.x~1 for details")
            .expect("forward must match");
        assert_eq!(
            captures.get(1).map(|m| m.as_str()),
            Some("dsn,req => impl @req~feature.x~1")
        );
    }

    #[test]
    fn underline_requires_three_repeats() {
        let catalog = PatternCatalog::compile();
        assert!(catalog.underline.matches("===").is_some());
        assert!(catalog.underline.matches("-----").is_some());
        assert!(catalog.underline.matches("==").is_none());
        assert!(catalog.underline.matches("=-=").is_some());
        assert!(catalog.underline.matches("== =").is_none());
    }

    #[test]
    fn status_keywords_are_closed() {
        let catalog = PatternCatalog::compile();
        assert!(catalog.status.matches("Status: approved").is_some());
        assert!(catalog.status.matches("Status: draft").is_some());
        assert!(catalog.status.matches("Status: Approved").is_none());
        assert!(catalog.status.matches("Status: rejected").is_none());
    }
}
