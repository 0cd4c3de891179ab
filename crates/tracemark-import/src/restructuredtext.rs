//! reStructuredText dialect wiring.
//!
//! The only structural difference to Markdown is title detection: a heading
//! is a plain text line confirmed retroactively by an underline of repeated
//! `=` or `-` characters. When the underline line is current, the heading is
//! still available as the context's previous line, so confirmation resolves
//! one line after the heading appears, never before. A remembered heading
//! not followed by an item id (or blank lines leading to one) is discarded.

use crate::builder::Action;
use crate::engine::{ParserState::*, Transition, TransitionTable, transition};
use crate::patterns::PatternCatalog;
use std::sync::LazyLock;

static TABLE: LazyLock<TransitionTable> = LazyLock::new(build_table);

/// The reStructuredText transition table, compiled on first use and shared.
pub fn table() -> &'static TransitionTable {
    &TABLE
}

fn build_table() -> TransitionTable {
    let p = PatternCatalog::compile();

    let transitions: Vec<Transition> = vec![
        transition(Start, SpecItem, &p.id, Action::BeginItem),
        transition(Start, Outside, &p.forward, Action::Forward),
        transition(Start, Outside, &p.everything, Action::Ignore),
        //
        transition(Title, SpecItem, &p.id, Action::BeginItem),
        transition(Title, Title, &p.empty, Action::Ignore),
        transition(Title, Outside, &p.forward, Action::EndItemThenForward),
        transition(Title, Outside, &p.everything, Action::ResetTitle),
        //
        transition(Outside, SpecItem, &p.id, Action::BeginItem),
        transition(Outside, Outside, &p.forward, Action::Forward),
        transition(Outside, Title, &p.underline, Action::RememberPreviousLineAsTitle),
        //
        transition(SpecItem, SpecItem, &p.id, Action::BeginItem),
        transition(SpecItem, SpecItem, &p.status, Action::SetStatus),
        transition(SpecItem, Rationale, &p.rationale, Action::BeginRationale),
        transition(SpecItem, Comment, &p.comment, Action::BeginComment),
        transition(SpecItem, Covers, &p.covers, Action::Ignore),
        transition(SpecItem, Depends, &p.depends, Action::Ignore),
        transition(SpecItem, Needs, &p.needs_int, Action::AddNeeds),
        transition(SpecItem, Needs, &p.needs, Action::Ignore),
        transition(SpecItem, Tags, &p.tags_int, Action::AddTags),
        transition(SpecItem, Tags, &p.tags, Action::Ignore),
        transition(SpecItem, Description, &p.description, Action::BeginDescription),
        transition(SpecItem, Description, &p.not_empty, Action::BeginDescription),
        //
        transition(Description, SpecItem, &p.id, Action::BeginItem),
        transition(Description, Rationale, &p.rationale, Action::BeginRationale),
        transition(Description, Comment, &p.comment, Action::BeginComment),
        transition(Description, Covers, &p.covers, Action::Ignore),
        transition(Description, Depends, &p.depends, Action::Ignore),
        transition(Description, Needs, &p.needs_int, Action::AddNeeds),
        transition(Description, Needs, &p.needs, Action::Ignore),
        transition(Description, Tags, &p.tags_int, Action::AddTags),
        transition(Description, Tags, &p.tags, Action::Ignore),
        transition(Description, Outside, &p.forward, Action::EndItemThenForward),
        transition(Description, Title, &p.underline, Action::RememberPreviousLineAsTitle),
        transition(Description, Description, &p.everything, Action::AppendDescription),
        //
        transition(Rationale, SpecItem, &p.id, Action::BeginItem),
        transition(Rationale, Comment, &p.comment, Action::BeginComment),
        transition(Rationale, Covers, &p.covers, Action::Ignore),
        transition(Rationale, Depends, &p.depends, Action::Ignore),
        transition(Rationale, Needs, &p.needs_int, Action::AddNeeds),
        transition(Rationale, Needs, &p.needs, Action::Ignore),
        transition(Rationale, Tags, &p.tags_int, Action::AddTags),
        transition(Rationale, Tags, &p.tags, Action::Ignore),
        transition(Rationale, Rationale, &p.everything, Action::AppendRationale),
        //
        transition(Comment, SpecItem, &p.id, Action::BeginItem),
        transition(Comment, Covers, &p.covers, Action::Ignore),
        transition(Comment, Depends, &p.depends, Action::Ignore),
        transition(Comment, Needs, &p.needs_int, Action::AddNeeds),
        transition(Comment, Needs, &p.needs, Action::Ignore),
        transition(Comment, Rationale, &p.rationale, Action::BeginRationale),
        transition(Comment, Tags, &p.tags_int, Action::AddTags),
        transition(Comment, Tags, &p.tags, Action::Ignore),
        transition(Comment, Comment, &p.everything, Action::AppendComment),
        //
        transition(Covers, SpecItem, &p.id, Action::BeginItem),
        transition(Covers, Covers, &p.covers_ref, Action::AddCovers),
        transition(Covers, Rationale, &p.rationale, Action::BeginRationale),
        transition(Covers, Comment, &p.comment, Action::BeginComment),
        transition(Covers, Depends, &p.depends, Action::Ignore),
        transition(Covers, Needs, &p.needs_int, Action::AddNeeds),
        transition(Covers, Needs, &p.needs, Action::Ignore),
        transition(Covers, Covers, &p.empty, Action::Ignore),
        transition(Covers, Tags, &p.tags_int, Action::AddTags),
        transition(Covers, Tags, &p.tags, Action::Ignore),
        transition(Covers, Outside, &p.forward, Action::EndItemThenForward),
        //
        transition(Depends, SpecItem, &p.id, Action::BeginItem),
        transition(Depends, Depends, &p.depends_ref, Action::AddDepends),
        transition(Depends, Rationale, &p.rationale, Action::BeginRationale),
        transition(Depends, Comment, &p.comment, Action::BeginComment),
        transition(Depends, Depends, &p.depends, Action::Ignore),
        transition(Depends, Needs, &p.needs_int, Action::AddNeeds),
        transition(Depends, Needs, &p.needs, Action::Ignore),
        transition(Depends, Depends, &p.empty, Action::Ignore),
        transition(Depends, Covers, &p.covers, Action::Ignore),
        transition(Depends, Tags, &p.tags_int, Action::AddTags),
        transition(Depends, Tags, &p.tags, Action::Ignore),
        transition(Depends, Outside, &p.forward, Action::EndItemThenForward),
        //
        transition(Needs, SpecItem, &p.id, Action::BeginItem),
        transition(Needs, Rationale, &p.rationale, Action::BeginRationale),
        transition(Needs, Comment, &p.comment, Action::BeginComment),
        transition(Needs, Depends, &p.depends, Action::Ignore),
        transition(Needs, Needs, &p.needs_int, Action::AddNeeds),
        transition(Needs, Needs, &p.needs_ref, Action::AddNeeds),
        transition(Needs, Needs, &p.empty, Action::Ignore),
        transition(Needs, Covers, &p.covers, Action::Ignore),
        transition(Needs, Tags, &p.tags_int, Action::AddTags),
        transition(Needs, Tags, &p.tags, Action::Ignore),
        transition(Needs, Outside, &p.forward, Action::EndItemThenForward),
        //
        transition(Tags, Tags, &p.tag_entry, Action::AddTags),
        transition(Tags, SpecItem, &p.id, Action::BeginItem),
        transition(Tags, Rationale, &p.rationale, Action::BeginRationale),
        transition(Tags, Comment, &p.comment, Action::BeginComment),
        transition(Tags, Depends, &p.depends, Action::Ignore),
        transition(Tags, Needs, &p.needs_int, Action::AddNeeds),
        transition(Tags, Needs, &p.needs, Action::Ignore),
        transition(Tags, Needs, &p.empty, Action::Ignore),
        transition(Tags, Covers, &p.covers, Action::Ignore),
        transition(Tags, Tags, &p.tags, Action::Ignore),
        transition(Tags, Tags, &p.tags_int, Action::AddTags),
        transition(Tags, Outside, &p.forward, Action::EndItemThenForward),
    ];

    TransitionTable::new("restructuredtext", transitions)
}
