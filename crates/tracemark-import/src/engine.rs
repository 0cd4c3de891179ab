//! The dialect-independent parsing engine.
//!
//! The engine walks an ordered transition table: for every incoming line it
//! picks the first transition whose source state matches and whose pattern
//! fully matches the line text, applies that transition's action, and moves
//! to the target state. Lines matching nothing are skipped. The same engine
//! executes any dialect's table; dialects only differ in the table value.

use crate::builder::{Action, ItemBuilder};
use crate::reader::{LineContext, LineListener};
use regex::{Captures, Regex};
use std::sync::Arc;
use tracemark_core::ImportEventListener;
use tracing::trace;

/// States of the line parser.
///
/// `Start` is the unique initial state. There is no terminal state; parsing
/// simply ends at end-of-input, flushing any open item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    Start,
    Outside,
    Title,
    SpecItem,
    Description,
    Rationale,
    Comment,
    Covers,
    Depends,
    Needs,
    Tags,
}

/// A named full-line recognizer.
///
/// The regular expression is matched against the entire line (anchors are
/// implied); partial matches do not count. Capture groups carry extracted
/// values to the transition's action.
#[derive(Debug, Clone)]
pub struct LinePattern {
    name: &'static str,
    regex: Regex,
}

impl LinePattern {
    /// Compile a pattern. Dialect catalogs are built once per process and
    /// shared, so the patterns are fixed strings; a malformed one is a bug.
    pub fn new(name: &'static str, pattern: &str) -> Arc<Self> {
        let regex = Regex::new(&format!("^(?:{pattern})$"))
            .unwrap_or_else(|e| panic!("invalid line pattern '{name}': {e}"));
        Arc::new(Self { name, regex })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Full-line match, returning captures on success.
    pub fn matches<'t>(&self, line: &'t str) -> Option<Captures<'t>> {
        self.regex.captures(line)
    }
}

/// One edge of a dialect's state machine.
#[derive(Debug, Clone)]
pub struct Transition {
    from: ParserState,
    to: ParserState,
    pattern: Arc<LinePattern>,
    action: Action,
}

impl Transition {
    pub fn from_state(&self) -> ParserState {
        self.from
    }

    pub fn to_state(&self) -> ParserState {
        self.to
    }

    pub fn pattern_name(&self) -> &'static str {
        self.pattern.name
    }

    pub fn action(&self) -> Action {
        self.action
    }
}

/// Shorthand constructor used by the dialect table builders.
pub fn transition(
    from: ParserState,
    to: ParserState,
    pattern: &Arc<LinePattern>,
    action: Action,
) -> Transition {
    Transition {
        from,
        to,
        pattern: Arc::clone(pattern),
        action,
    }
}

/// An ordered transition list for one dialect.
///
/// Order is contractual: when several patterns could match a line in the
/// current state, the transition declared first wins. Tables are pure data;
/// they carry no parse state and are shared across engine runs.
#[derive(Debug, Clone)]
pub struct TransitionTable {
    dialect: &'static str,
    transitions: Vec<Transition>,
}

impl TransitionTable {
    pub fn new(dialect: &'static str, transitions: Vec<Transition>) -> Self {
        Self {
            dialect,
            transitions,
        }
    }

    pub fn dialect(&self) -> &'static str {
        self.dialect
    }

    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }
}

/// One document's parse run.
///
/// Owns the current state, the item accumulator, and the pending title
/// exclusively; engines are neither shared between documents nor safe for
/// concurrent use. Parse several documents in parallel by running one engine
/// per document.
pub struct ImportEngine<'a> {
    table: &'a TransitionTable,
    state: ParserState,
    builder: ItemBuilder,
    listener: &'a mut dyn ImportEventListener,
}

impl<'a> ImportEngine<'a> {
    pub fn new(table: &'a TransitionTable, listener: &'a mut dyn ImportEventListener) -> Self {
        Self {
            table,
            state: ParserState::Start,
            builder: ItemBuilder::new(),
            listener,
        }
    }

    /// Current parser state, exposed for tests and diagnostics.
    pub fn state(&self) -> ParserState {
        self.state
    }
}

impl LineListener for ImportEngine<'_> {
    fn next_line(&mut self, context: &LineContext<'_>) {
        for t in self.table.transitions() {
            if t.from != self.state {
                continue;
            }
            if let Some(captures) = t.pattern.matches(context.current) {
                trace!(
                    dialect = self.table.dialect(),
                    line = context.number,
                    pattern = t.pattern.name(),
                    from = ?t.from,
                    to = ?t.to,
                    "transition"
                );
                t.action
                    .apply(&mut self.builder, &captures, context, self.listener);
                self.state = t.to;
                return;
            }
        }
        // No transition matched: the line is surrounding prose. Skip it,
        // leaving state and the open item untouched.
        trace!(
            dialect = self.table.dialect(),
            line = context.number,
            state = ?self.state,
            "line skipped"
        );
    }

    fn finish(&mut self) {
        self.builder.end_item(self.listener);
        self.listener.finished();
    }
}
