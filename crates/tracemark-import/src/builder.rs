//! Item assembly.
//!
//! [`ItemBuilder`] accumulates the specification item currently under
//! construction; [`Action`]s are the closed set of operations the transition
//! tables may run against it. At most one item is open at a time, and a
//! flushed item is never touched again.

use crate::reader::LineContext;
use regex::Captures;
use tracemark_core::{
    ForwardingDeclaration, ImportEventListener, ItemStatus, SpecificationItem, parse_item_id,
};
use tracing::trace;

/// Side-effecting operation attached to a transition.
///
/// Compound variants (`EndItemThen*`) exist for dialects where the trigger
/// line also marks a document-section boundary and must flush the open item
/// first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consume the line without touching the builder.
    Ignore,
    /// Open a new item from the captured id, flushing any open one.
    BeginItem,
    /// Set the captured status keyword on the open item.
    SetStatus,
    BeginDescription,
    AppendDescription,
    BeginRationale,
    AppendRationale,
    BeginComment,
    AppendComment,
    /// Append the captured reference to the covers list.
    AddCovers,
    /// Append the captured reference to the depends list.
    AddDepends,
    /// Add the captured artifact type(s) to the needs set.
    AddNeeds,
    /// Add the captured tag(s) to the tag set.
    AddTags,
    /// Remember the captured heading text as a pending title.
    RememberTitle,
    /// Remember the previous line as a pending title (underline headings).
    RememberPreviousLineAsTitle,
    /// Discard an unconfirmed pending title.
    ResetTitle,
    /// Flush the open item, then remember the captured heading text.
    EndItemThenRememberTitle,
    /// Emit a forwarding declaration from the captured notation.
    Forward,
    /// Flush the open item, then emit a forwarding declaration.
    EndItemThenForward,
}

impl Action {
    pub(crate) fn apply(
        &self,
        builder: &mut ItemBuilder,
        captures: &Captures<'_>,
        context: &LineContext<'_>,
        listener: &mut dyn ImportEventListener,
    ) {
        let group = |index: usize| captures.get(index).map_or("", |m| m.as_str());
        match self {
            Action::Ignore => {}
            Action::BeginItem => builder.begin_item(group(1), listener),
            Action::SetStatus => builder.set_status(group(1)),
            Action::BeginDescription => builder.begin_description(group(1)),
            Action::AppendDescription => builder.append_description(group(1)),
            Action::BeginRationale => builder.begin_rationale(group(1)),
            Action::AppendRationale => builder.append_rationale(group(1)),
            Action::BeginComment => builder.begin_comment(group(1)),
            Action::AppendComment => builder.append_comment(group(1)),
            Action::AddCovers => builder.add_covers(group(1)),
            Action::AddDepends => builder.add_depends(group(1)),
            Action::AddNeeds => builder.add_needs(group(1)),
            Action::AddTags => builder.add_tags(group(1)),
            Action::RememberTitle => builder.remember_title(group(1)),
            Action::RememberPreviousLineAsTitle => {
                if let Some(previous) = context.previous {
                    builder.remember_title(previous);
                }
            }
            Action::ResetTitle => builder.reset_title(),
            Action::EndItemThenRememberTitle => {
                builder.end_item(listener);
                builder.remember_title(group(1));
            }
            Action::Forward => builder.forward(group(1), listener),
            Action::EndItemThenForward => {
                builder.end_item(listener);
                builder.forward(group(1), listener);
            }
        }
    }
}

/// Accumulator for the specification item under construction.
///
/// The pending title is held outside any item: headings are remembered here
/// and committed onto the next item that opens, or dropped by `reset_title`
/// when the heading turns out not to introduce an item.
#[derive(Debug, Default)]
pub struct ItemBuilder {
    open: Option<SpecificationItem>,
    pending_title: Option<String>,
}

impl ItemBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new item. An already-open item is flushed first; a pending
    /// title is moved onto the new item.
    ///
    /// The id text was validated by the pattern match already, so a parse
    /// failure here means the pattern and the id grammar drifted apart; the
    /// line is then treated like any other unrecognized content.
    pub fn begin_item(&mut self, id_text: &str, listener: &mut dyn ImportEventListener) {
        let Some(id) = parse_item_id(id_text) else {
            trace!(id = id_text, "captured id does not parse, skipping");
            return;
        };
        self.end_item(listener);
        let mut item = SpecificationItem::new(id);
        item.title = self.pending_title.take();
        self.open = Some(item);
    }

    /// Flush the open item to the listener. Idempotent when nothing is open.
    pub fn end_item(&mut self, listener: &mut dyn ImportEventListener) {
        if let Some(item) = self.open.take() {
            listener.on_item(item);
        }
    }

    pub fn set_status(&mut self, keyword: &str) {
        if let (Some(item), Some(status)) = (self.open.as_mut(), ItemStatus::parse(keyword)) {
            item.status = Some(status);
        }
    }

    pub fn begin_description(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            item.description = text.to_string();
        }
    }

    pub fn append_description(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            append_block(&mut item.description, text);
        }
    }

    pub fn begin_rationale(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            item.rationale = text.to_string();
        }
    }

    pub fn append_rationale(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            append_block(&mut item.rationale, text);
        }
    }

    pub fn begin_comment(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            item.comment = text.to_string();
        }
    }

    pub fn append_comment(&mut self, text: &str) {
        if let Some(item) = self.open.as_mut() {
            append_block(&mut item.comment, text);
        }
    }

    pub fn add_covers(&mut self, reference: &str) {
        if let (Some(item), Some(id)) = (self.open.as_mut(), parse_item_id(reference)) {
            item.covers.push(id);
        }
    }

    pub fn add_depends(&mut self, reference: &str) {
        if let (Some(item), Some(id)) = (self.open.as_mut(), parse_item_id(reference)) {
            item.depends.push(id);
        }
    }

    /// Add one or more comma-separated artifact types to the needs set.
    pub fn add_needs(&mut self, type_list: &str) {
        if let Some(item) = self.open.as_mut() {
            add_list_entries(&mut item.needs_artifact_types, type_list);
        }
    }

    /// Add one or more comma-separated tags to the tag set.
    pub fn add_tags(&mut self, tag_list: &str) {
        if let Some(item) = self.open.as_mut() {
            add_list_entries(&mut item.tags, tag_list);
        }
    }

    pub fn remember_title(&mut self, title: &str) {
        self.pending_title = Some(title.to_string());
    }

    pub fn reset_title(&mut self) {
        self.pending_title = None;
    }

    /// Build and immediately emit a forwarding declaration. Does not open,
    /// modify, or close the current item; transitions that need to close it
    /// do so as an explicit separate step.
    pub fn forward(&mut self, token: &str, listener: &mut dyn ImportEventListener) {
        match ForwardingDeclaration::parse(token) {
            Some(declaration) => listener.on_forward(declaration),
            None => trace!(token, "captured forwarding notation does not parse, skipping"),
        }
    }
}

/// Split a comma-separated list and add each trimmed entry, keeping
/// first-seen order and dropping duplicates and empty entries.
fn add_list_entries(set: &mut Vec<String>, list: &str) {
    for entry in list.split(',') {
        let entry = entry.trim();
        if entry.is_empty() {
            continue;
        }
        if !set.iter().any(|existing| existing == entry) {
            set.push(entry.to_string());
        }
    }
}

/// Multi-line field accumulation: the first chunk replaces the empty field,
/// later chunks are joined with a newline.
fn append_block(field: &mut String, text: &str) {
    if field.is_empty() {
        field.push_str(text);
    } else {
        field.push('\n');
        field.push_str(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracemark_core::{EventCollector, ImportEvent};

    fn open_item(builder: &mut ItemBuilder, listener: &mut EventCollector, id: &str) {
        builder.begin_item(id, listener);
    }

    #[test]
    fn begin_item_flushes_the_previous_one() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~first~1");
        open_item(&mut builder, &mut collector, "req~second~1");

        assert_eq!(collector.items().count(), 1);
        assert_eq!(collector.items().next().unwrap().id.name, "first");

        builder.end_item(&mut collector);
        assert_eq!(collector.items().count(), 2);
    }

    #[test]
    fn end_item_is_idempotent() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        builder.end_item(&mut collector);
        builder.end_item(&mut collector);
        assert!(collector.events().is_empty());
    }

    #[test]
    fn pending_title_is_moved_onto_the_next_item() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        builder.remember_title("Feature X");
        open_item(&mut builder, &mut collector, "req~feature.x~1");
        builder.end_item(&mut collector);
        open_item(&mut builder, &mut collector, "req~feature.y~1");
        builder.end_item(&mut collector);

        let titles: Vec<_> = collector.items().map(|i| i.title.clone()).collect();
        assert_eq!(titles, [Some("Feature X".to_string()), None]);
    }

    #[test]
    fn reset_discards_an_unconfirmed_title() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        builder.remember_title("Not a heading after all");
        builder.reset_title();
        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.end_item(&mut collector);

        assert_eq!(collector.items().next().unwrap().title, None);
    }

    #[test]
    fn description_appends_join_with_newlines() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.begin_description("");
        builder.append_description("first line");
        builder.append_description("second line");
        builder.end_item(&mut collector);

        assert_eq!(
            collector.items().next().unwrap().description,
            "first line\nsecond line"
        );
    }

    #[test]
    fn begin_replaces_earlier_section_content() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.begin_rationale("old");
        builder.begin_rationale("new");
        builder.end_item(&mut collector);

        assert_eq!(collector.items().next().unwrap().rationale, "new");
    }

    #[test]
    fn needs_and_tags_are_sets_with_comma_splitting() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.add_needs(" impl , utest ");
        builder.add_needs("impl");
        builder.add_tags("fast, safe");
        builder.add_tags("safe");
        builder.end_item(&mut collector);

        let item = collector.items().next().unwrap().clone();
        assert_eq!(item.needs_artifact_types, ["impl", "utest"]);
        assert_eq!(item.tags, ["fast", "safe"]);
    }

    #[test]
    fn covers_and_depends_keep_document_order() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.add_covers("req~parent~1");
        builder.add_covers("req:legacy.parent");
        builder.add_depends("dsn~engine~2");
        builder.end_item(&mut collector);

        let item = collector.items().next().unwrap().clone();
        assert_eq!(item.covers.len(), 2);
        assert_eq!(item.covers[1].to_string(), "req~legacy.parent~1");
        assert_eq!(item.depends[0].to_string(), "dsn~engine~2");
    }

    #[test]
    fn mutations_without_an_open_item_are_ignored() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        builder.set_status("approved");
        builder.append_description("orphan text");
        builder.add_tags("tag");
        builder.end_item(&mut collector);

        assert!(collector.events().is_empty());
    }

    #[test]
    fn forward_emits_without_touching_the_open_item() {
        let mut builder = ItemBuilder::new();
        let mut collector = EventCollector::new();

        open_item(&mut builder, &mut collector, "req~feature~1");
        builder.forward("dsn => impl @req~feature~1", &mut collector);
        builder.end_item(&mut collector);

        assert!(matches!(collector.events()[0], ImportEvent::Forward(_)));
        assert!(matches!(collector.events()[1], ImportEvent::Item(_)));
    }
}
