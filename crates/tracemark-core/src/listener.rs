//! Import event listener interface.

use crate::item::{ForwardingDeclaration, SpecificationItem};

/// Receives the results of one document import, in document order.
///
/// For a single engine run the sequence is: zero or more `on_item` /
/// `on_forward` calls, strictly interleaved in the order items and
/// declarations are closed, followed by exactly one `finished` call, even
/// for an empty document. Completion calls are never duplicated or
/// re-ordered.
pub trait ImportEventListener {
    /// A specification item has been fully assembled.
    fn on_item(&mut self, item: SpecificationItem);

    /// A forwarding declaration has been recognized.
    fn on_forward(&mut self, declaration: ForwardingDeclaration);

    /// End of input was reached; no further calls will follow.
    fn finished(&mut self);
}

/// One delivered import result, preserving the interleaving of items and
/// forwarding declarations.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportEvent {
    Item(SpecificationItem),
    Forward(ForwardingDeclaration),
}

/// Listener that buffers everything it receives.
///
/// Useful for callers that want a flat result instead of streaming, and for
/// tests asserting delivery order.
#[derive(Debug, Default)]
pub struct EventCollector {
    events: Vec<ImportEvent>,
    finished: bool,
}

impl EventCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// All delivered events, in delivery order.
    pub fn events(&self) -> &[ImportEvent] {
        &self.events
    }

    /// Delivered specification items, in delivery order.
    pub fn items(&self) -> impl Iterator<Item = &SpecificationItem> {
        self.events.iter().filter_map(|e| match e {
            ImportEvent::Item(item) => Some(item),
            ImportEvent::Forward(_) => None,
        })
    }

    /// Delivered forwarding declarations, in delivery order.
    pub fn forwards(&self) -> impl Iterator<Item = &ForwardingDeclaration> {
        self.events.iter().filter_map(|e| match e {
            ImportEvent::Forward(fwd) => Some(fwd),
            ImportEvent::Item(_) => None,
        })
    }

    /// Whether the terminal `finished` notification arrived.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consume the collector, yielding the buffered events.
    pub fn into_events(self) -> Vec<ImportEvent> {
        self.events
    }
}

impl ImportEventListener for EventCollector {
    fn on_item(&mut self, item: SpecificationItem) {
        self.events.push(ImportEvent::Item(item));
    }

    fn on_forward(&mut self, declaration: ForwardingDeclaration) {
        self.events.push(ImportEvent::Forward(declaration));
    }

    fn finished(&mut self) {
        self.finished = true;
    }
}
