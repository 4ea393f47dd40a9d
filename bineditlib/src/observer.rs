//! Observation hook for [`PagedByteBuffer`](crate::PagedByteBuffer).
//!
//! The buffer reports its state changes to an injected [`BufferObserver`]
//! instead of printing them. [`LogObserver`] forwards every event to the `log`
//! facade, so the host decides where the trace ends up.

/// State change reported by the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferEvent {
    /// New document loaded
    DataLoaded { len: usize },
    /// Current page switched
    PageChanged { page: usize },
    /// Page geometry changed
    Resized { side: usize, max_page: usize },
    /// Visible cells committed into the document.
    /// `coerced` counts cells whose text did not parse and were stored as 0.
    WrittenBack { page: usize, coerced: usize },
    /// Half-open range marked as search match
    Highlighted { start: usize, end: usize },
    /// All search marks removed
    HighlightsCleared,
    /// Selection moved, as an ordered inclusive interval
    SelectionChanged(Option<(usize, usize)>),
    /// Inclusive range removed from the document
    BytesDeleted { start: usize, end: usize },
}

pub trait BufferObserver {
    fn on_event(&mut self, event: &BufferEvent);
}

/// Observer that writes events to the `log` facade at info level
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl BufferObserver for LogObserver {
    fn on_event(&mut self, event: &BufferEvent) {
        log::info!("{event:?}");
    }
}

impl<F: FnMut(&BufferEvent)> BufferObserver for F {
    fn on_event(&mut self, event: &BufferEvent) {
        self(event);
    }
}
