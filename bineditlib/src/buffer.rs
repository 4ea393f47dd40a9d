//! The `buffer` module provides the [`PagedByteBuffer`] struct, the state core of a
//! byte-oriented editor.
//!
//! The document is a flat byte vector split into pages of `side * side` cells.
//! Only the current page is mirrored into editable cells; edits stay in the
//! cells until they are written back, which happens before any operation that
//! changes which bytes are visible or that reads the authoritative document.
//! Two annotation layers sit on top of the bytes: search highlights (one flag
//! per byte, kept index-aligned with the document) and a single selection.

use crate::cell::{CellColor, CellState};
use crate::error::{BinEditError, BinEditErrorKind};
use crate::numstr::is_hex;
use crate::observer::{BufferEvent, BufferObserver};
use crate::search::{SearchType, search};
use crate::selection::SelectRange;

/// Page side used by a freshly created buffer
pub const DEFAULT_PAGE_SIDE: usize = 10;

/// Largest accepted page side, a page holds at most `MAX_PAGE_SIDE²` cells
pub const MAX_PAGE_SIDE: usize = 1024;

/// Page sides offered by the editor's page-size menu
pub const PAGE_SIDE_PRESETS: [usize; 4] = [10, 20, 30, 40];

pub struct PagedByteBuffer {
    /// The document
    bytes: Vec<u8>,
    /// Search marks, one per document byte
    highlights: Vec<bool>,
    /// Selected document indices
    selection: SelectRange,
    /// A page holds `side * side` cells
    side: usize,
    /// Index of the page mirrored into `cells`
    page: usize,
    /// Editable cells of the current page, row-major
    cells: Vec<CellState>,
    /// Injected trace hook
    observer: Option<Box<dyn BufferObserver>>,
}

impl Default for PagedByteBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for PagedByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PagedByteBuffer")
            .field("len", &self.bytes.len())
            .field("side", &self.side)
            .field("page", &self.page)
            .field("selection", &self.selection)
            .field("observer", &self.observer.is_some())
            .finish_non_exhaustive()
    }
}

impl PagedByteBuffer {
    /// Creates an empty buffer with [`DEFAULT_PAGE_SIDE`].
    ///
    /// # Examples
    /// ```
    /// use bineditlib::PagedByteBuffer;
    ///
    /// let buf = PagedByteBuffer::new();
    /// assert_eq!(buf.get_max_page(), 0);
    /// assert!(buf.is_empty());
    /// ```
    #[must_use]
    pub fn new() -> Self {
        let mut buf = Self {
            bytes: Vec::new(),
            highlights: Vec::new(),
            selection: SelectRange::new(),
            side: DEFAULT_PAGE_SIDE,
            page: 0,
            cells: vec![CellState::default(); DEFAULT_PAGE_SIDE * DEFAULT_PAGE_SIDE],
            observer: None,
        };
        buf.update_content();
        buf
    }

    /// Creates an empty buffer with the given page side.
    ///
    /// # Errors
    /// Returns an error if `side` is 0 or above [`MAX_PAGE_SIDE`].
    pub fn with_page_side(side: usize) -> Result<Self, BinEditError> {
        let mut buf = Self::new();
        buf.resize(side)?;
        Ok(buf)
    }

    /// Install the hook that receives [`BufferEvent`]s
    pub fn set_observer(&mut self, observer: Box<dyn BufferObserver>) {
        self.observer = Some(observer);
    }

    pub fn clear_observer(&mut self) {
        self.observer = None;
    }

    fn notify(&mut self, event: &BufferEvent) {
        if let Some(observer) = self.observer.as_mut() {
            observer.on_event(event);
        }
    }

    // =============================== GEOMETRY ===============================

    const fn cells_per_page(&self) -> usize {
        self.side * self.side
    }

    /// Document index of the first cell of the current page
    const fn page_start(&self) -> usize {
        self.page * self.cells_per_page()
    }

    /// Map a visible cell onto a document index.
    /// Returns `None` for cells outside the grid or without data.
    #[must_use]
    pub fn document_index(&self, visible_index: usize) -> Option<usize> {
        if visible_index >= self.cells_per_page() {
            return None;
        }
        let idx = self.page_start() + visible_index;
        if idx < self.bytes.len() {
            Some(idx)
        } else {
            None
        }
    }

    /// Page on which the document index is shown
    #[must_use]
    pub const fn page_of(&self, index: usize) -> usize {
        index / self.cells_per_page()
    }

    #[must_use]
    pub fn get_max_page(&self) -> usize {
        if self.bytes.is_empty() {
            0
        } else {
            (self.bytes.len() - 1) / self.cells_per_page()
        }
    }

    #[must_use]
    pub const fn get_page_num(&self) -> usize {
        self.page
    }

    #[must_use]
    pub const fn page_side(&self) -> usize {
        self.side
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    // =============================== DOCUMENT ===============================

    /// Replace the document. Clears highlights and selection and shows page 0.
    ///
    /// # Examples
    /// ```
    /// use bineditlib::PagedByteBuffer;
    ///
    /// let mut buf = PagedByteBuffer::with_page_side(2).unwrap();
    /// buf.set_data(&[0, 1, 2, 3, 4]);
    /// assert_eq!(buf.get_max_page(), 1);
    /// assert_eq!(buf.get_data(), vec![0, 1, 2, 3, 4]);
    /// ```
    pub fn set_data(&mut self, data: &[u8]) {
        self.bytes = data.to_vec();
        self.highlights = vec![false; data.len()];
        self.selection.unselect();
        self.page = 0;
        self.update_content();

        log::debug!("Loaded {} bytes, {} page(s)", data.len(), self.get_max_page() + 1);
        self.notify(&BufferEvent::DataLoaded { len: data.len() });
    }

    /// Write back pending edits and return a copy of the document
    pub fn get_data(&mut self) -> Vec<u8> {
        self.write_back_page();
        self.bytes.clone()
    }

    /// Change the page side.
    ///
    /// Pending edits are written back by the old geometry first. The current page
    /// is kept, clamped to the new last page.
    ///
    /// # Errors
    /// Returns an error if `new_side` is 0 or above [`MAX_PAGE_SIDE`].
    pub fn resize(&mut self, new_side: usize) -> Result<(), BinEditError> {
        if new_side == 0 {
            return Err(BinEditError::LayoutError(BinEditErrorKind::InvalidPageSide));
        }
        if new_side > MAX_PAGE_SIDE {
            return Err(BinEditError::LayoutError(
                BinEditErrorKind::PageSideTooLarge(new_side, MAX_PAGE_SIDE),
            ));
        }
        if new_side == self.side {
            return Ok(());
        }

        self.write_back_page();

        self.side = new_side;
        self.cells = vec![CellState::default(); new_side * new_side];
        self.page = self.page.min(self.get_max_page());
        self.update_content();

        let max_page = self.get_max_page();
        log::debug!("Resized page to {new_side}x{new_side}, max page {max_page}");
        self.notify(&BufferEvent::Resized {
            side: new_side,
            max_page,
        });
        Ok(())
    }

    /// Commit the text of every active cell into the document.
    /// Text that is not a hex byte is stored as 0.
    pub fn write_back_page(&mut self) {
        let start = self.page_start();
        let mut coerced = 0;

        for (i, cell) in self.cells.iter().enumerate() {
            let Some(byte) = self.bytes.get_mut(start + i) else {
                break;
            };
            *byte = cell.parse().unwrap_or_else(|| {
                log::debug!("Cell {i} text '{}' is not a byte, storing 0", cell.text);
                coerced += 1;
                0
            });
        }

        let page = self.page;
        self.notify(&BufferEvent::WrittenBack { page, coerced });
    }

    /// Refill every cell from the document and recompute its color
    fn update_content(&mut self) {
        let start = self.page_start();

        for (i, cell) in self.cells.iter_mut().enumerate() {
            if let Some(&byte) = self.bytes.get(start + i) {
                cell.load(byte);
            } else {
                cell.disable();
            }
        }

        self.refresh_all();
    }

    // =============================== PAGING ===============================

    pub fn next_page(&mut self) {
        if self.page >= self.get_max_page() {
            return;
        }
        self.switch_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        if self.page == 0 {
            return;
        }
        self.switch_page(self.page - 1);
    }

    /// Show the page holding the document index.
    ///
    /// # Errors
    /// Returns an error if the index is past the end of the document.
    pub fn jump_to(&mut self, index: usize) -> Result<(), BinEditError> {
        if index >= self.bytes.len() {
            return Err(BinEditError::LayoutError(
                BinEditErrorKind::IndexOutOfBounds(index, self.bytes.len()),
            ));
        }
        let page = self.page_of(index);
        if page != self.page {
            self.switch_page(page);
        }
        Ok(())
    }

    fn switch_page(&mut self, page: usize) {
        self.write_back_page();
        self.page = page;
        self.update_content();

        log::debug!("Page: {page}");
        self.notify(&BufferEvent::PageChanged { page });
    }

    // =============================== CELLS ===============================

    /// Current, possibly edited, text of a cell.
    /// Returns `None` for inactive cells.
    #[must_use]
    pub fn cell_value(&self, visible_index: usize) -> Option<&str> {
        self.cells
            .get(visible_index)
            .filter(|cell| cell.active)
            .map(CellState::text)
    }

    /// Replace the text of an active cell with user input.
    ///
    /// Input that is not 0-2 hex digits is rejected and `false` is returned,
    /// as is input aimed at an inactive cell.
    pub fn set_cell_text(&mut self, visible_index: usize, text: &str) -> bool {
        if !is_hex(text) {
            return false;
        }
        match self.cells.get_mut(visible_index) {
            Some(cell) if cell.active => {
                cell.text = text.to_string();
                cell.dirty = true;
                log::trace!("Cell {visible_index} edited to '{text}'");
                true
            }
            _ => false,
        }
    }

    /// All cells of the current page, row-major
    #[must_use]
    pub fn cells(&self) -> &[CellState] {
        &self.cells
    }

    /// Visual state of a cell, derived from selection, highlights and position
    #[must_use]
    pub fn cell_color(&self, visible_index: usize) -> CellColor {
        let Some(idx) = self.document_index(visible_index) else {
            return CellColor::Disabled;
        };

        if self.selection.contain(idx) {
            return CellColor::Selected;
        }
        if self.is_highlighted(idx) {
            return CellColor::Highlighted;
        }

        let row = visible_index / self.side;
        let col = visible_index % self.side;
        if (row + col) % 2 == 0 {
            CellColor::Light
        } else {
            CellColor::Shaded
        }
    }

    fn refresh_cell(&mut self, visible_index: usize) {
        let color = self.cell_color(visible_index);
        if let Some(cell) = self.cells.get_mut(visible_index) {
            cell.color = color;
            cell.dirty = true;
        }
    }

    fn refresh_all(&mut self) {
        for i in 0..self.cells.len() {
            self.refresh_cell(i);
        }
    }

    /// Drain the visible indices of cells that changed since the last call
    pub fn take_repaint(&mut self) -> Vec<usize> {
        self.cells
            .iter_mut()
            .enumerate()
            .filter_map(|(i, cell)| std::mem::take(&mut cell.dirty).then_some(i))
            .collect()
    }

    // =============================== HIGHLIGHTS ===============================

    #[must_use]
    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlights.get(index).copied().unwrap_or(false)
    }

    pub fn clear_highlights(&mut self) {
        self.highlights.fill(false);
        self.refresh_all();
        self.notify(&BufferEvent::HighlightsCleared);
    }

    /// Mark the half-open range `[start, end)` as search match.
    ///
    /// # Errors
    /// Returns an error if `start > end` or `end` is past the document.
    /// No byte is marked in that case.
    pub fn highlight(&mut self, start: usize, end: usize) -> Result<(), BinEditError> {
        if start > end {
            return Err(BinEditError::HighlightError(
                BinEditErrorKind::InvalidRange(start, end),
            ));
        }
        if end > self.bytes.len() {
            return Err(BinEditError::HighlightError(
                BinEditErrorKind::IndexOutOfBounds(end, self.bytes.len()),
            ));
        }

        self.highlights[start..end].fill(true);

        // Only cells on the current page need a repaint
        let page_start = self.page_start();
        let page_end = page_start + self.cells_per_page();
        for idx in start.max(page_start)..end.min(page_end) {
            self.refresh_cell(idx - page_start);
        }

        self.notify(&BufferEvent::Highlighted { start, end });
        Ok(())
    }

    /// Replace all highlights with the matches of a search over the document.
    /// Returns the number of matches.
    pub fn find_and_highlight(&mut self, search_type: &SearchType) -> usize {
        let data = self.get_data();
        let matches = search(&data, search_type);

        self.clear_highlights();
        for range in &matches {
            // Spans come from the snapshot, so they are always in bounds
            if let Err(err) = self.highlight(range.start, range.end) {
                log::warn!("{err}");
            }
        }

        log::debug!("Search found {} match(es)", matches.len());
        matches.len()
    }

    // =============================== SELECTION ===============================

    #[must_use]
    pub const fn selection(&self) -> &SelectRange {
        &self.selection
    }

    /// Forward a click on a cell to the selection.
    /// With `extend` the selection grows from its anchor, otherwise it collapses
    /// onto the clicked byte.
    ///
    /// # Errors
    /// Returns an error if the cell is outside the page grid.
    pub fn on_cell_clicked(
        &mut self,
        visible_index: usize,
        extend: bool,
    ) -> Result<(), BinEditError> {
        if visible_index >= self.cells_per_page() {
            return Err(BinEditError::SelectError(BinEditErrorKind::CellOutOfGrid(
                visible_index,
                self.cells_per_page(),
            )));
        }

        let idx = self.page_start() + visible_index;
        if extend {
            self.selection.set_end(idx);
        } else {
            self.selection.select_single(idx);
        }

        self.refresh_all();

        let interval = self.selection.to_interval(0, usize::MAX);
        log::trace!("Select: {interval:?}");
        self.notify(&BufferEvent::SelectionChanged(interval));
        Ok(())
    }

    pub fn unselect(&mut self) {
        self.selection.unselect();
        self.refresh_all();
        self.notify(&BufferEvent::SelectionChanged(None));
    }

    /// Remove the selected bytes (inclusive) from the document.
    /// Does nothing when nothing is selected or when both ends of the selection
    /// lie past the last byte.
    pub fn delete_selected_bytes(&mut self) {
        if let (Some(anchor), Some(cursor)) = (self.selection.anchor(), self.selection.cursor())
            && anchor.min(cursor) >= self.bytes.len()
        {
            log::debug!("Selection {anchor}..={cursor} holds no bytes, nothing deleted");
            return;
        }
        let Some((a, b)) = self.selection.to_interval(0, self.bytes.len()) else {
            return;
        };

        self.write_back_page();

        self.bytes.drain(a..=b);
        self.highlights.drain(a..=b);
        self.selection.unselect();

        self.page = self.page.min(self.get_max_page());
        self.update_content();

        log::debug!("Deleted bytes {a}..={b}, {} left", self.bytes.len());
        self.notify(&BufferEvent::BytesDeleted { start: a, end: b });
    }
}

#[cfg(feature = "benchmarking")]
impl PagedByteBuffer {
    /// Expose page refill to the benchmarks
    pub fn bench_priv_update_content(&mut self) {
        self.update_content();
    }
}
