/// Anchor-extendable selection over document indices.
///
/// The range is stored as `[anchor, cursor]` and is inverted when the selection
/// grows right-to-left. Both ends are set together or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectRange {
    range: Option<[usize; 2]>,
}

impl SelectRange {
    #[must_use]
    pub const fn new() -> Self {
        Self { range: None }
    }

    /// Collapse the selection onto a single index, discarding any previous anchor
    pub const fn select_single(&mut self, idx: usize) {
        self.range = Some([idx, idx]);
    }

    /// Move the cursor end of the selection. Starts a single-index selection
    /// if nothing is selected yet.
    pub fn set_end(&mut self, idx: usize) {
        let sel = self.range.get_or_insert([idx, idx]);
        sel[1] = idx;
    }

    /// Clear selection range
    pub const fn unselect(&mut self) {
        self.range = None;
    }

    #[must_use]
    pub const fn is_selected(&self) -> bool {
        self.range.is_some()
    }

    /// Fixed end of the selection
    #[must_use]
    pub const fn anchor(&self) -> Option<usize> {
        match self.range {
            Some([anchor, _]) => Some(anchor),
            None => None,
        }
    }

    /// Moving end of the selection
    #[must_use]
    pub const fn cursor(&self) -> Option<usize> {
        match self.range {
            Some([_, cursor]) => Some(cursor),
            None => None,
        }
    }

    /// Check if the provided index lies between anchor and cursor (inclusive)
    #[must_use]
    pub const fn contain(&self, idx: usize) -> bool {
        if let Some(range) = self.range {
            if range[0] < range[1] {
                return range[0] <= idx && range[1] >= idx;
            }
            return range[1] <= idx && range[0] >= idx;
        }
        false
    }

    /// Ordered inclusive interval of the selection, with both ends clamped
    /// into `[lower, upper_exclusive - 1]`.
    ///
    /// Returns `None` when nothing is selected or when the bounds describe an
    /// empty span (`upper_exclusive <= lower`).
    #[must_use]
    pub fn to_interval(&self, lower: usize, upper_exclusive: usize) -> Option<(usize, usize)> {
        let [anchor, cursor] = self.range?;
        if upper_exclusive <= lower {
            return None;
        }
        let high = upper_exclusive - 1;

        let a = anchor.min(cursor).clamp(lower, high);
        let b = anchor.max(cursor).clamp(lower, high);
        Some((a, b))
    }
}
