/// Visual state of a single cell, in priority order.
///
/// The UI maps these onto real colors; the checkerboard alternates by
/// `(row + col) % 2` within the page grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CellColor {
    /// Part of the current selection (1st prio)
    Selected,
    /// Marked by a search match (2nd prio)
    Highlighted,
    /// Checkerboard base, even `row + col`
    Light,
    /// Checkerboard base, odd `row + col`
    Shaded,
    /// No data behind the cell
    #[default]
    Disabled,
}

/// Page-relative state of one editable cell
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellState {
    /// Text shown in the cell, possibly edited and not yet written back
    pub(crate) text: String,
    /// Does the cell map onto a document byte
    pub(crate) active: bool,
    /// Last computed visual state
    pub(crate) color: CellColor,
    /// Needs to be repainted by the UI
    pub(crate) dirty: bool,
}

impl CellState {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn color(&self) -> CellColor {
        self.color
    }

    /// Load a byte into the cell as two lowercase hex digits
    pub(crate) fn load(&mut self, byte: u8) {
        self.text = format!("{byte:02x}");
        self.active = true;
    }

    /// Empty the cell and mark it as having no data
    pub(crate) fn disable(&mut self) {
        self.text.clear();
        self.active = false;
        self.color = CellColor::Disabled;
    }

    /// Parse the cell text as a hex byte. Invalid or empty text gives `None`.
    pub(crate) fn parse(&self) -> Option<u8> {
        u8::from_str_radix(&self.text, 16).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_formats_two_hex_digits() {
        // Arrange
        let mut cell = CellState::default();

        // Act
        cell.load(0x0A);

        // Assert
        assert_eq!(cell.text(), "0a");
        assert!(cell.is_active());
        assert_eq!(cell.parse(), Some(0x0A));
    }

    #[test]
    fn test_parse_rejects_empty_and_garbage() {
        // Arrange
        let mut cell = CellState::default();
        cell.load(0xFF);

        // Act
        cell.text.clear();
        let empty = cell.parse();
        cell.text = "zz".to_string();
        let garbage = cell.parse();

        // Assert
        assert_eq!(empty, None);
        assert_eq!(garbage, None);
    }

    #[test]
    fn test_disable_clears_text() {
        // Arrange
        let mut cell = CellState::default();
        cell.load(0x12);

        // Act
        cell.disable();

        // Assert
        assert_eq!(cell.text(), "");
        assert!(!cell.is_active());
        assert_eq!(cell.color(), CellColor::Disabled);
    }
}
