//! The `error` module defines the [`BinEditError`] enum that describes the errors that
//! can occur when converting byte text, laying out pages, highlighting, or selecting
//! bytes of a [`PagedByteBuffer`](crate::PagedByteBuffer).
//! It carries two pieces of information:
//! 1. During which kind of operation the error occurred, e.g., conversion or highlighting.
//! 2. What kind of error was encountered (via [`BinEditErrorKind`] enum).

use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinEditError {
    ConvertError(BinEditErrorKind),
    LayoutError(BinEditErrorKind),
    HighlightError(BinEditErrorKind),
    SelectError(BinEditErrorKind),
}

impl BinEditError {
    /// Get the underlying error kind
    #[must_use]
    pub const fn kind(&self) -> &BinEditErrorKind {
        match self {
            Self::ConvertError(kind)
            | Self::LayoutError(kind)
            | Self::HighlightError(kind)
            | Self::SelectError(kind) => kind,
        }
    }
}

impl fmt::Display for BinEditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConvertError(base_err) => {
                write!(f, "Error encountered during byte conversion:\n{base_err}")
            }
            Self::LayoutError(base_err) => {
                write!(f, "Error encountered during page layout:\n{base_err}")
            }
            Self::HighlightError(base_err) => {
                write!(f, "Error encountered during highlighting:\n{base_err}")
            }
            Self::SelectError(base_err) => {
                write!(f, "Error encountered during selection:\n{base_err}")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BinEditErrorKind {
    /// Numeric base is not one of 2, 8, 10 or 16
    UnsupportedBase(u32),
    /// Text contains characters that are not digits of the base
    InvalidDigits(String, u32),
    /// Text parses in the base but does not fit into a byte
    ValueOutOfRange(String, u32),
    /// Page side must be positive
    InvalidPageSide,
    /// Page side (first) is above the largest accepted side (second)
    PageSideTooLarge(usize, usize),
    /// Document index (first) is not below the document length (second)
    IndexOutOfBounds(usize, usize),
    /// Range start is past its end
    InvalidRange(usize, usize),
    /// Visible cell index (first) is not below the cell count (second)
    CellOutOfGrid(usize, usize),
}

impl fmt::Display for BinEditErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedBase(base) => {
                write!(f, "Unsupported base: {base}")
            }
            Self::InvalidDigits(text, base) => {
                write!(f, "'{text}' is not a valid base {base} number")
            }
            Self::ValueOutOfRange(text, base) => {
                write!(f, "'{text}' (base {base}) does not fit into a byte")
            }
            Self::InvalidPageSide => {
                write!(f, "Page side must be greater than zero")
            }
            Self::PageSideTooLarge(side, max) => {
                write!(f, "Page side {side} is larger than the maximum of {max}")
            }
            Self::IndexOutOfBounds(index, len) => {
                write!(f, "Index {index} is out of bounds for {len} bytes")
            }
            Self::InvalidRange(start, end) => {
                write!(f, "Invalid range: start {start} is past end {end}")
            }
            Self::CellOutOfGrid(index, count) => {
                write!(f, "Cell {index} is outside of the {count}-cell page")
            }
        }
    }
}

impl Error for BinEditError {}
impl Error for BinEditErrorKind {}
