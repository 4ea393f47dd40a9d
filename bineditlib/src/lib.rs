#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]
//! # `bineditlib`
//!
//! `bineditlib` is the state core of a byte-oriented binary editor.
//!
//! The library provides:
//! - Paged view over a byte document with editable cells (via [`PagedByteBuffer`]).
//! - Search highlights and an anchor-extendable selection (via [`SelectRange`]).
//! - Byte <-> text conversion in base 2, 8, 10 or 16 (via [`ByteNumStr`]).
//! - Error handling with [`BinEditError`].
//!
//! No UI toolkit is involved: the host renders the cells, forwards clicks and
//! keystrokes, and reads or writes the raw bytes of the file.
//!
//! ## Example
//!
//! ```
//! use bineditlib::PagedByteBuffer;
//!
//! let mut buf = PagedByteBuffer::with_page_side(2).unwrap();
//! buf.set_data(&[0, 1, 2, 3, 4]);
//!
//! buf.on_cell_clicked(1, false).unwrap();
//! buf.on_cell_clicked(3, true).unwrap();
//! buf.delete_selected_bytes();
//!
//! assert_eq!(buf.get_data(), vec![0, 4]);
//! ```

mod buffer;
mod cell;
mod error;
mod numstr;
mod observer;
mod search;
mod selection;

// Public APIs
pub use buffer::{DEFAULT_PAGE_SIDE, MAX_PAGE_SIDE, PAGE_SIDE_PRESETS, PagedByteBuffer};
pub use cell::{CellColor, CellState};
pub use error::{BinEditError, BinEditErrorKind};
pub use numstr::{Base, ByteNumStr, is_bin, is_dec, is_hex, is_oct};
pub use observer::{BufferEvent, BufferObserver, LogObserver};
pub use search::{SearchType, search};
pub use selection::SelectRange;
