#![allow(clippy::unwrap_used)]

use bineditlib::{BinEditError, BinEditErrorKind, CellColor, PagedByteBuffer, SearchType};
use rand::Rng;

fn random_bytes(len: usize) -> Vec<u8> {
    rand::rng()
        .sample_iter(rand::distr::StandardUniform)
        .take(len)
        .collect()
}

/// Page side and document length small enough to hit every edge
fn random_geometry() -> (usize, usize) {
    let mut rng = rand::rng();
    (rng.random_range(1..=8), rng.random_range(0..=300))
}

#[test]
fn test_set_and_get_data_round_trip() {
    for _ in 0..50 {
        // Arrange
        let (side, len) = random_geometry();
        let data = random_bytes(len);
        let mut buf = PagedByteBuffer::with_page_side(side).unwrap();

        // Act
        buf.set_data(&data);

        // Assert
        assert_eq!(buf.get_data(), data);
    }
}

#[test]
fn test_page_coverage_after_resize() {
    for _ in 0..50 {
        // Arrange
        let (side, len) = random_geometry();
        let mut buf = PagedByteBuffer::new();
        buf.set_data(&random_bytes(len));

        // Act
        buf.resize(side).unwrap();

        // Assert
        let max_page = buf.get_max_page();
        assert!((max_page + 1) * side * side >= len);
        if len == 0 {
            assert_eq!(max_page, 0);
        } else {
            assert_eq!(max_page, len.div_ceil(side * side) - 1);
        }
        assert!(buf.get_page_num() <= max_page);
    }
}

#[test]
fn test_write_back_identical_text_is_idempotent() {
    for _ in 0..20 {
        // Arrange
        let (side, len) = random_geometry();
        let data = random_bytes(len);
        let mut buf = PagedByteBuffer::with_page_side(side).unwrap();
        buf.set_data(&data);

        // Act - rewrite every visible cell with its own text, page by page
        loop {
            for i in 0..side * side {
                if let Some(text) = buf.cell_value(i).map(str::to_owned) {
                    assert!(buf.set_cell_text(i, &text));
                }
            }
            if buf.get_page_num() == buf.get_max_page() {
                break;
            }
            buf.next_page();
        }

        // Assert
        assert_eq!(buf.get_data(), data);
    }
}

#[test]
fn test_uppercase_edit_is_accepted() {
    // Arrange
    let mut buf = PagedByteBuffer::with_page_side(2).unwrap();
    buf.set_data(&[0, 0]);

    // Act
    assert!(buf.set_cell_text(1, "Ab"));

    // Assert
    assert_eq!(buf.get_data(), vec![0, 0xAB]);
}

#[test]
fn test_alignment_survives_random_deletes() {
    // Arrange
    let mut rng = rand::rng();
    let mut buf = PagedByteBuffer::with_page_side(3).unwrap();
    let mut model = random_bytes(200);
    buf.set_data(&model);

    for _ in 0..30 {
        if model.is_empty() {
            break;
        }

        // Arrange - highlight one byte so the flag layer has something to shift
        let mark = rng.random_range(0..model.len());
        buf.clear_highlights();
        buf.highlight(mark, mark + 1).unwrap();

        let a = rng.random_range(0..model.len());
        let b = rng.random_range(0..model.len());
        for (idx, extend) in [(a, false), (b, true)] {
            buf.jump_to(idx).unwrap();
            let visible = idx - buf.get_page_num() * 9;
            buf.on_cell_clicked(visible, extend).unwrap();
        }

        // Act
        buf.delete_selected_bytes();
        let (lo, hi) = (a.min(b), a.max(b));
        model.drain(lo..=hi);

        // Assert
        assert_eq!(buf.get_data(), model);
        assert_eq!(buf.len(), model.len());
        assert!(!buf.selection().is_selected());
        assert!(buf.get_page_num() <= buf.get_max_page());

        // The highlight flag moved with its byte, or left with it
        let still_marked: Vec<usize> = (0..buf.len()).filter(|&i| buf.is_highlighted(i)).collect();
        if mark < lo {
            assert_eq!(still_marked, vec![mark]);
        } else if mark > hi {
            assert_eq!(still_marked, vec![mark - (hi - lo + 1)]);
        } else {
            assert!(still_marked.is_empty());
        }
    }
}

#[test]
fn test_delete_selection_example() {
    // Arrange
    let mut buf = PagedByteBuffer::new();
    buf.set_data(&[0, 1, 2, 3, 4]);
    buf.on_cell_clicked(1, false).unwrap();
    buf.on_cell_clicked(3, true).unwrap();

    // Act
    buf.delete_selected_bytes();

    // Assert
    assert_eq!(buf.get_data(), vec![0, 4]);
    assert_eq!(buf.len(), 2);
    assert!(!buf.selection().is_selected());
    assert!(!buf.is_highlighted(0) && !buf.is_highlighted(1));
}

#[test]
fn test_pagination_boundary_example() {
    // Arrange
    let mut buf = PagedByteBuffer::with_page_side(2).unwrap();
    buf.set_data(&[0, 1, 2, 3, 4]);

    // Act + Assert
    assert_eq!(buf.get_max_page(), 1);
    buf.prev_page();
    assert_eq!(buf.get_page_num(), 0);
    buf.next_page();
    buf.next_page();
    assert_eq!(buf.get_page_num(), 1);
}

#[test]
fn test_highlight_survives_page_round_trip() {
    // Arrange
    let mut buf = PagedByteBuffer::with_page_side(1).unwrap();
    buf.set_data(&[7, 8, 9]);
    buf.highlight(0, 1).unwrap();

    // Act
    buf.next_page();
    buf.prev_page();

    // Assert
    assert!(buf.is_highlighted(0));
    assert_eq!(buf.cell_color(0), CellColor::Highlighted);
}

#[test]
fn test_search_highlights_across_pages() {
    // Arrange
    let mut data = random_bytes(64);
    data[6..8].copy_from_slice(&[0xDE, 0xAD]);
    data[40..42].copy_from_slice(&[0xDE, 0xAD]);
    let mut buf = PagedByteBuffer::with_page_side(4).unwrap();
    buf.set_data(&data);

    // Act
    let hits = buf.find_and_highlight(&SearchType::Hex(vec![0xDE, 0xAD]));

    // Assert
    assert!(hits >= 2);
    assert!(buf.is_highlighted(6) && buf.is_highlighted(7));
    assert!(buf.is_highlighted(40) && buf.is_highlighted(41));
    buf.jump_to(40).unwrap();
    assert_eq!(buf.get_page_num(), 2);
    assert_eq!(buf.cell_color(8), CellColor::Highlighted);
}

#[test]
fn test_highlight_out_of_bounds_is_rejected() {
    // Arrange
    let mut buf = PagedByteBuffer::new();
    buf.set_data(&[1, 2, 3]);

    // Act
    let res = buf.highlight(2, 10);

    // Assert
    assert_eq!(
        res,
        Err(BinEditError::HighlightError(
            BinEditErrorKind::IndexOutOfBounds(10, 3)
        ))
    );
    assert!(!buf.is_highlighted(2));
}
