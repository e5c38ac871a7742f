//! Chip row layout.
//!
//! Pure layout math for the tag input: pack measured chip widths into rows
//! bounded by the content width, then derive where the text input lands
//! and how tall the widget needs to be.

/// A measured chip: the rendered width of one tag in terminal columns.
///
/// Boxes are rebuilt on every layout pass; widths go stale whenever the
/// underlying text changes, so they are never cached across renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChipBox {
    /// Rendered width in columns.
    pub width: u16,
}

impl ChipBox {
    /// Create a box with the given width.
    pub fn new(width: u16) -> Self {
        Self { width }
    }
}

/// Partition chips into rows bounded by `content_width`.
///
/// Greedy first-fit in input order: a chip goes on the current row when it
/// still fits (a chip that exactly fills the remaining width stays on the
/// row), otherwise it starts a new row. A single chip wider than the
/// content width still gets its own row, so every chip is placed and order
/// is never changed. This mirrors left-to-right text wrapping rather than
/// optimal bin packing.
///
/// Returns the rows as ordered index sequences into `boxes`.
pub fn pack_rows(boxes: &[ChipBox], content_width: u16) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut row: Vec<usize> = Vec::new();
    let mut row_width: u32 = 0;

    for (index, chip) in boxes.iter().enumerate() {
        let width = u32::from(chip.width);
        if row.is_empty() || row_width + width <= u32::from(content_width) {
            row.push(index);
            row_width += width;
        } else {
            rows.push(std::mem::take(&mut row));
            row.push(index);
            row_width = width;
        }
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows
}

/// The computed chip layout plus input placement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipLayout {
    /// Chip rows, each an ordered sequence of indices into the boxes.
    pub rows: Vec<Vec<usize>>,
    /// Width available to the text input.
    pub input_width: u16,
    /// Whether the input wraps onto its own row below the chips.
    pub input_on_new_row: bool,
}

impl ChipLayout {
    /// Rows occupied by the widget, including the input row.
    pub fn row_count(&self) -> usize {
        if self.input_on_new_row {
            self.rows.len() + 1
        } else {
            self.rows.len().max(1)
        }
    }

    /// Total height of the widget content for the given row height.
    pub fn required_height(&self, row_height: u16) -> u16 {
        (self.row_count() as u16).saturating_mul(row_height)
    }
}

/// Lay out chips and the trailing text input.
///
/// The input shares the last chip row when the remaining space there is at
/// least `min_input_width`; otherwise it takes the full content width on a
/// fresh row.
pub fn layout(boxes: &[ChipBox], content_width: u16, min_input_width: u16) -> ChipLayout {
    let rows = pack_rows(boxes, content_width);

    let last_row_width: u16 = rows
        .last()
        .map(|row| row.iter().map(|&i| boxes[i].width).sum())
        .unwrap_or(0);

    let remaining = content_width.saturating_sub(last_row_width);
    if !rows.is_empty() && remaining >= min_input_width {
        ChipLayout {
            rows,
            input_width: remaining,
            input_on_new_row: false,
        }
    } else {
        let input_on_new_row = !rows.is_empty();
        ChipLayout {
            rows,
            input_width: content_width,
            input_on_new_row,
        }
    }
}
