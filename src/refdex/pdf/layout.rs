//! Flow layout for the index document.
//!
//! Turns grouped entries into absolutely positioned drawing operations, one
//! list per page. Coordinates here are top-down (y grows towards the bottom of
//! the page); the writer flips them into PDF space.
//!
//! Flow per category: heading, header row, one row per entry, spacer. A row
//! that does not fit moves to the next page, where the header row is repeated.
//! A heading never ends a page on its own: it moves along with the first row.
//! A row taller than a whole page is split line-wise across pages.

use super::text::{wrap, Font, TextStyle};
use crate::group::CategoryGroup;

pub const POINTS_PER_INCH: f32 = 72.0;

/// Page size and margins in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const LETTER: PageGeometry = PageGeometry {
        width: 612.0,
        height: 792.0,
        margin: 40.0,
    };

    pub fn usable_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    fn bottom(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::LETTER
    }
}

/// Fixed look of the index tables.
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    /// Term, description and page column widths.
    pub columns: [f32; 3],
    pub header: TextStyle,
    pub term: TextStyle,
    pub desc: TextStyle,
    pub page: TextStyle,
    pub heading: TextStyle,
    pub heading_space_before: f32,
    pub heading_space_after: f32,
    pub cell_padding_x: f32,
    pub cell_padding_y: f32,
    pub grid_width: f32,
    pub grid_gray: f32,
    pub header_gray: f32,
    pub spacer: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            columns: [
                1.6 * POINTS_PER_INCH,
                4.8 * POINTS_PER_INCH,
                1.0 * POINTS_PER_INCH,
            ],
            header: TextStyle::new(Font::Bold, 10.0),
            term: TextStyle::new(Font::Bold, 9.0),
            desc: TextStyle::new(Font::Regular, 8.0),
            page: TextStyle::new(Font::Oblique, 7.0),
            heading: TextStyle::new(Font::Bold, 10.0),
            heading_space_before: 10.0,
            heading_space_after: 6.0,
            cell_padding_x: 6.0,
            cell_padding_y: 3.0,
            grid_width: 0.25,
            grid_gray: 0.5,
            header_gray: 0.827,
            spacer: 0.2 * POINTS_PER_INCH,
        }
    }
}

impl TableStyle {
    pub fn table_width(&self) -> f32 {
        self.columns.iter().sum()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline position.
        y: f32,
        style: TextStyle,
        text: String,
    },
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        gray: f32,
        line_width: f32,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LaidOutPage {
    pub ops: Vec<DrawOp>,
}

impl LaidOutPage {
    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
struct Cell {
    style: TextStyle,
    lines: Vec<String>,
}

#[derive(Debug, Clone)]
struct Row {
    cells: [Cell; 3],
    is_header: bool,
}

pub struct IndexLayout {
    geometry: PageGeometry,
    style: TableStyle,
    pages: Vec<LaidOutPage>,
    y: f32,
    /// Whether anything beyond a repeated header has been placed on the current page.
    page_has_content: bool,
}

impl IndexLayout {
    pub fn new(geometry: PageGeometry, style: TableStyle) -> Self {
        Self {
            geometry,
            style,
            pages: vec![LaidOutPage::default()],
            y: geometry.margin,
            page_has_content: false,
        }
    }

    /// Lays out every group and returns the pages. Always at least one page.
    pub fn layout(mut self, groups: &[CategoryGroup]) -> Vec<LaidOutPage> {
        for (i, group) in groups.iter().enumerate() {
            if i > 0 {
                self.advance(self.style.spacer);
            }
            self.layout_group(group);
        }
        self.pages
    }

    fn table_x(&self) -> f32 {
        self.geometry.margin + (self.geometry.usable_width() - self.style.table_width()) / 2.0
    }

    fn remaining(&self) -> f32 {
        self.geometry.bottom() - self.y
    }

    fn advance(&mut self, dy: f32) {
        self.y = (self.y + dy).min(self.geometry.bottom());
    }

    fn new_page(&mut self) {
        self.pages.push(LaidOutPage::default());
        self.y = self.geometry.margin;
        self.page_has_content = false;
    }

    fn push(&mut self, op: DrawOp) {
        if let Some(page) = self.pages.last_mut() {
            page.ops.push(op);
        }
    }

    fn heading_height(&self) -> f32 {
        self.style.heading_space_before + self.style.heading.leading() + self.style.heading_space_after
    }

    fn layout_group(&mut self, group: &CategoryGroup) {
        let header = self.header_row();
        let rows: Vec<Row> = group.entries.iter().map(|e| self.entry_row(e)).collect();

        // Keep the heading together with the header and the first row.
        let first_row = rows.first().map(|r| self.row_height(r)).unwrap_or(0.0);
        let needed = self.heading_height() + self.row_height(&header) + first_row;
        if self.page_has_content && needed > self.remaining() {
            self.new_page();
        }

        self.place_heading(group.heading());
        self.place_row(&header);

        for row in rows {
            self.place_entry_row(row, &header);
        }
    }

    fn place_heading(&mut self, text: &str) {
        self.advance(self.style.heading_space_before);
        let style = self.style.heading;
        if !text.is_empty() {
            self.push(DrawOp::Text {
                x: self.geometry.margin,
                y: self.y + style.ascent(),
                style,
                text: text.to_string(),
            });
        }
        self.advance(style.leading() + self.style.heading_space_after);
        self.page_has_content = true;
    }

    fn place_entry_row(&mut self, mut row: Row, header: &Row) {
        loop {
            if self.row_height(&row) <= self.remaining() {
                self.place_row(&row);
                self.page_has_content = true;
                return;
            }

            // A row that fits on a fresh page moves there whole. A taller one
            // starts here, so a heading above it is never left on its own.
            let fresh_room = self.geometry.bottom() - self.geometry.margin - self.row_height(header);
            let splittable = self.remaining() >= self.min_row_height(&row);
            if self.page_has_content && (self.row_height(&row) <= fresh_room || !splittable) {
                self.new_page();
                self.place_row(header);
                continue;
            }

            // Place what fits, carry the rest over.
            let (head, tail) = self.split_row(row);
            self.place_row(&head);
            self.page_has_content = true;
            row = tail;
        }
    }

    fn split_row(&self, row: Row) -> (Row, Row) {
        let available = self.remaining() - 2.0 * self.style.cell_padding_y;
        let [a, b, c] = row.cells;
        let split = |cell: Cell| -> (Cell, Cell) {
            let fit = ((available / cell.style.leading()).floor() as usize).max(1);
            let mut head = cell.lines;
            let tail = if head.len() > fit {
                head.split_off(fit)
            } else {
                Vec::new()
            };
            (
                Cell {
                    style: cell.style,
                    lines: head,
                },
                Cell {
                    style: cell.style,
                    lines: tail,
                },
            )
        };
        let (a_head, a_tail) = split(a);
        let (b_head, b_tail) = split(b);
        let (c_head, c_tail) = split(c);
        (
            Row {
                cells: [a_head, b_head, c_head],
                is_header: row.is_header,
            },
            Row {
                cells: [a_tail, b_tail, c_tail],
                is_header: row.is_header,
            },
        )
    }

    fn header_row(&self) -> Row {
        let style = self.style.header;
        let cell = |text: &str| Cell {
            style,
            lines: vec![text.to_string()],
        };
        Row {
            cells: [cell("Term"), cell("Description"), cell("Page")],
            is_header: true,
        }
    }

    fn entry_row(&self, entry: &crate::model::Entry) -> Row {
        let inner = |i: usize| self.style.columns[i] - 2.0 * self.style.cell_padding_x;
        Row {
            cells: [
                Cell {
                    style: self.style.term,
                    lines: wrap(&entry.term, &self.style.term, inner(0)),
                },
                Cell {
                    style: self.style.desc,
                    lines: wrap(&entry.desc, &self.style.desc, inner(1)),
                },
                Cell {
                    style: self.style.page,
                    lines: wrap(&entry.page, &self.style.page, inner(2)),
                },
            ],
            is_header: false,
        }
    }

    fn row_height(&self, row: &Row) -> f32 {
        let content = row
            .cells
            .iter()
            .map(|c| c.lines.len() as f32 * c.style.leading())
            .fold(0.0, f32::max);
        content + 2.0 * self.style.cell_padding_y
    }

    /// Height of a row holding a single line of its tallest font.
    fn min_row_height(&self, row: &Row) -> f32 {
        let leading = row
            .cells
            .iter()
            .map(|c| c.style.leading())
            .fold(0.0, f32::max);
        leading + 2.0 * self.style.cell_padding_y
    }

    fn place_row(&mut self, row: &Row) {
        let height = self.row_height(row);
        let top = self.y;
        let mut x = self.table_x();

        if row.is_header {
            self.push(DrawOp::FillRect {
                x,
                y: top,
                width: self.style.table_width(),
                height,
                gray: self.style.header_gray,
            });
        }

        for (i, cell) in row.cells.iter().enumerate() {
            let width = self.style.columns[i];
            for (n, line) in cell.lines.iter().enumerate() {
                if line.is_empty() {
                    continue;
                }
                self.push(DrawOp::Text {
                    x: x + self.style.cell_padding_x,
                    y: top
                        + self.style.cell_padding_y
                        + cell.style.ascent()
                        + n as f32 * cell.style.leading(),
                    style: cell.style,
                    text: line.clone(),
                });
            }
            self.push(DrawOp::StrokeRect {
                x,
                y: top,
                width,
                height,
                gray: self.style.grid_gray,
                line_width: self.style.grid_width,
            });
            x += width;
        }

        self.y = top + height;
    }
}
