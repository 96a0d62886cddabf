use std::cmp::min;

use crate::models::Book;

/// All state required to render and scroll through an opened book. Rows are
/// flattened up front so the draw code only ever slices a `Vec`.
pub(crate) struct ReaderScreen {
    pub(crate) book: Book,
    pub(crate) rows: Vec<ReaderRow>,
    /// Row index where each page starts, in page order.
    page_offsets: Vec<usize>,
    pub(crate) page_count: usize,
    pub(crate) scroll: u16,
}

/// Row rendered in the reader (either a page heading or a line of text).
pub(crate) struct ReaderRow {
    pub(crate) kind: ReaderRowKind,
    pub(crate) text: String,
}

#[derive(PartialEq, Eq)]
pub(crate) enum ReaderRowKind {
    Heading,
    Body,
}

impl ReaderScreen {
    pub(crate) fn new(book: Book, pages: Vec<String>) -> Self {
        let page_count = pages.len();
        let mut rows = Vec::new();
        let mut page_offsets = Vec::with_capacity(page_count);

        for (idx, page) in pages.iter().enumerate() {
            page_offsets.push(rows.len());
            rows.push(ReaderRow {
                kind: ReaderRowKind::Heading,
                text: format!("Page {}", idx + 1),
            });

            if page.is_empty() {
                rows.push(ReaderRow {
                    kind: ReaderRowKind::Body,
                    text: String::new(),
                });
            } else {
                for line in page.lines() {
                    rows.push(ReaderRow {
                        kind: ReaderRowKind::Body,
                        text: line.to_string(),
                    });
                }
            }

            if idx + 1 < page_count {
                rows.push(ReaderRow {
                    kind: ReaderRowKind::Body,
                    text: String::new(),
                });
            }
        }

        Self {
            book,
            rows,
            page_offsets,
            page_count,
            scroll: 0,
        }
    }

    pub(crate) fn scroll_by(&mut self, delta: isize) {
        let max_scroll = self.max_scroll() as isize;
        let mut new = self.scroll as isize + delta;
        if new < 0 {
            new = 0;
        }
        if new > max_scroll {
            new = max_scroll;
        }
        self.scroll = new as u16;
    }

    pub(crate) fn scroll_to_top(&mut self) {
        self.scroll = 0;
    }

    pub(crate) fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }

    /// Jump to the start of the next or previous page heading, clamped to the
    /// first and last page.
    pub(crate) fn jump_page(&mut self, direction: isize) {
        if self.page_offsets.is_empty() {
            return;
        }
        let current = self.current_page_index();
        let target = if direction < 0 {
            current.saturating_sub(1)
        } else {
            min(current + 1, self.page_offsets.len() - 1)
        };
        let offset = u16::try_from(self.page_offsets[target]).unwrap_or(u16::MAX);
        self.scroll = min(offset, self.max_scroll());
    }

    /// One-based number of the page at the top of the viewport, for the
    /// footer.
    pub(crate) fn current_page(&self) -> usize {
        self.current_page_index() + 1
    }

    /// Largest reachable scroll offset. The widget scrolls by `u16`, so row
    /// counts beyond that range saturate instead of wrapping.
    pub(crate) fn max_scroll(&self) -> u16 {
        u16::try_from(self.rows.len().saturating_sub(1)).unwrap_or(u16::MAX)
    }

    fn current_page_index(&self) -> usize {
        let scroll = self.scroll as usize;
        self.page_offsets
            .partition_point(|&offset| offset <= scroll)
            .saturating_sub(1)
    }
}
