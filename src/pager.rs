//! Page-by-page access to raw trip rows.

use crate::table::{TripRecord, TripTable};

pub const PAGE_SIZE: usize = 5;

/// Yields consecutive slices of at most `page_size` rows.
#[derive(Debug, Clone)]
pub struct RawPager<'a> {
    rows: &'a [TripRecord],
    offset: usize,
    page_size: usize,
}

impl<'a> RawPager<'a> {
    pub fn new(table: &'a TripTable) -> Self {
        Self::with_page_size(table, PAGE_SIZE)
    }

    pub fn with_page_size(table: &'a TripTable, page_size: usize) -> Self {
        RawPager {
            rows: table.rows(),
            offset: 0,
            page_size: page_size.max(1),
        }
    }

    /// Index of the first row of the next page.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_exhausted(&self) -> bool {
        self.offset >= self.rows.len()
    }
}

impl<'a> Iterator for RawPager<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            return None;
        }
        let end = (self.offset + self.page_size).min(self.rows.len());
        let page = &self.rows[self.offset..end];
        self.offset = end;
        Some(page)
    }
}
