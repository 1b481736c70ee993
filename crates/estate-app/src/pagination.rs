// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageSize {
    #[default]
    Five,
    Ten,
    TwentyFive,
}

impl PageSize {
    pub const ALL: [Self; 3] = [Self::Five, Self::Ten, Self::TwentyFive];

    pub const fn rows(self) -> usize {
        match self {
            Self::Five => 5,
            Self::Ten => 10,
            Self::TwentyFive => 25,
        }
    }

    pub fn from_rows(rows: usize) -> Option<Self> {
        match rows {
            5 => Some(Self::Five),
            10 => Some(Self::Ten),
            25 => Some(Self::TwentyFive),
            _ => None,
        }
    }

    /// Next larger size, wrapping to the smallest.
    pub fn next(self) -> Self {
        match self {
            Self::Five => Self::Ten,
            Self::Ten => Self::TwentyFive,
            Self::TwentyFive => Self::Five,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Five => Self::TwentyFive,
            Self::Ten => Self::Five,
            Self::TwentyFive => Self::Ten,
        }
    }
}

/// Contiguous window `[page * size, page * size + size)` of `records`,
/// clipped to the slice bounds.
pub fn apply_pagination<T>(records: &[T], page: usize, page_size: PageSize) -> &[T] {
    let size = page_size.rows();
    let start = page.saturating_mul(size);
    if start >= records.len() {
        return &[];
    }
    let end = start.saturating_add(size).min(records.len());
    &records[start..end]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Pagination {
    page: usize,
    size: PageSize,
}

impl Pagination {
    pub fn new(size: PageSize) -> Self {
        Self { page: 0, size }
    }

    pub fn page(self) -> usize {
        self.page
    }

    pub fn size(self) -> PageSize {
        self.size
    }

    pub fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    // Keeps the current page index even if it now points past the end.
    pub fn set_page_size(&mut self, size: PageSize) {
        self.size = size;
    }

    pub fn slice<'a, T>(&self, records: &'a [T]) -> &'a [T] {
        apply_pagination(records, self.page, self.size)
    }

    pub fn page_count(self, total: usize) -> usize {
        total.div_ceil(self.size.rows())
    }

    pub fn has_prev(self) -> bool {
        self.page > 0
    }

    pub fn has_next(self, total: usize) -> bool {
        self.page.saturating_add(1) < self.page_count(total)
    }

    /// Displayed-rows label such as `6–10 of 13`.
    pub fn range_label(self, total: usize) -> String {
        let size = self.size.rows();
        let start = self.page.saturating_mul(size);
        if start >= total {
            return format!("0–0 of {total}");
        }
        let end = start.saturating_add(size).min(total);
        format!("{}–{} of {}", start + 1, end, total)
    }
}
