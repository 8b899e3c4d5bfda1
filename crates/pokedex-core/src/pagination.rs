use std::ops::Range;

/// One page of a paginated listing, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView<T> {
    pub items: Vec<T>,
    pub current_page: usize,
    pub total_pages: usize,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> PageView<T> {
    /// Caption between the Previous/Next buttons.
    pub fn label(&self) -> String {
        format!("Page {} of {}", self.current_page, self.total_pages)
    }
}

/// Page cursor over a listing of known length.
///
/// Invariant: `1 <= current_page <= total_pages()`, where `total_pages()` is
/// never less than 1, even for an empty listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
    total_items: usize,
    current_page: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            total_items: 0,
            current_page: 1,
        }
    }

    /// Number of pages needed for `items` entries of `page_size` each (at least 1).
    pub fn pages_for(items: usize, page_size: usize) -> usize {
        items.div_ceil(page_size.max(1)).max(1)
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    pub fn total_pages(&self) -> usize {
        Self::pages_for(self.total_items, self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Record a new listing length and clamp the cursor into range.
    pub fn set_total(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.clamp();
    }

    /// Back to the first page.
    pub fn reset(&mut self) {
        self.current_page = 1;
    }

    /// Jump to `page`, clamped into `[1, total_pages]`.
    pub fn go_to(&mut self, page: usize) {
        self.current_page = page;
        self.clamp();
    }

    pub fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// Step forward. Returns `false` (and does nothing) on the last page.
    pub fn next(&mut self) -> bool {
        if !self.has_next() {
            return false;
        }
        self.current_page += 1;
        true
    }

    /// Step back. Returns `false` (and does nothing) on the first page.
    pub fn prev(&mut self) -> bool {
        if !self.has_prev() {
            return false;
        }
        self.current_page -= 1;
        true
    }

    /// Index range of the current page within the listing.
    pub fn range(&self) -> Range<usize> {
        let start = ((self.current_page - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// Build a page view from the full listing the cursor was sized for.
    pub fn view<T: Clone>(&self, items: &[T]) -> PageView<T> {
        let range = self.range();
        let range = range.start.min(items.len())..range.end.min(items.len());
        PageView {
            items: items[range].to_vec(),
            current_page: self.current_page,
            total_pages: self.total_pages(),
            has_prev: self.has_prev(),
            has_next: self.has_next(),
        }
    }

    fn clamp(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages());
    }
}
