//! In-memory search and pagination over a bulk-fetched page of records.
//!
//! The archive pages fetch up to one server page of rows once and then
//! filter, paginate and remove entirely client-side. [`ListState`] holds that
//! state for any record type; the record only has to say which of its
//! fields are searchable.

/// Projection of a record onto its id and its searchable text fields.
pub trait Searchable {
    fn record_id(&self) -> i64;

    /// Fields matched (case-insensitively, by substring) against the search text.
    fn search_fields(&self) -> Vec<&str>;

    fn matches(&self, needle_lower: &str) -> bool {
        needle_lower.is_empty()
            || self
                .search_fields()
                .iter()
                .any(|f| f.to_lowercase().contains(needle_lower))
    }
}

/// Page sizes offered by the list toolbar.
pub const PAGE_SIZE_OPTIONS: &[usize] = &[5, 10, 25, 50];

pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Filter and page state of one list.
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    items: Vec<T>,
    search: String,
    page: usize,
    page_size: usize,
    /// Locally tracked total. Seeded from the fetch and decremented on
    /// removal; never re-derived from server pagination metadata.
    total: usize,
}

/// The derived page shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ListView<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_filtered: usize,
    pub total_pages: usize,
    /// 1-based index of the first row on the page, 0 when empty.
    pub start: usize,
    /// 1-based index of the last row on the page, 0 when empty.
    pub end: usize,
    pub total: usize,
}

impl<T> ListView<T> {
    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// "Showing 1-10 of 12 filtered (40 total)" style label.
    pub fn summary(&self) -> String {
        if self.total_filtered == 0 {
            return format!("No matching records ({} total)", self.total);
        }
        format!(
            "Showing {}-{} of {} filtered ({} total)",
            self.start, self.end, self.total_filtered, self.total
        )
    }
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            search: String::new(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
            total: 0,
        }
    }
}

fn pages_for(len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    len.div_ceil(page_size).max(1)
}

impl<T: Searchable + Clone> ListState<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        let total = items.len();
        Self {
            items,
            page_size: page_size.max(1),
            total,
            ..Self::default()
        }
    }

    /// Replace the source records after a fetch. Search text is kept, the
    /// page resets to 1.
    pub fn replace_items(&mut self, items: Vec<T>, total: Option<usize>) {
        self.total = total.unwrap_or(items.len()).max(items.len());
        self.items = items;
        self.page = 1;
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.search = search.into();
        self.page = 1;
    }

    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
        self.page = 1;
    }

    /// Move to `page`, clamped to the filtered page range.
    pub fn set_page(&mut self, page: usize) {
        let last = pages_for(self.filtered_len(), self.page_size);
        self.page = page.clamp(1, last);
    }

    fn needle(&self) -> String {
        self.search.trim().to_lowercase()
    }

    fn filtered_len(&self) -> usize {
        let needle = self.needle();
        self.items.iter().filter(|r| r.matches(&needle)).count()
    }

    /// Recompute the visible page from items, search text, page and page size.
    pub fn view(&self) -> ListView<T> {
        let needle = self.needle();
        let filtered: Vec<&T> = self.items.iter().filter(|r| r.matches(&needle)).collect();
        let total_filtered = filtered.len();
        let total_pages = pages_for(total_filtered, self.page_size);
        let page = self.page.clamp(1, total_pages);

        let offset = (page - 1) * self.page_size;
        let items: Vec<T> = filtered
            .into_iter()
            .skip(offset)
            .take(self.page_size)
            .cloned()
            .collect();
        let (start, end) = if items.is_empty() {
            (0, 0)
        } else {
            (offset + 1, offset + items.len())
        };

        ListView {
            items,
            page,
            page_size: self.page_size,
            total_filtered,
            total_pages,
            start,
            end,
            total: self.total,
        }
    }

    /// Drop a record after it was restored or deleted server-side.
    ///
    /// Decrements the tracked total, and steps back one page when the
    /// current non-first page no longer has any rows.
    pub fn remove(&mut self, id: i64) -> Option<T> {
        let pos = self.items.iter().position(|r| r.record_id() == id)?;
        let removed = self.items.remove(pos);
        self.total = self.total.saturating_sub(1);

        if self.page > 1 && (self.page - 1) * self.page_size >= self.filtered_len() {
            self.page -= 1;
        }
        Some(removed)
    }
}
