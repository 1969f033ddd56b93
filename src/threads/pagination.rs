pub const DEFAULT_PAGE_SIZE: usize = 5;

/// Which page of a list is visible. Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

/// One entry in a pagination control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMarker {
    Page(usize),
    Ellipsis,
}

impl PaginationWindow {
    pub fn new(item_count: usize, page_size: usize, current_page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = item_count.div_ceil(page_size);
        Self {
            current_page: current_page.clamp(1, total_pages.max(1)),
            page_size,
            total_pages,
        }
    }

    /// Highest page a control may offer; an empty list still has page 1.
    pub fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn contains(&self, page: usize) -> bool {
        (1..=self.last_page()).contains(&page)
    }

    /// Index range of the current page, clipped to `item_count`.
    pub fn range(&self, item_count: usize) -> std::ops::Range<usize> {
        let start = (self.current_page.saturating_sub(1) * self.page_size).min(item_count);
        let end = (start + self.page_size).min(item_count);
        start..end
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Pages a control shows: the first, the last and the neighbours of the
    /// current one, with an ellipsis over every gap.
    pub fn markers(&self) -> Vec<PageMarker> {
        let current = self.current_page;
        let shown: Vec<usize> = (1..=self.total_pages)
            .filter(|&page| {
                page == 1 || page == self.total_pages || page.abs_diff(current) <= 1
            })
            .collect();

        let mut markers = Vec::with_capacity(shown.len() * 2);
        let mut previous: Option<usize> = None;
        for page in shown {
            if previous.is_some_and(|p| p + 1 != page) {
                markers.push(PageMarker::Ellipsis);
            }
            markers.push(PageMarker::Page(page));
            previous = Some(page);
        }
        markers
    }
}
