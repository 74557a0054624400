/// Number of entries served per page.
pub const PAGE_SIZE: usize = 10;

/// A requested page number, normalized to be 1-based and positive.
///
/// Clients send page numbers as free-form query values; absent or
/// non-positive values fall back to the first page instead of wrapping
/// around the end of the collection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest(usize);

impl PageRequest {
    /// Creates a page request; values below 1 are clamped to 1.
    #[must_use]
    pub fn new(page: i64) -> Self {
        if page < 1 {
            Self(1)
        } else {
            // page >= 1, conversion cannot fail on 64-bit targets
            Self(usize::try_from(page).unwrap_or(usize::MAX))
        }
    }

    /// Creates a page request from an optional raw value; absent means page 1.
    #[must_use]
    pub fn from_raw(raw: Option<i64>) -> Self {
        raw.map_or(Self(1), Self::new)
    }

    #[must_use]
    pub fn number(&self) -> usize {
        self.0
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self(1)
    }
}

/// A bounded slice of an ordered collection plus the collection's total size.
///
/// Computed fresh on every request; never cached. An empty page signals
/// "no more pages", which callers may or may not treat as not-found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: usize,
}

impl<T> Page<T> {
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Size of the full unpaginated collection, independent of the page.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Slice `items` down to the requested page.
///
/// `start = (page - 1) * page_size`; a start beyond the collection yields an
/// empty page rather than an error. Pure function over its inputs.
#[must_use]
pub fn paginate<T>(items: Vec<T>, request: PageRequest, page_size: usize) -> Page<T> {
    let total = items.len();
    let start = (request.number() - 1).saturating_mul(page_size);
    let page_items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items: page_items,
        total,
    }
}
