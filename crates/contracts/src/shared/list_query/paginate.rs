use serde::{Deserialize, Serialize};

/// One page of a larger collection, in the shape the paged backend
/// endpoints return it.
///
/// `content.len() <= size` and `total_pages == ceil(total_elements / size)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_elements: usize,
    pub total_pages: usize,
    /// Zero-based page index.
    pub number: usize,
    pub size: usize,
}

/// Body of the server-paged list endpoints.
pub type PageResponse<T> = Page<T>;

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            content: Vec::new(),
            total_elements: 0,
            total_pages: 0,
            number: 0,
            size: 0,
        }
    }
}

impl<T> Page<T> {
    /// Build page `number` of an already-filtered, already-sorted list.
    pub fn from_slice(items: &[T], number: usize, size: usize) -> Self
    where
        T: Clone,
    {
        Self {
            content: paginate(items, number, size),
            total_elements: items.len(),
            total_pages: total_pages(items.len(), size),
            number,
            size,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.number > 0
    }

    /// 1-based index of the first row on this page, 0 for an empty page.
    pub fn first_row(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.number * self.size + 1
        }
    }

    pub fn last_row(&self) -> usize {
        if self.content.is_empty() {
            0
        } else {
            self.number * self.size + self.content.len()
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            content: self.content.into_iter().map(f).collect(),
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            number: self.number,
            size: self.size,
        }
    }
}

/// `ceil(total / page_size)`, 0 when `page_size` is 0.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        0
    } else {
        total.div_ceil(page_size)
    }
}

fn page_bounds(len: usize, page: usize, page_size: usize) -> Option<(usize, usize)> {
    let start = page.checked_mul(page_size)?;
    if page_size == 0 || start >= len {
        return None;
    }
    Some((start, start.saturating_add(page_size).min(len)))
}

/// Zero-based page slice `[page * size, page * size + size)`. Pages past the
/// end are empty.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    match page_bounds(items.len(), page, page_size) {
        Some((start, end)) => items[start..end].to_vec(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_23_items_by_10() {
        let items: Vec<u32> = (0..23).collect();
        let lens: Vec<_> = (0..4).map(|p| paginate(&items, p, 10).len()).collect();
        assert_eq!(lens, vec![10, 10, 3, 0]);
        assert_eq!(total_pages(items.len(), 10), 3);
    }

    #[test]
    fn test_pages_reconstruct_list() {
        for size in 1..8 {
            let items: Vec<u32> = (0..17).collect();
            let mut rebuilt = Vec::new();
            for page in 0..total_pages(items.len(), size) {
                rebuilt.extend(paginate(&items, page, size));
            }
            assert_eq!(rebuilt, items, "page size {size}");
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let empty: Vec<u32> = Vec::new();
        assert!(paginate(&empty, 0, 10).is_empty());
        assert!(paginate(&[1, 2, 3], 0, 0).is_empty());
        assert!(paginate(&[1, 2, 3], usize::MAX, 2).is_empty());
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(5, 0), 0);
    }

    #[test]
    fn test_page_from_slice_metadata() {
        let items: Vec<u32> = (0..23).collect();
        let page = Page::from_slice(&items, 2, 10);
        assert_eq!(page.content, vec![20, 21, 22]);
        assert_eq!(page.total_elements, 23);
        assert_eq!(page.total_pages, 3);
        assert_eq!((page.first_row(), page.last_row()), (21, 23));
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_page_wire_shape() {
        let json = serde_json::json!({
            "content": ["a", "b"],
            "totalElements": 12,
            "totalPages": 6,
            "number": 0,
            "size": 2
        });
        let page: Page<String> = serde_json::from_value(json).unwrap();
        assert_eq!(page.total_pages, 6);
        assert!(page.has_next());
    }
}
