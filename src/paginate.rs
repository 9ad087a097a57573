// src/paginate.rs
//! Page/limit parsing and slicing over an already-deduplicated job list.

pub const DEFAULT_PAGE: usize = 1;
pub const DEFAULT_LIMIT: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based.
    pub page: usize,
    /// Always positive.
    pub limit: usize,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Lenient parse: missing, unparsable or non-positive values fall back to defaults.
    pub fn parse(page: Option<&str>, limit: Option<&str>) -> Self {
        Self {
            page: parse_positive(page).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(limit).unwrap_or(DEFAULT_LIMIT),
        }
    }

    pub fn new(page: usize, limit: usize) -> Self {
        Self {
            page: page.max(1),
            limit: if limit == 0 { DEFAULT_LIMIT } else { limit },
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .filter(|&n| n > 0)
        .and_then(|n| usize::try_from(n).ok())
}

/// `ceil(total / limit)`.
pub fn total_pages(total: usize, limit: usize) -> usize {
    total.div_ceil(limit.max(1))
}

/// The `[(page-1)*limit, page*limit)` window, clamped to the slice bounds.
pub fn page_slice<T>(items: &[T], req: PageRequest) -> &[T] {
    let start = req.page.saturating_sub(1).saturating_mul(req.limit);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(req.limit).min(items.len());
    &items[start..end]
}
