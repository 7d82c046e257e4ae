/// Page size used when the caller gives none or an unusable one.
pub const DEFAULT_PAGE_LIMIT: u64 = 10;
/// Upper bound on a single page.
pub const MAX_PAGE_LIMIT: u64 = 100;

/// Ordering on product id
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Case-insensitive; anything other than "desc" sorts ascending.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("desc") {
            Self::Desc
        } else {
            Self::Asc
        }
    }
}

/// Paginated product query. `page` is zero-based.
#[derive(Debug, Clone)]
pub struct GetProductDto {
    pub sort: SortOrder,
    pub page: u64,
    pub limit: u64,
    /// Case-insensitive substring matched against the product name.
    pub search: String,
}

impl Default for GetProductDto {
    fn default() -> Self {
        Self {
            sort: SortOrder::Asc,
            page: 0,
            limit: DEFAULT_PAGE_LIMIT,
            search: String::new(),
        }
    }
}

impl GetProductDto {
    /// Builds a query from raw query-string values, falling back to the
    /// defaults for anything missing or unparsable.
    pub fn from_raw(
        sort: Option<&str>,
        page: Option<&str>,
        limit: Option<&str>,
        search: Option<&str>,
    ) -> Self {
        let page = page.and_then(|p| p.trim().parse::<u64>().ok()).unwrap_or(0);
        let limit = limit
            .and_then(|l| l.trim().parse::<u64>().ok())
            .filter(|l| *l > 0)
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .min(MAX_PAGE_LIMIT);

        Self {
            sort: sort.map(SortOrder::parse).unwrap_or_default(),
            page,
            limit,
            search: search.unwrap_or_default().to_string(),
        }
    }

    /// Row offset, capped so it always fits a signed 64-bit SQL bind.
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.limit).min(i64::MAX as u64)
    }
}
