use serde::Deserialize;

/// One page of a paginated listing endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Page<T> {
    /// Total number of matching rows across all pages.
    pub count: u64,
    /// Link to the next page, if any.
    #[serde(default)]
    pub next: Option<String>,
    /// Link to the previous page, if any.
    #[serde(default)]
    pub previous: Option<String>,
    /// Rows on this page.
    pub results: Vec<T>,
}

impl<T> Page<T> {
    /// Returns the first row of the page.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.results.first()
    }
}
