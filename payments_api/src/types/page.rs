use serde::{Deserialize, Serialize};

/// One slice of a server-paginated collection, in the Spring Data layout.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub total_pages: i64,
    pub total_elements: i64,
    #[serde(rename = "number", alias = "pageNumber", default)]
    pub page_number: i64,
    #[serde(default)]
    pub size: Option<i64>,
}

impl<T> Page<T> {
    /// True when there is a page after this one.
    pub fn has_next(&self) -> bool {
        self.page_number + 1 < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 0
    }
}
