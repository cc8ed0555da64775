//! Shared query infrastructure: the [`Query`] and [`Paged`] traits, [`QueryCommon`]
//! paging fields, and the generic [`PageQuery`].

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use url::Url;

/// Trait implemented by all query builders.
///
/// Implementations only append parameters that were explicitly set. Paging
/// defaults are the server's business.
pub trait Query {
    /// Appends this query's parameters to the given URL, returning the modified URL.
    fn add_to_url(&self, url: &Url) -> Url;
}

/// Builder methods shared by every query that pages through a collection.
pub trait Paged: Query {
    /// Returns a mutable reference to the common paging fields.
    fn get_common(&mut self) -> &mut QueryCommon;

    /// Sets the page index (0-indexed).
    fn with_page(mut self, page: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().page = Some(page);
        self
    }

    /// Sets the number of results per page.
    fn with_size(mut self, size: u32) -> Self
    where
        Self: Sized,
    {
        self.get_common().size = Some(size);
        self
    }

    /// Sets a raw sort expression, e.g. `paymentDate,desc`.
    fn with_sort(mut self, sort: &str) -> Self
    where
        Self: Sized,
    {
        self.get_common().sort = Some(sort.to_string());
        self
    }

    /// Sorts by `field` in the given direction.
    fn with_sort_by(self, field: &str, direction: SortDirection) -> Self
    where
        Self: Sized,
    {
        self.with_sort(&format!("{},{}", field, direction))
    }
}

/// Sort order for API results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => write!(f, "asc"),
            SortDirection::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err(()),
        }
    }
}

/// Paging fields. `None` means the parameter is not sent at all.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryCommon {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl QueryCommon {
    /// Appends the paging parameters that are present to the URL.
    pub fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if let Some(page) = self.page {
            url.query_pairs_mut().append_pair("page", &page.to_string());
        }
        if let Some(size) = self.size {
            url.query_pairs_mut().append_pair("size", &size.to_string());
        }
        if let Some(sort) = self.sort.as_deref().filter(|s| !s.is_empty()) {
            url.query_pairs_mut().append_pair("sort", sort);
        }
        url
    }
}

/// A page request plus free-form filters, used by every paginated listing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageQuery {
    pub common: QueryCommon,
    pub filters: BTreeMap<String, String>,
}

impl Query for PageQuery {
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        for (name, value) in &self.filters {
            url.query_pairs_mut().append_pair(name, value);
        }
        url
    }
}

impl Paged for PageQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
}

impl PageQuery {
    /// Adds (or replaces) a named filter.
    pub fn with_filter(mut self, name: &str, value: &str) -> Self {
        self.filters.insert(name.to_string(), value.to_string());
        self
    }
}
