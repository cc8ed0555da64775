//! State behind the paginated payments list.

use payments_api::types::{Page, Payment, PaymentStatus};
use payments_api::{PageQuery, Paged};

use crate::payments::PaymentService;

pub const LOAD_ERROR: &str = "Failed to load payments";

/// What the list shows after a successful load.
///
/// `rows` is the server page after the client-side status filter.
/// `total_elements` and `total_pages` are the server's unfiltered totals;
/// they are not recomputed from `rows`.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentsView {
    pub rows: Vec<Payment>,
    pub page_number: i64,
    pub total_pages: i64,
    pub total_elements: i64,
    /// Rows the server returned for this page before filtering.
    pub page_row_count: usize,
}

impl PaymentsView {
    fn from_page(page: Page<Payment>, status: Option<&PaymentStatus>) -> Self {
        let page_row_count = page.content.len();
        let rows = match status {
            Some(status) => page
                .content
                .into_iter()
                .filter(|p| &p.status == status)
                .collect(),
            None => page.content,
        };
        Self {
            rows,
            page_number: page.page_number,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            page_row_count,
        }
    }

    /// Rows left on this page after filtering.
    pub fn filtered_count(&self) -> usize {
        self.rows.len()
    }
}

/// Drives the payments list: owns the page index and status filter and
/// re-fetches whenever either changes.
pub struct PaymentsListController<'a> {
    service: &'a PaymentService,
    page_size: u32,
    sort: Option<String>,
    current_page: u32,
    selected_status: Option<PaymentStatus>,
    loading: bool,
    error: Option<String>,
    view: Option<PaymentsView>,
}

impl<'a> PaymentsListController<'a> {
    pub fn new(service: &'a PaymentService, page_size: u32) -> Self {
        Self {
            service,
            page_size,
            sort: None,
            current_page: 0,
            selected_status: None,
            loading: false,
            error: None,
            view: None,
        }
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    /// Starting page and filter, applied by the first [`load`](Self::load).
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page;
        self
    }

    pub fn with_status(mut self, status: Option<PaymentStatus>) -> Self {
        self.selected_status = status.filter(|s| !s.as_str().is_empty());
        self
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn selected_status(&self) -> Option<&PaymentStatus> {
        self.selected_status.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn view(&self) -> Option<&PaymentsView> {
        self.view.as_ref()
    }

    fn query(&self) -> PageQuery {
        let query = PageQuery::default()
            .with_page(self.current_page)
            .with_size(self.page_size);
        match &self.sort {
            Some(sort) => query.with_sort(sort),
            None => query,
        }
    }

    /// Fetches the current page and applies the status filter to it.
    ///
    /// Failures are logged and turned into [`LOAD_ERROR`]; the view is
    /// cleared so a later load starts from an empty list.
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;

        match self.service.list(&self.query()).await {
            Ok(page) => {
                self.view = Some(PaymentsView::from_page(
                    page,
                    self.selected_status.as_ref(),
                ));
            }
            Err(e) => {
                tracing::error!("Failed to load payments page {}: {}", self.current_page, e);
                self.error = Some(LOAD_ERROR.to_string());
                self.view = None;
            }
        }
        self.loading = false;
    }

    /// Sets the status filter, returns to the first page, and reloads.
    pub async fn apply_filters(&mut self, status: Option<PaymentStatus>) {
        self.selected_status = status.filter(|s| !s.as_str().is_empty());
        self.current_page = 0;
        self.load().await;
    }

    /// Clears the status filter, returns to the first page, and reloads once.
    pub async fn reset_filters(&mut self) {
        self.selected_status = None;
        self.current_page = 0;
        self.load().await;
    }

    /// Moves to `page`, keeping the filter.
    pub async fn change_page(&mut self, page: u32) {
        self.current_page = page;
        self.load().await;
    }
}
