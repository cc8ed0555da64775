//! HTTP client for the payment gateway REST API.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use url::Url;

use crate::{
    query::{PageQuery, PaymentSearchQuery, Query, TotalQuery},
    types::{
        CardID, CreatePaymentCardRequest, CreatePaymentRequest, Order, OrderID, Page,
        PayOrderRequest, Payment, PaymentCard, PaymentID, PaymentStatus, UpdatePaymentCardRequest,
        UserID,
    },
    Error,
};

const PAYMENTS_PATH: &str = "/api/v1/payments";
const USERS_PATH: &str = "/api/v1/users";
const ORDERS_PATH: &str = "/api/v1/orders";

/// HTTP client for the payment gateway.
///
/// Every method issues exactly one request. There is no retry and no
/// request timeout; a transport failure is returned to the caller as-is.
#[derive(Clone)]
pub struct Client {
    /// Gateway base URL, without a trailing slash.
    base_api_url: String,
    http: reqwest::Client,
}

impl Client {
    /// Creates a client for the gateway at `base_url`.
    pub fn new(base_url: &str) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::transport("Failed to build HTTP client", e)
            })?;
        Ok(Self {
            base_api_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_api_url
    }

    fn get_url(&self, path: &str, query: Option<&dyn Query>) -> Result<Url, Error> {
        let url = Url::parse(format!("{}{}", &self.base_api_url, path).as_str()).map_err(|e| {
            tracing::error!("Invalid URL constructed: {}", e);
            Error::transport("Invalid URL", e)
        })?;
        Ok(match query {
            Some(query) => query.add_to_url(&url),
            None => url,
        })
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);
        self.http
            .request(method, url)
            .header("accept", "application/json, text/plain, */*")
    }

    /// Sends the request and returns the body of a successful response.
    async fn execute(&self, request: RequestBuilder) -> Result<String, Error> {
        let resp = request.send().await.map_err(|e| {
            tracing::error!("Failed to send request: {}", e);
            Error::transport("Failed to send request", e)
        })?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| {
            tracing::error!("Failed to read response body: {}", e);
            Error::transport("Failed to read response body", e)
        })?;

        if !status.is_success() {
            let snippet = truncate_body(&body);
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                body: snippet,
            });
        }

        Ok(body)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, Error> {
        let body = self.execute(request).await?;
        serde_json::from_str::<T>(&body).map_err(|e| {
            let snippet = truncate_body(&body);
            tracing::error!("Failed to parse resource: {} | body: {}", e, snippet);
            Error::transport("Failed to parse resource", e)
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&dyn Query>,
    ) -> Result<T, Error> {
        let url = self.get_url(path, query)?;
        self.send(self.request(Method::GET, url)).await
    }

    /// Like [`Client::get`], but a 404 becomes [`Error::NotFound`].
    async fn get_by_id<T: DeserializeOwned>(
        &self,
        resource: &'static str,
        path: &str,
        id: i64,
    ) -> Result<T, Error> {
        match self.get(path, None).await {
            Err(Error::HttpStatus { status, .. }) if status == StatusCode::NOT_FOUND.as_u16() => {
                Err(Error::NotFound { resource, id })
            }
            other => other,
        }
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        query: Option<&dyn Query>,
        body: Option<&B>,
    ) -> Result<T, Error>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = self.get_url(path, query)?;
        let mut request = self.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }
        self.send(request).await
    }

    // -- Payments --

    /// Fetches one page of payments. Only the paging fields set on `query` are sent.
    pub async fn get_payments(&self, query: &PageQuery) -> Result<Page<Payment>, Error> {
        self.get(PAYMENTS_PATH, Some(query)).await
    }

    /// Fetches a single payment by id.
    pub async fn get_payment(&self, id: PaymentID) -> Result<Payment, Error> {
        self.get_by_id("payment", &format!("{}/{}", PAYMENTS_PATH, id), id)
            .await
    }

    pub async fn get_payments_by_user(&self, user_id: UserID) -> Result<Vec<Payment>, Error> {
        self.get(&format!("{}/user/{}", PAYMENTS_PATH, user_id), None)
            .await
    }

    pub async fn get_payments_by_order(&self, order_id: OrderID) -> Result<Vec<Payment>, Error> {
        self.get(&format!("{}/order/{}", PAYMENTS_PATH, order_id), None)
            .await
    }

    pub async fn get_payments_by_status(
        &self,
        status: &PaymentStatus,
    ) -> Result<Vec<Payment>, Error> {
        let mut url = self.get_url(&format!("{}/status", PAYMENTS_PATH), None)?;
        url.path_segments_mut()
            .map_err(|_| {
                tracing::error!("Base URL cannot carry a path: {}", self.base_api_url);
                Error::transport("Invalid URL", "base URL cannot be a base")
            })?
            .push(status.as_str());
        self.send(self.request(Method::GET, url)).await
    }

    /// Searches payments by whichever criteria are set.
    pub async fn search_payments(
        &self,
        query: &PaymentSearchQuery,
    ) -> Result<Vec<Payment>, Error> {
        self.get(&format!("{}/search", PAYMENTS_PATH), Some(query))
            .await
    }

    /// Sum of all payments in the window.
    pub async fn get_total(&self, query: &TotalQuery) -> Result<f64, Error> {
        self.get(&format!("{}/total", PAYMENTS_PATH), Some(query))
            .await
    }

    /// Sum of one user's payments in the window.
    pub async fn get_user_total(&self, user_id: UserID, query: &TotalQuery) -> Result<f64, Error> {
        self.get(
            &format!("{}/user/{}/total", PAYMENTS_PATH, user_id),
            Some(query),
        )
        .await
    }

    pub async fn create_payment(&self, request: &CreatePaymentRequest) -> Result<Payment, Error> {
        self.send_json(Method::POST, PAYMENTS_PATH, None, Some(request))
            .await
    }

    /// Submits payment for an order.
    pub async fn pay_order(&self, request: &PayOrderRequest) -> Result<Payment, Error> {
        self.send_json(
            Method::POST,
            &format!("{}/pay", PAYMENTS_PATH),
            None,
            Some(request),
        )
        .await
    }

    // -- Payment cards --

    pub async fn get_cards(&self, user_id: UserID) -> Result<Vec<PaymentCard>, Error> {
        self.get(&cards_path(user_id), None).await
    }

    pub async fn get_cards_paged(
        &self,
        user_id: UserID,
        query: &PageQuery,
    ) -> Result<Page<PaymentCard>, Error> {
        self.get(&format!("{}/paged", cards_path(user_id)), Some(query))
            .await
    }

    pub async fn create_card(
        &self,
        user_id: UserID,
        request: &CreatePaymentCardRequest,
    ) -> Result<PaymentCard, Error> {
        self.send_json(Method::POST, &cards_path(user_id), None, Some(request))
            .await
    }

    pub async fn update_card(
        &self,
        user_id: UserID,
        card_id: CardID,
        request: &UpdatePaymentCardRequest,
    ) -> Result<PaymentCard, Error> {
        self.send_json(
            Method::PUT,
            &format!("{}/{}", cards_path(user_id), card_id),
            None,
            Some(request),
        )
        .await
    }

    /// Activates or deactivates a card.
    pub async fn update_card_status(
        &self,
        user_id: UserID,
        card_id: CardID,
        active: bool,
    ) -> Result<PaymentCard, Error> {
        let mut url = self.get_url(&format!("{}/{}/status", cards_path(user_id), card_id), None)?;
        url.query_pairs_mut()
            .append_pair("active", if active { "true" } else { "false" });
        self.send(self.request(Method::PATCH, url)).await
    }

    pub async fn delete_card(&self, user_id: UserID, card_id: CardID) -> Result<(), Error> {
        let url = self.get_url(&format!("{}/{}", cards_path(user_id), card_id), None)?;
        self.execute(self.request(Method::DELETE, url)).await?;
        Ok(())
    }

    // -- Orders --

    /// Fetches a single order by id.
    pub async fn get_order(&self, id: OrderID) -> Result<Order, Error> {
        self.get_by_id("order", &format!("{}/{}", ORDERS_PATH, id), id)
            .await
    }

    pub async fn get_orders(&self, query: &PageQuery) -> Result<Page<Order>, Error> {
        self.get(ORDERS_PATH, Some(query)).await
    }

    pub async fn get_orders_by_user(&self, user_id: UserID) -> Result<Vec<Order>, Error> {
        self.get(&format!("{}/user/{}", ORDERS_PATH, user_id), None)
            .await
    }
}

fn cards_path(user_id: UserID) -> String {
    format!("{}/{}/payment-cards", USERS_PATH, user_id)
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 2000;
    if body.len() <= MAX {
        body.to_string()
    } else {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
