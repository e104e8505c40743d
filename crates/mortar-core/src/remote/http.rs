//! REST client for the hosted pharmacy backend.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::{RemoteBackOffice, RemoteError, RemoteResult, RemoteStore};
use crate::config::RemoteConfig;
use crate::models::{
    Bulletin, Medicine, MedicineId, MedicinePatch, OrderId, OrderStatus, Payment, PaymentId,
    PurchaseOrder, Revenue, RevenueId, RevenuePatch,
};
use crate::util::compact_text;

/// `RemoteStore`/`RemoteBackOffice` over the backend's REST API.
///
/// No client-side timeout is configured; the transport surfaces its own
/// connect/read errors.
#[derive(Clone)]
pub struct HttpRemoteStore {
    config: RemoteConfig,
    client: reqwest::Client,
}

impl std::fmt::Debug for HttpRemoteStore {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("HttpRemoteStore")
            .field("base_url", &self.config.base_url)
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl HttpRemoteStore {
    /// Create a client for the given remote configuration
    pub fn new(config: RemoteConfig) -> RemoteResult<Self> {
        Ok(Self {
            config,
            client: reqwest::Client::builder().build()?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url)
    }

    async fn send(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let mut request = request.header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }
        Ok(response)
    }

    async fn send_unit(&self, request: RequestBuilder) -> RemoteResult<()> {
        self.send(request).await.map(drop)
    }

    async fn fetch_list<T: for<'de> Deserialize<'de>>(&self, path: &str) -> RemoteResult<Vec<T>> {
        let response = self.send(self.client.get(self.url(path))).await?;
        response
            .json::<Vec<T>>()
            .await
            .map_err(|error| RemoteError::InvalidPayload(error.to_string()))
    }
}

impl RemoteStore for HttpRemoteStore {
    async fn add_medicine(&self, medicine: &Medicine) -> RemoteResult<()> {
        self.send_unit(self.client.post(self.url("medicines")).json(medicine))
            .await
    }

    async fn update_medicine(&self, id: MedicineId, patch: &MedicinePatch) -> RemoteResult<()> {
        self.send_unit(
            self.client
                .patch(self.url(&format!("medicines/{id}")))
                .json(patch),
        )
        .await
    }

    async fn delete_medicine(&self, id: MedicineId) -> RemoteResult<()> {
        self.send_unit(self.client.delete(self.url(&format!("medicines/{id}"))))
            .await
    }

    async fn add_revenue(&self, revenue: &Revenue) -> RemoteResult<()> {
        self.send_unit(self.client.post(self.url("revenues")).json(revenue))
            .await
    }

    async fn update_revenue(&self, id: RevenueId, patch: &RevenuePatch) -> RemoteResult<()> {
        self.send_unit(
            self.client
                .patch(self.url(&format!("revenues/{id}")))
                .json(patch),
        )
        .await
    }

    async fn delete_revenue(&self, id: RevenueId) -> RemoteResult<()> {
        self.send_unit(self.client.delete(self.url(&format!("revenues/{id}"))))
            .await
    }

    async fn fetch_medicines(&self) -> RemoteResult<Vec<Medicine>> {
        self.fetch_list("medicines").await
    }

    async fn fetch_revenues(&self) -> RemoteResult<Vec<Revenue>> {
        self.fetch_list("revenues").await
    }
}

impl RemoteBackOffice for HttpRemoteStore {
    async fn add_payment(&self, payment: &Payment) -> RemoteResult<()> {
        self.send_unit(self.client.post(self.url("payments")).json(payment))
            .await
    }

    async fn settle_payment(&self, id: PaymentId) -> RemoteResult<()> {
        self.send_unit(
            self.client
                .patch(self.url(&format!("payments/{id}")))
                .json(&serde_json::json!({ "settled": true })),
        )
        .await
    }

    async fn fetch_payments(&self) -> RemoteResult<Vec<Payment>> {
        self.fetch_list("payments").await
    }

    async fn add_order(&self, order: &PurchaseOrder) -> RemoteResult<()> {
        self.send_unit(self.client.post(self.url("orders")).json(order))
            .await
    }

    async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> RemoteResult<()> {
        self.send_unit(
            self.client
                .patch(self.url(&format!("orders/{id}")))
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }

    async fn fetch_orders(&self) -> RemoteResult<Vec<PurchaseOrder>> {
        self.fetch_list("orders").await
    }

    async fn add_bulletin(&self, bulletin: &Bulletin) -> RemoteResult<()> {
        self.send_unit(self.client.post(self.url("bulletins")).json(bulletin))
            .await
    }

    async fn fetch_bulletins(&self) -> RemoteResult<Vec<Bulletin>> {
        self.fetch_list("bulletins").await
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: Option<String>,
    message: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ApiErrorBody>(body) {
        if let Some(message) = payload.message.or(payload.error) {
            return format!("{} ({})", message.trim(), status.as_u16());
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{} ({})", compact_text(trimmed), status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_error_prefers_message_field() {
        let rendered = parse_api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message":"name is required"}"#,
        );
        assert_eq!(rendered, "name is required (422)");
    }

    #[test]
    fn parse_api_error_falls_back_to_error_field_then_body() {
        let rendered = parse_api_error(StatusCode::BAD_REQUEST, r#"{"error":"bad shift"}"#);
        assert_eq!(rendered, "bad shift (400)");

        let rendered = parse_api_error(StatusCode::BAD_GATEWAY, "upstream exploded");
        assert_eq!(rendered, "upstream exploded (502)");

        let rendered = parse_api_error(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(rendered, "HTTP 500");
    }

    #[test]
    fn debug_redacts_api_key() {
        let config = crate::config::RemoteConfig::new(
            "https://api.example.com",
            Some("secret-key".to_string()),
        )
        .unwrap();
        let store = HttpRemoteStore::new(config).unwrap();
        let debug = format!("{store:?}");
        assert!(!debug.contains("secret-key"));
        assert!(debug.contains("[REDACTED]"));
    }
}
