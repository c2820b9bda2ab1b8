//! HTTP backend talking to plate-cloud

use super::OrderingBackend;
use crate::{ClientConfig, ClientError, ClientResult};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::error::ErrorCode;
use shared::{DiningTable, MenuItem, NewOrder, Order, Tenant};
use std::time::Duration;

/// Error body returned by the server
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    pub code: u16,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
}

/// Network backend
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let response = self.client.get(self.url(path)).send().await?;
        handle_response(response).await
    }

    /// GET where a specific not-found code means "absent" rather than failure
    async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
        not_found: ErrorCode,
    ) -> ClientResult<Option<T>> {
        match self.get(path).await {
            Ok(value) => Ok(Some(value)),
            Err(ClientError::Api { code, .. }) if code == not_found.code() => Ok(None),
            Err(e) => Err(e),
        }
    }
}

async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
    let status = response.status();
    if !status.is_success() {
        let text = response.text().await?;
        if let Ok(api_err) = serde_json::from_str::<ApiErrorResponse>(&text) {
            return Err(ClientError::Api {
                code: api_err.code,
                message: api_err.message,
                details: api_err.details,
            });
        }
        return match status {
            StatusCode::NOT_FOUND => Err(ClientError::InvalidResponse(format!(
                "unexpected 404: {text}"
            ))),
            _ => Err(ClientError::Backend(format!("{status}: {text}"))),
        };
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
}

#[async_trait]
impl OrderingBackend for HttpBackend {
    async fn find_tenants(&self, subdomain: &str) -> ClientResult<Vec<Tenant>> {
        let response = self
            .client
            .get(self.url("api/tenants"))
            .query(&[("subdomain", subdomain)])
            .send()
            .await?;
        handle_response(response).await
    }

    async fn active_menu_items(&self, tenant_id: &str) -> ClientResult<Vec<MenuItem>> {
        self.get(&format!("api/tenants/{tenant_id}/menu")).await
    }

    async fn find_table(
        &self,
        tenant_id: &str,
        table_id: i64,
    ) -> ClientResult<Option<DiningTable>> {
        self.get_optional(
            &format!("api/tenants/{tenant_id}/tables/{table_id}"),
            ErrorCode::TableNotFound,
        )
        .await
    }

    async fn insert_order(&self, order: &NewOrder) -> ClientResult<Order> {
        let response = self
            .client
            .post(self.url(&format!("api/tenants/{}/orders", order.tenant_id)))
            .json(order)
            .send()
            .await?;
        handle_response(response).await
    }

    async fn find_order(&self, tenant_id: &str, order_id: i64) -> ClientResult<Option<Order>> {
        self.get_optional(
            &format!("api/tenants/{tenant_id}/orders/{order_id}"),
            ErrorCode::OrderNotFound,
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slash() {
        let backend = HttpBackend::new(&ClientConfig::new("http://api.test/")).unwrap();
        assert_eq!(backend.base_url(), "http://api.test");
        assert_eq!(backend.url("/api/tenants"), "http://api.test/api/tenants");
    }

    #[test]
    fn test_error_body_shape() {
        let body = r#"{"code":7001,"message":"Table not found","details":{"table_id":9}}"#;
        let parsed: ApiErrorResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.code, ErrorCode::TableNotFound.code());
        assert!(parsed.details.is_some());
    }
}
