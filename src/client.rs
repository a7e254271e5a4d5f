//! Typed client SDK
//!
//! Request wrappers over every gateway endpoint, for UI code and scripting.
//! Mutating calls require a user id, sent as the `X-User-Id` identity
//! header.

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::order::{NewOrder, Order};
use crate::product::{NewProduct, Product, ProductPatch};

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message} (HTTP {status}): {detail}")]
    Api {
        status: StatusCode,
        message: String,
        detail: String,
    },
}

#[derive(Debug, serde::Deserialize)]
struct WireError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    error: String,
}

pub struct TradepostClient {
    http: reqwest::Client,
    base_url: String,
    user_id: Option<String>,
}

impl TradepostClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            user_id: None,
        }
    }

    /// Act as `user_id` for mutating calls.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{path}", self.base_url.trim_end_matches('/'));
        let mut request = self.http.request(method, url);
        if let Some(ref user_id) = self.user_id {
            request = request.header("X-User-Id", user_id);
        }
        request
    }

    async fn run<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let wire = response.json::<WireError>().await.unwrap_or(WireError {
                message: "request failed".to_string(),
                error: String::new(),
            });
            return Err(ClientError::Api {
                status,
                message: wire.message,
                detail: wire.error,
            });
        }
        Ok(response.json().await?)
    }

    // --- Products ---

    pub async fn list_products(&self) -> Result<Vec<Product>, ClientError> {
        Self::run(self.request(Method::GET, "/api/products")).await
    }

    pub async fn get_product(&self, id: &str) -> Result<Product, ClientError> {
        Self::run(self.request(Method::GET, &format!("/api/products/{id}"))).await
    }

    pub async fn create_product(&self, input: &NewProduct) -> Result<Product, ClientError> {
        Self::run(self.request(Method::POST, "/api/products").json(input)).await
    }

    pub async fn update_product(
        &self,
        id: &str,
        patch: &ProductPatch,
    ) -> Result<Product, ClientError> {
        Self::run(
            self.request(Method::PUT, &format!("/api/products/{id}"))
                .json(patch),
        )
        .await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), ClientError> {
        let _: serde_json::Value =
            Self::run(self.request(Method::DELETE, &format!("/api/products/{id}"))).await?;
        Ok(())
    }

    // --- Orders ---

    pub async fn list_orders(&self, user_id: Option<&str>) -> Result<Vec<Order>, ClientError> {
        let mut request = self.request(Method::GET, "/api/orders");
        if let Some(user_id) = user_id {
            request = request.query(&[("userId", user_id)]);
        }
        Self::run(request).await
    }

    pub async fn get_order(&self, id: &str) -> Result<Order, ClientError> {
        Self::run(self.request(Method::GET, &format!("/api/orders/{id}"))).await
    }

    pub async fn create_order(&self, input: &NewOrder) -> Result<Order, ClientError> {
        Self::run(self.request(Method::POST, "/api/orders").json(input)).await
    }

    pub async fn update_order_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<Order, ClientError> {
        Self::run(
            self.request(Method::PUT, &format!("/api/orders/{id}/status"))
                .json(&serde_json::json!({ "status": status })),
        )
        .await
    }
}
