//! Remote tabular service client
//!
//! Speaks the hosted spreadsheet wire shape: bearer API key, a workspace
//! ("base") id in the path, records as `{id, fields, createdTime}`, and
//! `filterByFormula` for field-equality queries. Listing follows the
//! server's `offset` cursor until the table is exhausted, so callers always
//! see the full result set.

use reqwest::{Method, StatusCode};
use serde::Deserialize;

use super::{FieldEq, Fields, RawRecord, RecordStore, StoreError};

pub struct RestStore {
    http: reqwest::Client,
    endpoint: String,
    base_id: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    id: String,
    #[serde(default)]
    fields: Fields,
}

#[derive(Debug, Deserialize)]
struct WirePage {
    records: Vec<WireRecord>,
    offset: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: WireErrorDetail,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireErrorDetail {
    Message { message: String },
    Code(String),
}

impl From<WireRecord> for RawRecord {
    fn from(rec: WireRecord) -> Self {
        Self {
            id: rec.id,
            fields: rec.fields,
        }
    }
}

impl RestStore {
    pub fn new(endpoint: impl Into<String>, base_id: impl Into<String>, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: endpoint.into(),
            base_id: base_id.into(),
            api_key,
        }
    }

    fn url(&self, table: &str) -> String {
        format!(
            "{}/{}/{}",
            self.endpoint.trim_end_matches('/'),
            self.base_id,
            table
        )
    }

    fn request(&self, method: Method, url: &str) -> reqwest::RequestBuilder {
        self.http.request(method, url).bearer_auth(&self.api_key)
    }

    /// Map a non-success response into a `StoreError`, surfacing the
    /// service's own message when it sends one.
    async fn into_error(response: reqwest::Response) -> StoreError {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return StoreError::NotFound;
        }
        let message = match response.json::<WireError>().await {
            Ok(WireError {
                error: WireErrorDetail::Message { message },
            }) => message,
            Ok(WireError {
                error: WireErrorDetail::Code(code),
            }) => code,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        StoreError::Api {
            status: status.as_u16(),
            message,
        }
    }

    async fn record_response(response: reqwest::Response) -> Result<RawRecord, StoreError> {
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(response.json::<WireRecord>().await?.into())
    }
}

/// Render a field-equality filter as the service's formula syntax.
fn formula_eq(filter: &FieldEq) -> String {
    format!("{{{}}} = '{}'", filter.field, filter.value.replace('\'', "\\'"))
}

#[async_trait::async_trait]
impl RecordStore for RestStore {
    async fn find(&self, table: &str, id: &str) -> Result<RawRecord, StoreError> {
        let url = format!("{}/{}", self.url(table), id);
        let response = self.request(Method::GET, &url).send().await?;
        Self::record_response(response).await
    }

    async fn list(
        &self,
        table: &str,
        filter: Option<&FieldEq>,
    ) -> Result<Vec<RawRecord>, StoreError> {
        let url = self.url(table);
        let formula = filter.map(formula_eq);

        let mut records = Vec::new();
        let mut offset: Option<String> = None;
        loop {
            let mut request = self.request(Method::GET, &url);
            if let Some(ref formula) = formula {
                request = request.query(&[("filterByFormula", formula.as_str())]);
            }
            if let Some(ref cursor) = offset {
                request = request.query(&[("offset", cursor.as_str())]);
            }

            let response = request.send().await?;
            if !response.status().is_success() {
                return Err(Self::into_error(response).await);
            }

            let page: WirePage = response.json().await?;
            records.extend(page.records.into_iter().map(RawRecord::from));
            match page.offset {
                Some(cursor) => offset = Some(cursor),
                None => break,
            }
        }
        Ok(records)
    }

    async fn create(&self, table: &str, fields: Fields) -> Result<RawRecord, StoreError> {
        let response = self
            .request(Method::POST, &self.url(table))
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;
        Self::record_response(response).await
    }

    async fn update(
        &self,
        table: &str,
        id: &str,
        fields: Fields,
    ) -> Result<RawRecord, StoreError> {
        let url = format!("{}/{}", self.url(table), id);
        // PATCH merges into the existing record; PUT would clear unset fields.
        let response = self
            .request(Method::PATCH, &url)
            .json(&serde_json::json!({ "fields": fields }))
            .send()
            .await?;
        Self::record_response(response).await
    }

    async fn destroy(&self, table: &str, id: &str) -> Result<(), StoreError> {
        let url = format!("{}/{}", self.url(table), id);
        let response = self.request(Method::DELETE, &url).send().await?;
        if !response.status().is_success() {
            return Err(Self::into_error(response).await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formula_quotes_field_and_value() {
        let filter = FieldEq::new("buyerId", "user-1");
        assert_eq!(formula_eq(&filter), "{buyerId} = 'user-1'");
    }

    #[test]
    fn formula_escapes_single_quotes() {
        let filter = FieldEq::new("sellerId", "o'brien");
        assert_eq!(formula_eq(&filter), "{sellerId} = 'o\\'brien'");
    }
}
