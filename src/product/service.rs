//! Product service
//!
//! CRUD over product records. Owns price normalization and seller
//! attribution: `sellerId` is written once at creation and update/delete are
//! restricted to the owning seller.

use chrono::Utc;
use std::sync::Arc;

use super::models::{NewProduct, Product, ProductFields, ProductPatch, coerce_price};
use crate::error::ServiceError;
use crate::store::{RecordStore, decode_record, to_fields};

pub struct ProductService {
    store: Arc<dyn RecordStore>,
    table: String,
}

impl ProductService {
    pub fn new(store: Arc<dyn RecordStore>, table: impl Into<String>) -> Self {
        Self {
            store,
            table: table.into(),
        }
    }

    /// All products, no filtering or pagination.
    pub async fn list(&self) -> Result<Vec<Product>, ServiceError> {
        let records = self.store.list(&self.table, None).await?;
        records
            .into_iter()
            .map(|raw| decode_record(raw).map_err(ServiceError::from))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Product, ServiceError> {
        let raw = self
            .store
            .find(&self.table, id)
            .await
            .map_err(ServiceError::for_entity("product"))?;
        Ok(decode_record(raw)?)
    }

    /// Create a listing for `caller`. The supplied `sellerId` has to be the
    /// caller themselves; it is written once and never changed afterwards.
    pub async fn create(&self, caller: &str, input: NewProduct) -> Result<Product, ServiceError> {
        let missing =
            || ServiceError::invalid_input("name, price, and sellerId are required");

        let name = input
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or_else(missing)?;
        let price = coerce_price(input.price.as_ref().ok_or_else(missing)?)?;
        let seller_id = input
            .seller_id
            .filter(|s| !s.is_empty())
            .ok_or_else(missing)?;

        if seller_id != caller {
            return Err(ServiceError::Forbidden("product"));
        }

        let fields = ProductFields {
            name,
            description: input.description,
            price,
            image_url: input.image_url,
            seller_id,
            created_at: Some(Utc::now()),
            updated_at: None,
        };

        let raw = self.store.create(&self.table, to_fields(&fields)?).await?;
        tracing::info!(product_id = %raw.id, seller_id = %fields.seller_id, "product created");
        Ok(decode_record(raw)?)
    }

    /// Overwrite the caller-editable fields and refresh `updatedAt`.
    ///
    /// Only the owning seller may update. `sellerId` is never touched: the
    /// patch type has no such field, so whatever the caller sent is dropped
    /// before it gets here.
    pub async fn update(
        &self,
        caller: &str,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, ServiceError> {
        let existing = self.get(id).await?;
        if existing.fields.seller_id != caller {
            return Err(ServiceError::Forbidden("product"));
        }

        let mut fields = crate::store::Fields::new();
        if let Some(name) = patch.name {
            if name.trim().is_empty() {
                return Err(ServiceError::invalid_input("name must not be empty"));
            }
            fields.insert("name".into(), name.into());
        }
        if let Some(description) = patch.description {
            fields.insert("description".into(), description.into());
        }
        if let Some(price) = patch.price {
            let price = coerce_price(&price)?;
            fields.insert("price".into(), serde_json::to_value(price)?);
        }
        if let Some(image_url) = patch.image_url {
            fields.insert("imageUrl".into(), image_url.into());
        }
        fields.insert("updatedAt".into(), serde_json::to_value(Utc::now())?);

        let raw = self
            .store
            .update(&self.table, id, fields)
            .await
            .map_err(ServiceError::for_entity("product"))?;
        Ok(decode_record(raw)?)
    }

    /// Remove a product unconditionally; there is no check for orders still
    /// referencing it (order snapshots stay valid on their own). Repeat
    /// deletes fail with `NotFound`.
    pub async fn delete(&self, caller: &str, id: &str) -> Result<(), ServiceError> {
        let existing = self.get(id).await?;
        if existing.fields.seller_id != caller {
            return Err(ServiceError::Forbidden("product"));
        }

        self.store
            .destroy(&self.table, id)
            .await
            .map_err(ServiceError::for_entity("product"))?;
        tracing::info!(product_id = %id, "product deleted");
        Ok(())
    }
}
