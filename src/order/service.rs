//! Order service
//!
//! Creates orders by snapshotting product data at order time, lists orders
//! by participant (buyer or seller), and drives status transitions through
//! the lifecycle state machine.
//!
//! The store offers no multi-record transaction, so `create` is a
//! read-then-write against two tables. That race is closed with a
//! compensation step: after the order record is written the product is
//! re-read, and if it changed or vanished mid-flight the order is destroyed
//! and the call fails with `Conflict`.

use chrono::Utc;
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

use super::models::{NewOrder, Order, OrderFields, OrderStatus, coerce_quantity};
use crate::error::ServiceError;
use crate::product::ProductService;
use crate::store::{FieldEq, RecordStore, decode_record, to_fields};

pub struct OrderService {
    store: Arc<dyn RecordStore>,
    table: String,
    products: Arc<ProductService>,
}

impl OrderService {
    pub fn new(
        store: Arc<dyn RecordStore>,
        table: impl Into<String>,
        products: Arc<ProductService>,
    ) -> Self {
        Self {
            store,
            table: table.into(),
            products,
        }
    }

    /// Orders visible to `user_id`: the deduplicated union of orders where
    /// the user is buyer or seller. Without a user, all orders.
    pub async fn list(&self, user_id: Option<&str>) -> Result<Vec<Order>, ServiceError> {
        let records = match user_id {
            None => self.store.list(&self.table, None).await?,
            Some(user) => {
                let as_buyer = self
                    .store
                    .list(&self.table, Some(&FieldEq::new("buyerId", user)))
                    .await?;
                let as_seller = self
                    .store
                    .list(&self.table, Some(&FieldEq::new("sellerId", user)))
                    .await?;

                // A user selling to themselves would appear in both lists.
                let mut seen = HashSet::new();
                as_buyer
                    .into_iter()
                    .chain(as_seller)
                    .filter(|rec| seen.insert(rec.id.clone()))
                    .collect()
            }
        };

        records
            .into_iter()
            .map(|raw| decode_record(raw).map_err(ServiceError::from))
            .collect()
    }

    pub async fn get(&self, id: &str) -> Result<Order, ServiceError> {
        let raw = self
            .store
            .find(&self.table, id)
            .await
            .map_err(ServiceError::for_entity("order"))?;
        Ok(decode_record(raw)?)
    }

    /// Place an order for `caller`, snapshotting the product's name, seller,
    /// and `price * quantity` at this moment. The product itself is not
    /// touched (no stock decrement). Orders always start `Pending`.
    pub async fn create(&self, caller: &str, input: NewOrder) -> Result<Order, ServiceError> {
        let missing =
            || ServiceError::invalid_input("productId, buyerId, and quantity are required");

        let product_id = input
            .product_id
            .filter(|p| !p.is_empty())
            .ok_or_else(missing)?;
        let buyer_id = input
            .buyer_id
            .filter(|b| !b.is_empty())
            .ok_or_else(missing)?;
        let quantity = coerce_quantity(input.quantity.as_ref().ok_or_else(missing)?)?;

        if buyer_id != caller {
            return Err(ServiceError::Forbidden("order"));
        }

        let product = self.products.get(&product_id).await?;
        let snapshot = product.fields.clone();

        let fields = OrderFields {
            product_id: product.id.clone(),
            product_name: snapshot.name.clone(),
            buyer_id,
            seller_id: snapshot.seller_id.clone(),
            quantity,
            total_price: snapshot.price * Decimal::from(quantity),
            shipping_address: input.shipping_address,
            status: OrderStatus::Pending,
            order_date: Utc::now(),
            updated_at: None,
        };

        let raw = self.store.create(&self.table, to_fields(&fields)?).await?;
        let order: Order = decode_record(raw)?;

        // Compensation for the non-transactional read-then-write: if the
        // product changed or was deleted between the read and the order
        // write, the snapshot is stale. Destroy the order and fail.
        let stale = match self.products.get(&product_id).await {
            Ok(current) => {
                current.fields.price != snapshot.price
                    || current.fields.seller_id != snapshot.seller_id
                    || current.fields.name != snapshot.name
            }
            Err(ServiceError::NotFound(_)) => true,
            Err(err) => return Err(err),
        };
        if stale {
            if let Err(err) = self.store.destroy(&self.table, &order.id).await {
                tracing::warn!(order_id = %order.id, %err, "failed to destroy stale order");
            }
            return Err(ServiceError::Conflict);
        }

        tracing::info!(
            order_id = %order.id,
            product_id = %product_id,
            buyer_id = %order.fields.buyer_id,
            "order created"
        );
        Ok(order)
    }

    /// Move an order to `status`, refreshing `updatedAt` and touching
    /// nothing else.
    ///
    /// The seller drives `Shipped` and `Delivered`; either participant may
    /// cancel. Transitions outside the lifecycle table are rejected.
    pub async fn update_status(
        &self,
        caller: &str,
        id: &str,
        status: Option<&str>,
    ) -> Result<Order, ServiceError> {
        let status = status
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ServiceError::invalid_input("status is required"))?;
        let next: OrderStatus = status.parse()?;

        let order = self.get(id).await?;
        let fields = &order.fields;

        let is_seller = fields.seller_id == caller;
        let is_buyer = fields.buyer_id == caller;
        let allowed = match next {
            OrderStatus::Shipped | OrderStatus::Delivered => is_seller,
            OrderStatus::Cancelled => is_seller || is_buyer,
            OrderStatus::Pending => is_seller || is_buyer,
        };
        if !allowed {
            return Err(ServiceError::Forbidden("order"));
        }

        if !fields.status.can_transition_to(next) {
            return Err(ServiceError::InvalidTransition {
                from: fields.status,
                to: next,
            });
        }

        let mut update = crate::store::Fields::new();
        update.insert("status".into(), serde_json::to_value(next)?);
        update.insert("updatedAt".into(), serde_json::to_value(Utc::now())?);

        let raw = self
            .store
            .update(&self.table, id, update)
            .await
            .map_err(ServiceError::for_entity("order"))?;
        tracing::info!(order_id = %id, from = %fields.status, to = %next, "order status updated");
        Ok(decode_record(raw)?)
    }
}
