//! Orders service.

use async_trait::async_trait;
use mockall::automock;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        catalog::records::SellerUuid,
        customers::records::CustomerUuid,
        orders::{
            data::{OrderScope, PageRequest},
            errors::OrdersServiceError,
            models::Page,
            records::{OrderDetailRecord, OrderRecord, OrderStatus, OrderUuid},
            repositories::{PgOrderDetailsRepository, PgOrdersRepository},
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgOrdersService {
    db: Db,
    orders: PgOrdersRepository,
    details: PgOrderDetailsRepository,
}

impl PgOrdersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            orders: PgOrdersRepository::new(),
            details: PgOrderDetailsRepository::new(),
        }
    }

    async fn list(
        &self,
        scope: OrderScope,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        if !page.is_valid() {
            return Err(OrdersServiceError::InvalidPage);
        }

        let mut tx = self.db.begin().await?;

        let total = self.orders.count_orders(&mut tx, scope).await?;
        let items = self.orders.list_orders(&mut tx, scope, page).await?;

        tx.commit().await?;

        Ok(Page::new(items, total, page))
    }

    async fn details_where(
        &self,
        order: OrderUuid,
        owned: impl FnOnce(&OrderRecord) -> bool + Send,
    ) -> Result<Vec<OrderDetailRecord>, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        self.orders
            .find_order(&mut tx, order)
            .await?
            .filter(owned)
            .ok_or(OrdersServiceError::OrderNotFound)?;

        let details = self.details.get_order_details(&mut tx, order).await?;

        tx.commit().await?;

        Ok(details)
    }

    async fn lock_seller_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: SellerUuid,
        order: OrderUuid,
    ) -> Result<OrderRecord, OrdersServiceError> {
        self.orders
            .lock_order(tx, order)
            .await?
            .filter(|record| record.seller_uuid == seller)
            .ok_or(OrdersServiceError::OrderNotFound)
    }
}

#[async_trait]
impl OrdersService for PgOrdersService {
    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        self.list(OrderScope::Customer(customer), page).await
    }

    async fn list_seller_orders(
        &self,
        seller: SellerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        self.list(OrderScope::Seller(seller), page).await
    }

    async fn list_all_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError> {
        self.list(OrderScope::All, page).await
    }

    async fn customer_order_details(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderDetailRecord>, OrdersServiceError> {
        self.details_where(order, |record| record.customer_uuid == customer)
            .await
    }

    async fn seller_order_details(
        &self,
        seller: SellerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderDetailRecord>, OrdersServiceError> {
        self.details_where(order, |record| record.seller_uuid == seller)
            .await
    }

    #[tracing::instrument(
        name = "orders.service.advance_status",
        skip(self),
        fields(seller_uuid = %seller, order_uuid = %order, status = %status),
        err
    )]
    async fn advance_status(
        &self,
        seller: SellerUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let mut tx = self.db.begin().await?;

        let current = self.lock_seller_order(&mut tx, seller, order).await?;

        if current.status.next() != Some(status) {
            return Err(OrdersServiceError::InvalidStatusTransition {
                from: current.status,
                to: status,
            });
        }

        let updated = self
            .orders
            .update_order_status(&mut tx, order, status)
            .await?;

        tx.commit().await?;

        info!(from = %current.status, "advanced order status");

        Ok(updated)
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// The customer's orders, newest first.
    async fn list_customer_orders(
        &self,
        customer: CustomerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// The seller's orders, newest first.
    async fn list_seller_orders(
        &self,
        seller: SellerUuid,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Every order, newest first.
    async fn list_all_orders(
        &self,
        page: PageRequest,
    ) -> Result<Page<OrderRecord>, OrdersServiceError>;

    /// Line snapshots of one of the customer's orders.
    async fn customer_order_details(
        &self,
        customer: CustomerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderDetailRecord>, OrdersServiceError>;

    /// Line snapshots of one of the seller's orders.
    async fn seller_order_details(
        &self,
        seller: SellerUuid,
        order: OrderUuid,
    ) -> Result<Vec<OrderDetailRecord>, OrdersServiceError>;

    /// Move one of the seller's orders to the next status.
    async fn advance_status(
        &self,
        seller: SellerUuid,
        order: OrderUuid,
        status: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}
