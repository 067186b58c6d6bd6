//! Order Factory

use async_trait::async_trait;
use rust_decimal::Decimal;
use sqlx::{Postgres, Transaction};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    inventory::{CheckedListing, InventoryGate},
    orders::{
        data::SellerSubCart,
        errors::OrderFactoryError,
        models::Order,
        records::OrderUuid,
        repositories::{
            NewOrderDetail, NewOrderHeader, PgOrderDetailsRepository, PgOrdersRepository,
        },
    },
    pricing::{LineItem, PricingEngine, PricingError},
};

/// Persists one seller's order from its share of a cart.
#[async_trait]
pub trait OrderFactory: Send + Sync {
    /// Write the order header and its detail snapshots inside `tx`, decrementing stock for
    /// every line. Nothing is committed here.
    async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sub_cart: &SellerSubCart,
    ) -> Result<Order, OrderFactoryError>;
}

#[derive(Debug, Clone, Default)]
pub struct PgOrderFactory {
    orders: PgOrdersRepository,
    details: PgOrderDetailsRepository,
    inventory: InventoryGate,
    pricing: PricingEngine,
}

impl PgOrderFactory {
    #[must_use]
    pub fn new() -> Self {
        Self {
            orders: PgOrdersRepository::new(),
            details: PgOrderDetailsRepository::new(),
            inventory: InventoryGate::new(),
            pricing: PricingEngine::new(),
        }
    }
}

#[async_trait]
impl OrderFactory for PgOrderFactory {
    #[tracing::instrument(
        name = "orders.factory.create_order",
        skip(self, tx, sub_cart),
        fields(
            seller_uuid = %sub_cart.seller,
            cart_uuid = %sub_cart.cart,
            line_count = sub_cart.lines.len()
        ),
        err
    )]
    async fn create_order(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        sub_cart: &SellerSubCart,
    ) -> Result<Order, OrderFactoryError> {
        if sub_cart.lines.is_empty() {
            return Err(OrderFactoryError::EmptyCart);
        }

        let mut checked: Vec<(CheckedListing, u32)> = Vec::with_capacity(sub_cart.lines.len());

        for line in &sub_cart.lines {
            let listing = self
                .inventory
                .check_and_reserve(tx, line.listing, line.quantity)
                .await?;

            if listing.seller != sub_cart.seller {
                return Err(OrderFactoryError::SellerMismatch {
                    listing: line.listing,
                    seller: sub_cart.seller,
                });
            }

            checked.push((listing, line.quantity));
        }

        let items: Vec<LineItem> = checked
            .iter()
            .map(|(listing, quantity)| LineItem::from_listing(&listing.record, *quantity))
            .collect();

        let prices = self.pricing.calculate_prices(tx, &items).await?;

        let header = self
            .orders
            .create_order(
                tx,
                &NewOrderHeader {
                    uuid: OrderUuid::new(),
                    order_number: Uuid::new_v4().to_string(),
                    customer: sub_cart.customer,
                    seller: sub_cart.seller,
                    cart: sub_cart.cart,
                    ship_price: prices.ship_price,
                    total_price: prices.total_price,
                },
            )
            .await?;

        let mut details = Vec::with_capacity(checked.len());

        for (listing, quantity) in &checked {
            let unit_price = listing.record.unit_price();
            let total_price = unit_price
                .checked_mul(Decimal::from(*quantity))
                .ok_or(PricingError::Overflow)?;

            let detail = self
                .details
                .create_order_detail(
                    tx,
                    &NewOrderDetail {
                        order: header.uuid,
                        listing: listing.uuid(),
                        product: listing.product,
                        customer: sub_cart.customer,
                        quantity: *quantity,
                        unit_price,
                        total_price,
                    },
                )
                .await?;

            self.inventory
                .decrement(tx, listing.uuid(), *quantity)
                .await?;

            details.push(detail);
        }

        debug!(order_uuid = %header.uuid, order_number = %header.order_number, "created order");

        Ok(Order {
            header,
            details,
            prices,
        })
    }
}
