//! Carts service.

use std::collections::hash_map::Entry;

use async_trait::async_trait;
use mockall::automock;
use rustc_hash::FxHashMap;
use sqlx::{Postgres, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::{
        carts::{
            data::RequestedLine,
            errors::CartsServiceError,
            models::{Cart, CartLine},
            records::{CartLineUuid, CartRecord, CartUuid},
            repositories::{PgCartLinesRepository, PgCartsRepository},
        },
        catalog::records::ListingUuid,
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        inventory::{CheckedListing, InventoryGate},
        pricing::{LineItem, ListingPrice, PriceDetails, PricingEngine, PricingError, price_lines},
    },
};

#[derive(Debug, Clone)]
pub struct PgCartsService {
    db: Db,
    carts: PgCartsRepository,
    lines: PgCartLinesRepository,
    customers: PgCustomersRepository,
    inventory: InventoryGate,
    pricing: PricingEngine,
}

impl PgCartsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            lines: PgCartLinesRepository::new(),
            customers: PgCustomersRepository::new(),
            inventory: InventoryGate::new(),
            pricing: PricingEngine::new(),
        }
    }

    /// Lock and stock-check every requested listing.
    async fn check_lines(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[RequestedLine],
    ) -> Result<Vec<CheckedListing>, CartsServiceError> {
        let requested: Vec<(ListingUuid, u32)> = lines
            .iter()
            .map(|line| (line.listing, line.quantity))
            .collect();

        Ok(self.inventory.check_and_reserve_all(tx, &requested).await?)
    }

    async fn price_checked(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[RequestedLine],
        checked: &[CheckedListing],
    ) -> Result<PriceDetails, CartsServiceError> {
        let items: Vec<LineItem> = checked
            .iter()
            .zip(lines)
            .map(|(listing, line)| LineItem::from_listing(&listing.record, line.quantity))
            .collect();

        Ok(self.pricing.calculate_prices(tx, &items).await?)
    }

    /// Load the cart projection with prices recomputed from its current lines.
    async fn load_cart(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        record: CartRecord,
    ) -> Result<Cart, CartsServiceError> {
        let customer = self
            .customers
            .find_customer(tx, record.customer_uuid)
            .await?
            .ok_or(CartsServiceError::CustomerNotFound)?;

        let lines = self.lines.get_cart_lines(tx, record.uuid).await?;
        let prices = price_cart_lines(&lines)?;

        Ok(Cart {
            uuid: record.uuid,
            customer,
            lines,
            prices,
            is_active: record.is_active,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[async_trait]
impl CartsService for PgCartsService {
    #[tracing::instrument(
        name = "carts.service.create_cart",
        skip(self, lines),
        fields(customer_uuid = %customer, line_count = lines.len()),
        err
    )]
    async fn create_cart(
        &self,
        customer: CustomerUuid,
        lines: Vec<RequestedLine>,
    ) -> Result<Cart, CartsServiceError> {
        let lines = merge_lines(lines)?;

        if lines.is_empty() {
            return Err(CartsServiceError::EmptyCart);
        }

        let mut tx = self.db.begin().await?;

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::CustomerNotFound)?;

        if self
            .carts
            .find_active_cart_for_customer(&mut tx, customer)
            .await?
            .is_some()
        {
            return Err(CartsServiceError::ActiveCartExists);
        }

        let checked = self.check_lines(&mut tx, &lines).await?;
        let prices = self.price_checked(&mut tx, &lines, &checked).await?;

        let record = self
            .carts
            .create_cart(&mut tx, CartUuid::new(), customer, &prices)
            .await?;

        for line in &lines {
            self.lines
                .create_cart_line(&mut tx, record.uuid, line.listing, line.quantity)
                .await?;
        }

        let cart = self.load_cart(&mut tx, record).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, total_price = %cart.prices.total_price, "created cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.update_cart",
        skip(self, lines),
        fields(customer_uuid = %customer, cart_uuid = %cart, line_count = lines.len()),
        err
    )]
    async fn update_cart(
        &self,
        customer: CustomerUuid,
        cart: CartUuid,
        lines: Vec<RequestedLine>,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .carts
            .lock_cart(&mut tx, cart)
            .await?
            .filter(|record| record.is_active)
            .ok_or(CartsServiceError::CartNotFound)?;

        ensure_owner(&record, customer)?;

        let lines = merge_lines(lines)?;

        if lines.is_empty() {
            return Err(CartsServiceError::EmptyUpdate);
        }

        let checked = self.check_lines(&mut tx, &lines).await?;
        let prices = self.price_checked(&mut tx, &lines, &checked).await?;

        let existing: FxHashMap<_, _> = self
            .lines
            .get_cart_line_records(&mut tx, cart)
            .await?
            .into_iter()
            .map(|line| (line.listing_uuid, line))
            .collect();

        for line in &lines {
            match existing.get(&line.listing) {
                Some(current) if current.quantity == line.quantity => {}
                Some(current) => {
                    self.lines
                        .update_cart_line_quantity(&mut tx, current.uuid, line.quantity)
                        .await?;
                }
                None => {
                    self.lines
                        .create_cart_line(&mut tx, cart, line.listing, line.quantity)
                        .await?;
                }
            }
        }

        for stale in existing
            .values()
            .filter(|current| !lines.iter().any(|line| line.listing == current.listing_uuid))
        {
            self.lines.delete_cart_line(&mut tx, stale.uuid).await?;
        }

        self.carts.update_cart_prices(&mut tx, cart, &prices).await?;

        let cart = self.load_cart(&mut tx, record).await?;

        tx.commit().await?;

        info!(total_price = %cart.prices.total_price, "updated cart");

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.get_active_cart",
        skip(self),
        fields(customer_uuid = %customer),
        err
    )]
    async fn get_active_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .carts
            .find_active_cart_for_customer(&mut tx, customer)
            .await?
            .ok_or(CartsServiceError::NoActiveCart)?;

        ensure_owner(&record, customer)?;

        let cart = self.load_cart(&mut tx, record).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.get_cart",
        skip(self),
        fields(customer_uuid = %customer, cart_uuid = %cart),
        err
    )]
    async fn get_cart(
        &self,
        customer: CustomerUuid,
        cart: CartUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .carts
            .find_cart(&mut tx, cart)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        ensure_owner(&record, customer)?;

        let cart = self.load_cart(&mut tx, record).await?;

        tx.commit().await?;

        Ok(cart)
    }

    #[tracing::instrument(
        name = "carts.service.remove_line",
        skip(self),
        fields(customer_uuid = %customer, line_uuid = %line),
        err
    )]
    async fn remove_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<Cart, CartsServiceError> {
        let mut tx = self.db.begin().await?;

        let line = self
            .lines
            .find_cart_line(&mut tx, line)
            .await?
            .ok_or(CartsServiceError::LineNotFound)?;

        let record = self
            .carts
            .lock_cart(&mut tx, line.cart_uuid)
            .await?
            .ok_or(CartsServiceError::CartNotFound)?;

        if record.customer_uuid != customer || !record.is_active {
            return Err(CartsServiceError::Forbidden);
        }

        let remaining: Vec<CartLine> = self
            .lines
            .get_cart_lines(&mut tx, record.uuid)
            .await?
            .into_iter()
            .filter(|current| current.uuid != line.uuid)
            .collect();

        let prices = price_cart_lines(&remaining)?;

        self.carts
            .update_cart_prices(&mut tx, record.uuid, &prices)
            .await?;

        if self.lines.delete_cart_line(&mut tx, line.uuid).await? == 0 {
            return Err(CartsServiceError::LineNotFound);
        }

        let cart = self.load_cart(&mut tx, record).await?;

        tx.commit().await?;

        info!(cart_uuid = %cart.uuid, remaining = cart.lines.len(), "removed cart line");

        Ok(cart)
    }
}

/// A cart is only visible to and mutable by the customer it belongs to.
fn ensure_owner(record: &CartRecord, customer: CustomerUuid) -> Result<(), CartsServiceError> {
    if record.customer_uuid == customer {
        Ok(())
    } else {
        Err(CartsServiceError::Forbidden)
    }
}

/// Merge repeated listings by summing their quantities, keeping first-seen order.
fn merge_lines(lines: Vec<RequestedLine>) -> Result<Vec<RequestedLine>, CartsServiceError> {
    let mut merged: Vec<RequestedLine> = Vec::with_capacity(lines.len());
    let mut positions: FxHashMap<ListingUuid, usize> = FxHashMap::default();

    for line in lines {
        if line.quantity == 0 {
            return Err(CartsServiceError::InvalidQuantity);
        }

        match positions.entry(line.listing) {
            Entry::Occupied(entry) => {
                let existing = merged
                    .get_mut(*entry.get())
                    .ok_or(CartsServiceError::InvalidQuantity)?;

                existing.quantity = existing
                    .quantity
                    .checked_add(line.quantity)
                    .ok_or(CartsServiceError::InvalidQuantity)?;
            }
            Entry::Vacant(entry) => {
                entry.insert(merged.len());
                merged.push(line);
            }
        }
    }

    Ok(merged)
}

/// Prices of a cart's current lines. A cart without lines has no price and fails `EmptyCart`.
fn price_cart_lines(lines: &[CartLine]) -> Result<PriceDetails, PricingError> {
    price_lines(
        lines
            .iter()
            .map(|line| (ListingPrice::from(&line.listing), line.quantity)),
    )
}

#[automock]
#[async_trait]
pub trait CartsService: Send + Sync {
    /// Create the customer's active cart from the requested lines.
    async fn create_cart(
        &self,
        customer: CustomerUuid,
        lines: Vec<RequestedLine>,
    ) -> Result<Cart, CartsServiceError>;

    /// Replace the lines of an active cart. Lines whose listing is not requested are removed.
    async fn update_cart(
        &self,
        customer: CustomerUuid,
        cart: CartUuid,
        lines: Vec<RequestedLine>,
    ) -> Result<Cart, CartsServiceError>;

    /// The customer's active cart with freshly computed prices.
    async fn get_active_cart(&self, customer: CustomerUuid) -> Result<Cart, CartsServiceError>;

    /// A cart by id, active or not, if it belongs to the customer.
    async fn get_cart(
        &self,
        customer: CustomerUuid,
        cart: CartUuid,
    ) -> Result<Cart, CartsServiceError>;

    /// Remove one line from the customer's active cart.
    async fn remove_line(
        &self,
        customer: CustomerUuid,
        line: CartLineUuid,
    ) -> Result<Cart, CartsServiceError>;
}
