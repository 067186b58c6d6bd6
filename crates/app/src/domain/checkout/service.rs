//! Checkout service.

use std::sync::Arc;

use async_trait::async_trait;
use mockall::automock;
use sqlx::Acquire;
use tracing::{info, warn};

use crate::{
    database::Db,
    domain::{
        carts::repositories::{PgCartLinesRepository, PgCartsRepository},
        checkout::{
            errors::CheckoutServiceError,
            models::{Confirmation, SellerFailure, confirmation_message},
            partition::partition_by_seller,
        },
        catalog::records::ListingUuid,
        customers::{records::CustomerUuid, repository::PgCustomersRepository},
        inventory::InventoryGate,
        orders::{
            data::{SellerSubCart, SubCartLine},
            factory::{OrderFactory, PgOrderFactory},
        },
    },
};

#[derive(Clone)]
pub struct PgCheckoutService {
    db: Db,
    carts: PgCartsRepository,
    lines: PgCartLinesRepository,
    customers: PgCustomersRepository,
    inventory: InventoryGate,
    factory: Arc<dyn OrderFactory>,
}

impl std::fmt::Debug for PgCheckoutService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCheckoutService")
            .field("db", &self.db)
            .finish_non_exhaustive()
    }
}

impl PgCheckoutService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self::with_order_factory(db, Arc::new(PgOrderFactory::new()))
    }

    #[must_use]
    pub fn with_order_factory(db: Db, factory: Arc<dyn OrderFactory>) -> Self {
        Self {
            db,
            carts: PgCartsRepository::new(),
            lines: PgCartLinesRepository::new(),
            customers: PgCustomersRepository::new(),
            inventory: InventoryGate::new(),
            factory,
        }
    }
}

#[async_trait]
impl CheckoutService for PgCheckoutService {
    #[tracing::instrument(
        name = "checkout.service.confirm_cart",
        skip(self),
        fields(
            customer_uuid = %customer,
            cart_uuid = tracing::field::Empty,
            seller_count = tracing::field::Empty
        ),
        err
    )]
    async fn confirm_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<Confirmation, CheckoutServiceError> {
        let mut tx = self.db.begin().await?;

        let cart = self
            .carts
            .lock_active_cart_for_customer(&mut tx, customer)
            .await?
            .ok_or(CheckoutServiceError::NoActiveCart)?;

        let span = tracing::Span::current();

        span.record("cart_uuid", tracing::field::display(cart.uuid));

        let lines = self.lines.get_cart_lines(&mut tx, cart.uuid).await?;

        if lines.is_empty() {
            return Err(CheckoutServiceError::EmptyCart);
        }

        self.customers
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CheckoutServiceError::CustomerNotFound)?;

        let requested: Vec<(ListingUuid, u32)> = lines
            .iter()
            .map(|line| (line.listing.uuid, line.quantity))
            .collect();

        let checked = self
            .inventory
            .check_and_reserve_all(&mut tx, &requested)
            .await?;

        let owned = checked.iter().zip(&lines).map(|(listing, line)| {
            (
                listing.seller,
                SubCartLine {
                    listing: line.listing.uuid,
                    quantity: line.quantity,
                },
            )
        });

        let buckets = partition_by_seller(owned);

        span.record("seller_count", tracing::field::display(buckets.len()));

        let mut orders = Vec::with_capacity(buckets.len());
        let mut failures = Vec::new();

        for bucket in buckets {
            let sub_cart = SellerSubCart {
                cart: cart.uuid,
                customer,
                seller: bucket.seller,
                lines: bucket.lines,
            };

            let mut savepoint = Acquire::begin(&mut tx).await?;

            match self.factory.create_order(&mut savepoint, &sub_cart).await {
                Ok(order) => {
                    savepoint.commit().await?;
                    orders.push(order);
                }
                Err(error) => {
                    savepoint.rollback().await?;

                    warn!(seller_uuid = %sub_cart.seller, %error, "seller order failed");

                    failures.push(SellerFailure {
                        seller: sub_cart.seller,
                        reason: error.to_string(),
                    });
                }
            }
        }

        self.carts.deactivate_cart(&mut tx, cart.uuid).await?;

        tx.commit().await?;

        let message = confirmation_message(orders.len(), &failures);

        info!(
            orders = orders.len(),
            failures = failures.len(),
            "confirmed cart"
        );

        Ok(Confirmation {
            cart: cart.uuid,
            message,
            orders,
            failures,
        })
    }
}

#[automock]
#[async_trait]
pub trait CheckoutService: Send + Sync {
    /// Split the customer's active cart into one order per seller and deactivate the cart.
    ///
    /// A seller whose order fails is reported in the confirmation without undoing the
    /// orders created for other sellers.
    async fn confirm_cart(
        &self,
        customer: CustomerUuid,
    ) -> Result<Confirmation, CheckoutServiceError>;
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use sqlx::{Postgres, Transaction};
    use testresult::TestResult;

    use crate::{
        domain::{
            carts::{CartsService, CartsServiceError},
            catalog::{CatalogService, records::SellerUuid},
            customers::CustomersService,
            inventory::InventoryError,
            orders::{OrdersService, data::PageRequest, errors::OrderFactoryError, models::Order},
            pricing::PricingError,
        },
        test::TestContext,
    };

    use super::*;

    /// Creates orders normally, then fails the ones for `rejected` sellers after their
    /// writes have gone through.
    struct RejectSellers {
        inner: PgOrderFactory,
        rejected: Vec<SellerUuid>,
    }

    #[async_trait]
    impl OrderFactory for RejectSellers {
        async fn create_order(
            &self,
            tx: &mut Transaction<'_, Postgres>,
            sub_cart: &SellerSubCart,
        ) -> Result<Order, OrderFactoryError> {
            let order = self.inner.create_order(tx, sub_cart).await?;

            if self.rejected.contains(&sub_cart.seller) {
                let line = sub_cart.lines.first().ok_or(OrderFactoryError::EmptyCart)?;

                return Err(OrderFactoryError::Inventory(
                    InventoryError::InsufficientStock {
                        listing: line.listing,
                        requested: line.quantity,
                        available: 0,
                    },
                ));
            }

            Ok(order)
        }
    }

    fn rejecting(ctx: &TestContext, rejected: Vec<SellerUuid>) -> PgCheckoutService {
        PgCheckoutService::with_order_factory(
            ctx.db.clone(),
            Arc::new(RejectSellers {
                inner: PgOrderFactory::new(),
                rejected,
            }),
        )
    }

    #[tokio::test]
    async fn confirm_creates_one_order_per_seller() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let a1 = ctx.seed_listing(Decimal::new(150, 0), 5).await?;
        let seller_a = a1.seller_uuid.ok_or("listing has a seller")?;
        let a2 = ctx.seed_listing_for(seller_a, Decimal::new(60, 0), 5).await?;
        let b1 = ctx.seed_listing(Decimal::new(30, 0), 5).await?;
        let seller_b = b1.seller_uuid.ok_or("listing has a seller")?;

        let cart = ctx
            .seed_cart(customer, &[(a1.uuid, 1), (b1.uuid, 2), (a2.uuid, 1)])
            .await?;

        let confirmation = ctx.checkout.confirm_cart(customer).await?;

        assert!(confirmation.is_complete());
        assert_eq!(confirmation.cart, cart);
        assert_eq!(confirmation.orders.len(), 2);

        let order_a = confirmation.orders.first().ok_or("missing order for A")?;
        let order_b = confirmation.orders.get(1).ok_or("missing order for B")?;

        assert_eq!(order_a.header.seller_uuid, seller_a);
        assert_eq!(order_a.details.len(), 2);
        assert_eq!(order_a.header.ship_price, Decimal::ZERO);
        assert_eq!(order_a.header.total_price, Decimal::new(210, 0));

        assert_eq!(order_b.header.seller_uuid, seller_b);
        assert_eq!(order_b.details.len(), 1);
        assert_eq!(order_b.header.ship_price, Decimal::new(45, 0));
        assert_eq!(order_b.header.total_price, Decimal::new(105, 0));

        for order in &confirmation.orders {
            assert_eq!(order.header.cart_uuid, cart);
            assert_eq!(order.header.customer_uuid, customer);
        }

        assert_eq!(ctx.catalog.get_listing(a1.uuid).await?.stock, 4);
        assert_eq!(ctx.catalog.get_listing(a2.uuid).await?.stock, 4);
        assert_eq!(ctx.catalog.get_listing(b1.uuid).await?.stock, 3);

        let active = ctx.carts.get_active_cart(customer).await;

        assert!(
            matches!(active, Err(CartsServiceError::NoActiveCart)),
            "expected the cart to be deactivated, got {active:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn failed_seller_does_not_undo_sibling_orders() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let a = ctx.seed_listing(Decimal::new(20, 0), 5).await?;
        let b = ctx.seed_listing(Decimal::new(40, 0), 5).await?;
        let seller_b = b.seller_uuid.ok_or("listing has a seller")?;

        ctx.seed_cart(customer, &[(a.uuid, 1), (b.uuid, 1)]).await?;

        let confirmation = rejecting(&ctx, vec![seller_b])
            .confirm_cart(customer)
            .await?;

        assert_eq!(confirmation.orders.len(), 1);
        assert_eq!(
            confirmation.orders.first().map(|o| o.header.seller_uuid),
            a.seller_uuid
        );
        assert_eq!(confirmation.failures.len(), 1);
        assert!(
            confirmation.message.contains(&seller_b.to_string()),
            "message should name the failed seller: {}",
            confirmation.message
        );

        assert_eq!(ctx.catalog.get_listing(a.uuid).await?.stock, 4);
        assert_eq!(ctx.catalog.get_listing(b.uuid).await?.stock, 5);

        let seller_b_orders = ctx
            .orders
            .list_seller_orders(seller_b, PageRequest::default())
            .await?;

        assert_eq!(seller_b_orders.total, 0);

        let active = ctx.carts.get_active_cart(customer).await;

        assert!(
            matches!(active, Err(CartsServiceError::NoActiveCart)),
            "expected the cart to be deactivated, got {active:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn cart_is_deactivated_even_when_every_seller_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let a = ctx.seed_listing(Decimal::new(20, 0), 5).await?;

        ctx.seed_cart(customer, &[(a.uuid, 1)]).await?;

        let confirmation = rejecting(&ctx, a.seller_uuid.into_iter().collect())
            .confirm_cart(customer)
            .await?;

        assert!(confirmation.orders.is_empty(), "expected no orders");
        assert_eq!(confirmation.failures.len(), 1);
        assert_eq!(ctx.catalog.get_listing(a.uuid).await?.stock, 5);

        let active = ctx.carts.get_active_cart(customer).await;

        assert!(
            matches!(active, Err(CartsServiceError::NoActiveCart)),
            "expected the cart to be deactivated, got {active:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn confirm_without_active_cart_fails() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;

        let result = ctx.checkout.confirm_cart(customer).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::NoActiveCart)),
            "expected NoActiveCart, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn confirm_empty_cart_fails_and_keeps_it_active() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let listing = ctx.seed_listing(Decimal::new(20, 0), 5).await?;

        let cart = ctx.seed_cart(customer, &[(listing.uuid, 1)]).await?;

        sqlx::query("DELETE FROM cart_lines WHERE cart_uuid = $1")
            .bind(cart.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.checkout.confirm_cart(customer).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        let active = ctx.carts.get_active_cart(customer).await;

        assert!(
            matches!(active, Err(CartsServiceError::Pricing(PricingError::EmptyCart))),
            "expected the empty cart to still be active, got {active:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn stock_sold_out_since_cart_creation_aborts_everything() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let a = ctx.seed_listing(Decimal::new(20, 0), 5).await?;
        let b = ctx.seed_listing(Decimal::new(20, 0), 5).await?;

        ctx.seed_cart(customer, &[(a.uuid, 1), (b.uuid, 3)]).await?;

        sqlx::query("UPDATE listings SET stock = 2 WHERE uuid = $1")
            .bind(b.uuid.into_uuid())
            .execute(ctx.db.pool())
            .await?;

        let result = ctx.checkout.confirm_cart(customer).await;

        assert!(
            matches!(
                result,
                Err(CheckoutServiceError::Inventory(InventoryError::InsufficientStock { .. }))
            ),
            "expected InsufficientStock, got {result:?}"
        );

        assert_eq!(ctx.catalog.get_listing(a.uuid).await?.stock, 5);
        assert!(ctx.carts.get_active_cart(customer).await?.is_active);

        Ok(())
    }

    #[tokio::test]
    async fn deleted_customer_cannot_confirm() -> TestResult {
        let ctx = TestContext::new().await;
        let customer = ctx.seed_customer().await?;
        let listing = ctx.seed_listing(Decimal::new(20, 0), 5).await?;

        ctx.seed_cart(customer, &[(listing.uuid, 1)]).await?;
        ctx.customers.delete_customer(customer).await?;

        let result = ctx.checkout.confirm_cart(customer).await;

        assert!(
            matches!(result, Err(CheckoutServiceError::CustomerNotFound)),
            "expected CustomerNotFound, got {result:?}"
        );

        Ok(())
    }
}
