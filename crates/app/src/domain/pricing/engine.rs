//! Pricing Engine

use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{Postgres, Transaction};

use crate::domain::{
    catalog::repositories::PgListingsRepository,
    pricing::{
        errors::PricingError,
        models::{LineItem, ListingPrice, PriceDetails},
    },
};

/// Subtotals at or above this ship free.
pub const FREE_SHIPPING_THRESHOLD: Decimal = Decimal::from_parts(200, 0, 0, false, 0);

/// Flat shipping fee charged below [`FREE_SHIPPING_THRESHOLD`].
pub const BASE_SHIPPING_FEE: Decimal = Decimal::from_parts(45, 0, 0, false, 0);

/// Price lines whose listing prices are already known.
///
/// The subtotal is rounded half away from zero to two places once, after summing.
pub fn price_lines<I>(lines: I) -> Result<PriceDetails, PricingError>
where
    I: IntoIterator<Item = (ListingPrice, u32)>,
{
    let mut lines = lines.into_iter().peekable();

    if lines.peek().is_none() {
        return Err(PricingError::EmptyCart);
    }

    let mut subtotal = Decimal::ZERO;

    for (price, quantity) in lines {
        let line_total = price
            .unit_price()
            .checked_mul(Decimal::from(quantity))
            .ok_or(PricingError::Overflow)?;

        subtotal = subtotal
            .checked_add(line_total)
            .ok_or(PricingError::Overflow)?;
    }

    let subtotal = round_money(subtotal);
    let ship_price = shipping_for(subtotal);
    let total_price = subtotal
        .checked_add(ship_price)
        .map(round_money)
        .ok_or(PricingError::Overflow)?;

    Ok(PriceDetails {
        subtotal,
        ship_price,
        total_price,
    })
}

/// Shipping is a step function of the subtotal.
#[must_use]
pub fn shipping_for(subtotal: Decimal) -> Decimal {
    if subtotal >= FREE_SHIPPING_THRESHOLD {
        Decimal::ZERO
    } else {
        BASE_SHIPPING_FEE
    }
}

fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Prices lines inside the caller's transaction, loading any listing prices not yet known.
#[derive(Debug, Clone, Default)]
pub struct PricingEngine {
    listings: PgListingsRepository,
}

impl PricingEngine {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listings: PgListingsRepository::new(),
        }
    }

    pub async fn calculate_prices(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        lines: &[LineItem],
    ) -> Result<PriceDetails, PricingError> {
        if lines.is_empty() {
            return Err(PricingError::EmptyCart);
        }

        let mut priced = Vec::with_capacity(lines.len());

        for line in lines {
            let price = match line.price {
                Some(price) => price,
                None => {
                    let listing = self
                        .listings
                        .find_listing(tx, line.listing)
                        .await?
                        .ok_or(PricingError::ListingNotFound(line.listing))?;

                    ListingPrice::from(&listing)
                }
            };

            priced.push((price, line.quantity));
        }

        price_lines(priced)
    }
}
