//! Cart Handlers

pub(crate) mod confirm;
pub(crate) mod create;
pub(crate) mod get;
pub(crate) mod remove_line;
pub(crate) mod show;
pub(crate) mod update;

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;

    use bazaar_app::domain::{
        carts::{
            models::{Cart, CartLine},
            records::{CartLineUuid, CartUuid},
        },
        catalog::records::{ListingRecord, ListingUuid, ProductUuid},
        customers::records::CustomerRecord,
        pricing::PriceDetails,
    };

    use crate::test_helpers::{TEST_CUSTOMER_UUID, TEST_SELLER_UUID};

    pub(super) fn make_cart(uuid: CartUuid) -> Cart {
        let listing = ListingRecord {
            uuid: ListingUuid::new(),
            seller_uuid: Some(TEST_SELLER_UUID),
            product_uuid: Some(ProductUuid::new()),
            product_name: Some("Linen Shirt".to_string()),
            price: Decimal::new(100, 0),
            discount_price: Some(Decimal::new(80, 0)),
            stock: 10,
            size: "M".to_string(),
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        };

        Cart {
            uuid,
            customer: CustomerRecord {
                uuid: TEST_CUSTOMER_UUID,
                name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                address: "1 Analytical Way".to_string(),
                city: "Istanbul".to_string(),
                telephone_number: "+90 555 000 0000".to_string(),
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            },
            lines: vec![CartLine {
                uuid: CartLineUuid::new(),
                listing,
                quantity: 2,
                created_at: Timestamp::UNIX_EPOCH,
                updated_at: Timestamp::UNIX_EPOCH,
            }],
            prices: PriceDetails {
                subtotal: Decimal::new(160, 0),
                ship_price: Decimal::new(45, 0),
                total_price: Decimal::new(205, 0),
            },
            is_active: true,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }
}
