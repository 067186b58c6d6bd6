//! Test Helpers

use rust_decimal::Decimal;
use testresult::TestResult;

use crate::{
    domain::{
        carts::{CartsService, data::RequestedLine, records::CartUuid},
        catalog::{
            CatalogService,
            data::{NewListing, NewProduct, NewSeller},
            records::{ListingRecord, ListingUuid, ProductUuid, SellerUuid},
        },
        checkout::CheckoutService,
        customers::{CustomersService, data::NewCustomer, records::CustomerUuid},
        orders::records::OrderUuid,
    },
    test::TestContext,
};

pub(crate) fn new_customer(uuid: CustomerUuid, email: &str) -> NewCustomer {
    NewCustomer {
        uuid,
        name: "Ada".to_string(),
        last_name: "Lovelace".to_string(),
        email: email.to_string(),
        address: "1 Analytical Way".to_string(),
        city: "Istanbul".to_string(),
        telephone_number: "+90 555 000 0000".to_string(),
    }
}

pub(crate) fn new_listing(
    seller: SellerUuid,
    product: ProductUuid,
    price: Decimal,
    stock: u32,
) -> NewListing {
    NewListing {
        uuid: ListingUuid::new(),
        seller_uuid: seller,
        product_uuid: product,
        price,
        discount_price: None,
        stock,
        size: "M".to_string(),
    }
}

impl TestContext {
    pub async fn seed_customer(&self) -> TestResult<CustomerUuid> {
        let uuid = CustomerUuid::new();

        self.customers
            .create_customer(new_customer(uuid, &format!("{uuid}@example.com")))
            .await?;

        Ok(uuid)
    }

    pub async fn seed_seller(&self) -> TestResult<SellerUuid> {
        let uuid = SellerUuid::new();

        self.catalog
            .create_seller(NewSeller {
                uuid,
                name: "Bosphorus Textiles".to_string(),
            })
            .await?;

        Ok(uuid)
    }

    pub async fn seed_seller_and_product(&self) -> TestResult<(SellerUuid, ProductUuid)> {
        let seller = self.seed_seller().await?;
        let product = ProductUuid::new();

        self.catalog
            .create_product(NewProduct {
                uuid: product,
                name: "Linen Shirt".to_string(),
            })
            .await?;

        Ok((seller, product))
    }

    /// A listing from a fresh seller.
    pub async fn seed_listing(&self, price: Decimal, stock: u32) -> TestResult<ListingRecord> {
        let seller = self.seed_seller().await?;

        self.seed_listing_for(seller, price, stock).await
    }

    /// A listing of a fresh product from an existing seller.
    pub async fn seed_listing_for(
        &self,
        seller: SellerUuid,
        price: Decimal,
        stock: u32,
    ) -> TestResult<ListingRecord> {
        let product = ProductUuid::new();

        self.catalog
            .create_product(NewProduct {
                uuid: product,
                name: "Linen Shirt".to_string(),
            })
            .await?;

        Ok(self
            .catalog
            .create_listing(new_listing(seller, product, price, stock))
            .await?)
    }

    pub async fn seed_discounted_listing(
        &self,
        price: Decimal,
        discount_price: Decimal,
        stock: u32,
    ) -> TestResult<ListingRecord> {
        let (seller, product) = self.seed_seller_and_product().await?;

        let mut listing = new_listing(seller, product, price, stock);
        listing.discount_price = Some(discount_price);

        Ok(self.catalog.create_listing(listing).await?)
    }

    pub async fn seed_cart(
        &self,
        customer: CustomerUuid,
        lines: &[(ListingUuid, u32)],
    ) -> TestResult<CartUuid> {
        let lines = lines
            .iter()
            .map(|(listing, quantity)| RequestedLine::new(*listing, *quantity))
            .collect();

        Ok(self.carts.create_cart(customer, lines).await?.uuid)
    }

    /// Create and confirm a cart, returning the first order it produced.
    pub async fn place_order(
        &self,
        customer: CustomerUuid,
        lines: &[(ListingUuid, u32)],
    ) -> TestResult<OrderUuid> {
        self.seed_cart(customer, lines).await?;

        let confirmation = self.checkout.confirm_cart(customer).await?;

        let order = confirmation
            .orders
            .first()
            .map(|order| order.header.uuid)
            .ok_or("confirmation produced no orders")?;

        Ok(order)
    }
}
