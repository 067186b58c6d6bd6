//! Catalog service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::catalog::{
        data::{NewListing, NewProduct, NewSeller},
        errors::CatalogServiceError,
        records::{ListingRecord, ListingUuid, ProductRecord, ProductUuid, SellerRecord, SellerUuid},
        repositories::{PgListingsRepository, PgSellersRepository},
    },
};

#[derive(Debug, Clone)]
pub struct PgCatalogService {
    db: Db,
    sellers_repository: PgSellersRepository,
    listings_repository: PgListingsRepository,
}

impl PgCatalogService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            sellers_repository: PgSellersRepository::new(),
            listings_repository: PgListingsRepository::new(),
        }
    }
}

#[async_trait]
impl CatalogService for PgCatalogService {
    async fn create_seller(&self, seller: NewSeller) -> Result<SellerRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.sellers_repository.create_seller(&mut tx, &seller).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_seller(&self, seller: SellerUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        if self.sellers_repository.delete_seller(&mut tx, seller).await? == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .sellers_repository
            .create_product(&mut tx, &product)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        if self.sellers_repository.delete_product(&mut tx, product).await? == 0 {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn create_listing(
        &self,
        listing: NewListing,
    ) -> Result<ListingRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .listings_repository
            .create_listing(&mut tx, &listing)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn get_listing(&self, listing: ListingUuid) -> Result<ListingRecord, CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .listings_repository
            .find_listing(&mut tx, listing)
            .await?
            .ok_or(CatalogServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn delete_listing(&self, listing: ListingUuid) -> Result<(), CatalogServiceError> {
        let mut tx = self.db.begin().await?;

        if self
            .listings_repository
            .delete_listing(&mut tx, listing)
            .await?
            == 0
        {
            return Err(CatalogServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Creates a new seller.
    async fn create_seller(&self, seller: NewSeller) -> Result<SellerRecord, CatalogServiceError>;

    /// Soft-deletes a seller. Its listings stay but lose their seller relation.
    async fn delete_seller(&self, seller: SellerUuid) -> Result<(), CatalogServiceError>;

    /// Creates a new product.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductRecord, CatalogServiceError>;

    /// Soft-deletes a product. Its listings stay but lose their product relation.
    async fn delete_product(&self, product: ProductUuid) -> Result<(), CatalogServiceError>;

    /// Creates a listing of a product by a seller.
    async fn create_listing(&self, listing: NewListing)
    -> Result<ListingRecord, CatalogServiceError>;

    /// Retrieve a single listing with its live seller and product relations.
    async fn get_listing(&self, listing: ListingUuid) -> Result<ListingRecord, CatalogServiceError>;

    /// Soft-deletes a listing.
    async fn delete_listing(&self, listing: ListingUuid) -> Result<(), CatalogServiceError>;
}
