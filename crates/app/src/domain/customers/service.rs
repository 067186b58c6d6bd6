//! Customers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::customers::{
        data::NewCustomer,
        errors::CustomersServiceError,
        records::{CustomerRecord, CustomerUuid},
        repository::PgCustomersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCustomersService {
    db: Db,
    repository: PgCustomersRepository,
}

impl PgCustomersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCustomersRepository::new(),
        }
    }
}

#[async_trait]
impl CustomersService for PgCustomersService {
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .find_customer(&mut tx, customer)
            .await?
            .ok_or(CustomersServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_customer(&mut tx, &customer).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_customer(&self, customer: CustomerUuid) -> Result<(), CustomersServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_customer(&mut tx, customer).await?;

        if rows_affected == 0 {
            return Err(CustomersServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CustomersService: Send + Sync {
    /// Retrieve a single customer.
    async fn get_customer(
        &self,
        customer: CustomerUuid,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Creates a new customer with the given details.
    async fn create_customer(
        &self,
        customer: NewCustomer,
    ) -> Result<CustomerRecord, CustomersServiceError>;

    /// Soft-deletes a customer.
    async fn delete_customer(&self, customer: CustomerUuid) -> Result<(), CustomersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::{TestContext, helpers::new_customer};

    use super::*;

    #[tokio::test]
    async fn create_customer_returns_contact_details() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CustomerUuid::new();

        let customer = ctx
            .customers
            .create_customer(new_customer(uuid, "ada@example.com"))
            .await?;

        assert_eq!(customer.uuid, uuid);
        assert_eq!(customer.email, "ada@example.com");
        assert_eq!(customer.city, "Istanbul");

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_email_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        ctx.customers
            .create_customer(new_customer(CustomerUuid::new(), "dup@example.com"))
            .await?;

        let result = ctx
            .customers
            .create_customer(new_customer(CustomerUuid::new(), "dup@example.com"))
            .await;

        assert!(
            matches!(result, Err(CustomersServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_customer_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;
        let uuid = CustomerUuid::new();

        ctx.customers
            .create_customer(new_customer(uuid, "gone@example.com"))
            .await?;

        ctx.customers.delete_customer(uuid).await?;

        let result = ctx.customers.get_customer(uuid).await;

        assert!(
            matches!(result, Err(CustomersServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
