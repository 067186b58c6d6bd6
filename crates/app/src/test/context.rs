//! Test context for service-level integration tests.

use crate::{
    auth::PgAuthService,
    database::Db,
    domain::{
        carts::PgCartsService, catalog::PgCatalogService, checkout::PgCheckoutService,
        customers::PgCustomersService, orders::PgOrdersService,
    },
};

use super::db::TestDb;

pub(crate) struct TestContext {
    pub test_db: TestDb,
    pub db: Db,
    pub customers: PgCustomersService,
    pub catalog: PgCatalogService,
    pub carts: PgCartsService,
    pub checkout: PgCheckoutService,
    pub orders: PgOrdersService,
    pub auth: PgAuthService,
}

impl TestContext {
    pub async fn new() -> Self {
        let test_db = TestDb::new().await;
        let db = Db::new(test_db.pool().clone());

        Self {
            customers: PgCustomersService::new(db.clone()),
            catalog: PgCatalogService::new(db.clone()),
            carts: PgCartsService::new(db.clone()),
            checkout: PgCheckoutService::new(db.clone()),
            orders: PgOrdersService::new(db.clone()),
            auth: PgAuthService::new(db.clone()),
            db,
            test_db,
        }
    }
}
