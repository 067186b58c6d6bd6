//! Test helpers.

use std::sync::Arc;

use bazaar_app::{
    auth::{MockAuthService, Principal},
    context::AppContext,
    domain::{
        carts::MockCartsService, catalog::MockCatalogService, catalog::records::SellerUuid,
        checkout::MockCheckoutService, customers::MockCustomersService,
        customers::records::CustomerUuid, orders::MockOrdersService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{catcher::catcher, extensions::*, state::State};

pub(crate) const TEST_CUSTOMER_UUID: CustomerUuid =
    CustomerUuid::from_uuid(Uuid::from_u128(0x0196_0000_0000_7000_8000_0000_0000_0001));

pub(crate) const TEST_SELLER_UUID: SellerUuid =
    SellerUuid::from_uuid(Uuid::from_u128(0x0196_0000_0000_7000_8000_0000_0000_0002));

/// Service mocks; any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub customers: MockCustomersService,
    pub catalog: MockCatalogService,
    pub carts: MockCartsService,
    pub checkout: MockCheckoutService,
    pub orders: MockOrdersService,
    pub auth: MockAuthService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            customers: Arc::new(self.customers),
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

/// Stand-in for the auth middleware.
#[derive(Debug, Clone, Copy)]
pub(crate) struct InjectPrincipal(pub Principal);

#[handler]
impl InjectPrincipal {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        depot.insert_principal(self.0);
        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}

pub(crate) fn service_as(principal: Principal, mocks: Mocks, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(mocks.into_state()))
            .hoop(InjectPrincipal(principal))
            .push(route),
    )
    .catcher(catcher())
}

pub(crate) fn customer_service(mocks: Mocks, route: Router) -> Service {
    service_as(Principal::Customer(TEST_CUSTOMER_UUID), mocks, route)
}

pub(crate) fn seller_service(mocks: Mocks, route: Router) -> Service {
    service_as(Principal::Seller(TEST_SELLER_UUID), mocks, route)
}
