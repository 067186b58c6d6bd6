//! Order Index Handlers

use std::sync::Arc;

use salvo::{oapi::extract::QueryParam, prelude::*};

use bazaar_app::domain::orders::{models::Page, records::OrderRecord};

use crate::{
    envelope::PageEnvelope,
    errors::ApiError,
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{OrderResponse, page_request},
    },
    state::State,
};

fn into_page_envelope(page: Page<OrderRecord>) -> PageEnvelope<OrderResponse> {
    PageEnvelope {
        success: true,
        message: format!("{} order(s)", page.items.len()),
        data: page.items.into_iter().map(Into::into).collect(),
        total: page.total,
        page: page.page,
        limit: page.limit,
    }
}

/// Customer Orders Handler
///
/// Lists the authenticated customer's orders, newest first.
#[endpoint(tags("orders"), summary = "List Customer Orders", security(("bearer_auth" = [])))]
pub(crate) async fn customer_handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<PageEnvelope<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let orders = state
        .app
        .orders
        .list_customer_orders(customer, page_request(page.into_inner(), limit.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(into_page_envelope(orders)))
}

/// Seller Orders Handler
///
/// Lists the authenticated seller's orders, newest first.
#[endpoint(tags("orders"), summary = "List Seller Orders", security(("bearer_auth" = [])))]
pub(crate) async fn seller_handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<PageEnvelope<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.seller_or_403()?;

    let orders = state
        .app
        .orders
        .list_seller_orders(seller, page_request(page.into_inner(), limit.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(into_page_envelope(orders)))
}

/// Admin Orders Handler
///
/// Lists every order, newest first.
#[endpoint(tags("orders"), summary = "List All Orders", security(("bearer_auth" = [])))]
pub(crate) async fn admin_handler(
    page: QueryParam<u32, false>,
    limit: QueryParam<u32, false>,
    depot: &mut Depot,
) -> Result<Json<PageEnvelope<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    depot.admin_or_403()?;

    let orders = state
        .app
        .orders
        .list_all_orders(page_request(page.into_inner(), limit.into_inner()))
        .await
        .map_err(into_api_error)?;

    Ok(Json(into_page_envelope(orders)))
}

#[cfg(test)]
mod tests {
    use bazaar_app::{
        auth::{AdminUuid, Principal},
        domain::orders::{
            OrdersServiceError,
            data::PageRequest,
            records::{OrderStatus, OrderUuid},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::handlers::tests::make_order,
        test_helpers::{
            Mocks, TEST_CUSTOMER_UUID, TEST_SELLER_UUID, customer_service, seller_service,
            service_as,
        },
    };

    use super::*;

    #[tokio::test]
    async fn test_customer_orders_are_paginated() -> TestResult {
        let first = OrderUuid::new();
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .withf(|customer, page| {
                *customer == TEST_CUSTOMER_UUID && *page == PageRequest::new(2, 1)
            })
            .return_once(move |_, page| {
                Ok(Page::new(vec![make_order(first, OrderStatus::Pending)], 3, page))
            });

        let mut res = TestClient::get("http://example.com/orders/customer?page=2&limit=1")
            .send(&customer_service(
                mocks,
                Router::with_path("orders/customer").get(customer_handler),
            ))
            .await;

        let body: PageEnvelope<OrderResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.total, 3);
        assert_eq!(body.page, 2);
        assert_eq!(body.limit, 1);
        assert_eq!(body.data.len(), 1, "expected a single order");
        assert_eq!(
            body.data.first().map(|order| order.status.as_str()),
            Some("pending")
        );

        Ok(())
    }

    #[tokio::test]
    async fn test_customer_orders_default_to_first_page() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_customer_orders()
            .once()
            .withf(|_, page| *page == PageRequest::default())
            .return_once(|_, page| Ok(Page::new(vec![], 0, page)));

        let res = TestClient::get("http://example.com/orders/customer")
            .send(&customer_service(
                mocks,
                Router::with_path("orders/customer").get(customer_handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_invalid_page_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_seller_orders()
            .once()
            .return_once(|_, _| Err(OrdersServiceError::InvalidPage));

        let res = TestClient::get("http://example.com/orders/seller?limit=500")
            .send(&seller_service(
                mocks,
                Router::with_path("orders/seller").get(seller_handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));

        Ok(())
    }

    #[tokio::test]
    async fn test_seller_orders_are_scoped_to_the_seller() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_seller_orders()
            .once()
            .withf(|seller, _| *seller == TEST_SELLER_UUID)
            .return_once(|_, page| Ok(Page::new(vec![], 0, page)));

        let res = TestClient::get("http://example.com/orders/seller")
            .send(&seller_service(
                mocks,
                Router::with_path("orders/seller").get(seller_handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_orders_require_admin() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.orders.expect_list_all_orders().never();

        let res = TestClient::get("http://example.com/orders/admin")
            .send(&customer_service(
                mocks,
                Router::with_path("orders/admin").get(admin_handler),
            ))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn test_admin_sees_all_orders() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .orders
            .expect_list_all_orders()
            .once()
            .return_once(|page| {
                Ok(Page::new(
                    vec![
                        make_order(OrderUuid::new(), OrderStatus::Shipped),
                        make_order(OrderUuid::new(), OrderStatus::Pending),
                    ],
                    2,
                    page,
                ))
            });

        let body: PageEnvelope<OrderResponse> = TestClient::get("http://example.com/orders/admin")
            .send(&service_as(
                Principal::Admin(AdminUuid::new()),
                mocks,
                Router::with_path("orders/admin").get(admin_handler),
            ))
            .await
            .take_json()
            .await?;

        assert_eq!(body.total, 2);
        assert_eq!(body.data.len(), 2, "expected both orders");

        Ok(())
    }
}
