//! App Router

use salvo::Router;

use crate::{auth, carts, orders};

/// Authenticated API routes.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("cart")
                .get(carts::get::handler)
                .post(carts::create::handler)
                .push(Router::with_path("confirm").post(carts::confirm::handler))
                .push(Router::with_path("lines/{line}").delete(carts::remove_line::handler))
                .push(
                    Router::with_path("{cart}")
                        .get(carts::show::handler)
                        .put(carts::update::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .push(Router::with_path("customer").get(orders::index::customer_handler))
                .push(Router::with_path("seller").get(orders::index::seller_handler))
                .push(Router::with_path("admin").get(orders::index::admin_handler))
                .push(Router::with_path("{order}/status").patch(orders::status::handler)),
        )
        .push(
            Router::with_path("order-details")
                .push(Router::with_path("customer/{order}").get(orders::details::customer_handler))
                .push(Router::with_path("seller/{order}").get(orders::details::seller_handler)),
        )
}

#[cfg(test)]
mod tests {
    use bazaar_app::{
        auth::{AuthServiceError, Principal},
        domain::{carts::CartsServiceError, checkout::CheckoutServiceError},
    };
    use salvo::{
        affix_state::inject,
        http::header::AUTHORIZATION,
        prelude::*,
        test::TestClient,
    };
    use testresult::TestResult;

    use crate::test_helpers::{Mocks, TEST_CUSTOMER_UUID};

    use super::*;

    fn make_service(mocks: Mocks) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(mocks.into_state()))
                .push(app_router()),
        )
        .catcher(crate::catcher::catcher())
    }

    fn authenticated_customer() -> Mocks {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .returning(|_| Ok(Principal::Customer(TEST_CUSTOMER_UUID)));

        mocks
    }

    #[tokio::test]
    async fn test_routes_require_authentication() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .auth
            .expect_authenticate_bearer()
            .returning(|_| Err(AuthServiceError::NotFound));

        let service = make_service(mocks);

        for path in ["/cart", "/orders/customer", "/orders/admin"] {
            let res = TestClient::get(format!("http://example.com{path}"))
                .add_header(AUTHORIZATION, "Bearer nope", true)
                .send(&service)
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "expected 401 for {path}"
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_is_not_mistaken_for_a_cart_id() -> TestResult {
        let mut mocks = authenticated_customer();

        mocks
            .checkout
            .expect_confirm_cart()
            .once()
            .return_once(|_| Err(CheckoutServiceError::NoActiveCart));

        let res = TestClient::post("http://example.com/cart/confirm")
            .add_header(AUTHORIZATION, "Bearer token", true)
            .send(&make_service(mocks))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_remove_line_route_reaches_cart_service() -> TestResult {
        let mut mocks = authenticated_customer();

        mocks
            .carts
            .expect_remove_line()
            .once()
            .return_once(|_, _| Err(CartsServiceError::LineNotFound));

        let res = TestClient::delete(format!(
            "http://example.com/cart/lines/{}",
            uuid::Uuid::now_v7()
        ))
        .add_header(AUTHORIZATION, "Bearer token", true)
        .send(&make_service(mocks))
        .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
