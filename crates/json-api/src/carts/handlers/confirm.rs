//! Confirm Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::checkout_into_api_error, models::ConfirmationResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    observability::observe_confirmation,
    state::State,
};

/// Confirm Cart Handler
///
/// Splits the active cart into one order per seller. Sellers whose order fails are listed
/// in the response; the other sellers' orders stand.
#[endpoint(tags("cart"), summary = "Confirm Cart", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "cart.confirm",
    skip(depot),
    fields(customer_uuid = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    depot: &mut Depot,
) -> Result<Json<Envelope<ConfirmationResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    tracing::Span::current().record("customer_uuid", tracing::field::display(customer));

    let confirmation = state
        .app
        .checkout
        .confirm_cart(customer)
        .await
        .map_err(checkout_into_api_error)?;

    observe_confirmation(confirmation.orders.len(), confirmation.failures.len());

    if !confirmation.is_complete() {
        tracing::warn!(
            cart_uuid = %confirmation.cart,
            failures = confirmation.failures.len(),
            "cart confirmed with seller failures"
        );
    }

    let message = confirmation.message.clone();

    Ok(Json(Envelope::ok(message, confirmation.into())))
}

#[cfg(test)]
mod tests {
    use bazaar_app::domain::{
        carts::records::CartUuid,
        catalog::records::SellerUuid,
        checkout::{
            CheckoutServiceError,
            models::{Confirmation, SellerFailure, confirmation_message},
        },
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        envelope::ErrorEnvelope,
        test_helpers::{Mocks, TEST_CUSTOMER_UUID, customer_service, seller_service},
    };

    use super::*;

    fn route() -> Router {
        Router::with_path("cart/confirm").post(handler)
    }

    #[tokio::test]
    async fn test_confirm_reports_seller_failures() -> TestResult {
        let cart = CartUuid::new();
        let failures = vec![SellerFailure {
            seller: SellerUuid::new(),
            reason: "insufficient stock".to_string(),
        }];
        let message = confirmation_message(0, &failures);
        let expected = message.clone();

        let mut mocks = Mocks::default();

        mocks
            .checkout
            .expect_confirm_cart()
            .once()
            .withf(|customer| *customer == TEST_CUSTOMER_UUID)
            .return_once(move |_| {
                Ok(Confirmation {
                    cart,
                    message,
                    orders: vec![],
                    failures,
                })
            });

        let mut res = TestClient::post("http://example.com/cart/confirm")
            .send(&customer_service(mocks, route()))
            .await;

        let body: Envelope<ConfirmationResponse> = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.message, expected);
        assert_eq!(body.data.cart, cart.into_uuid());
        assert!(body.data.orders.is_empty(), "no orders were created");
        assert_eq!(body.data.failures.len(), 1, "expected one seller failure");

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_empty_cart_returns_400() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .checkout
            .expect_confirm_cart()
            .once()
            .return_once(|_| Err(CheckoutServiceError::EmptyCart));

        let mut res = TestClient::post("http://example.com/cart/confirm")
            .send(&customer_service(mocks, route()))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert_eq!(body.message, "cart has no lines");

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_without_active_cart_returns_404() -> TestResult {
        let mut mocks = Mocks::default();

        mocks
            .checkout
            .expect_confirm_cart()
            .once()
            .return_once(|_| Err(CheckoutServiceError::NoActiveCart));

        let res = TestClient::post("http://example.com/cart/confirm")
            .send(&customer_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }

    #[tokio::test]
    async fn test_confirm_as_seller_returns_403() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.checkout.expect_confirm_cart().never();

        let res = TestClient::post("http://example.com/cart/confirm")
            .send(&seller_service(mocks, route()))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));

        Ok(())
    }
}
