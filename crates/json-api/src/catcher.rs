//! Error Catcher

use salvo::{catcher::Catcher, http::ResBody, prelude::*};

use crate::envelope::ErrorEnvelope;

/// Catcher that renders unhandled error statuses (extractor failures, unknown routes,
/// unsupported methods) as an error envelope.
pub(crate) fn catcher() -> Catcher {
    Catcher::default().hoop(envelope_errors)
}

#[handler]
async fn envelope_errors(res: &mut Response, ctrl: &mut FlowCtrl) {
    let Some(status) = res.status_code else {
        return;
    };

    if !status.is_client_error() && !status.is_server_error() {
        return;
    }

    let message = match res.replace_body(ResBody::None) {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief,
        _ => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_lowercase(),
    };

    res.status_code(status);
    res.render(Json(ErrorEnvelope::new(message)));

    ctrl.skip_rest();
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;

    use crate::{
        carts,
        errors::ApiError,
        test_helpers::{Mocks, customer_service},
    };

    use super::*;

    #[handler]
    async fn always_forbidden() -> Result<&'static str, ApiError> {
        Err(ApiError::forbidden("not your cart"))
    }

    #[tokio::test]
    async fn test_malformed_body_renders_error_envelope() -> TestResult {
        let mut mocks = Mocks::default();

        mocks.carts.expect_create_cart().never();

        let mut res = TestClient::post("http://example.com/cart")
            .json(&json!({ "lines": [{ "listing": "not-a-uuid", "quantity": -1 }] }))
            .send(&customer_service(
                mocks,
                Router::with_path("cart").post(carts::create::handler),
            ))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
        assert!(!body.success, "expected failure envelope");
        assert!(!body.message.is_empty(), "expected an error message");
        assert!(body.data.is_none(), "expected null data");

        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_renders_error_envelope() -> TestResult {
        let mut res = TestClient::get("http://example.com/nowhere")
            .send(&customer_service(
                Mocks::default(),
                Router::with_path("cart").get(always_forbidden),
            ))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));
        assert!(!body.success, "expected failure envelope");

        Ok(())
    }

    #[tokio::test]
    async fn test_handler_errors_pass_through_unchanged() -> TestResult {
        let mut res = TestClient::get("http://example.com/cart")
            .send(&customer_service(
                Mocks::default(),
                Router::with_path("cart").get(always_forbidden),
            ))
            .await;

        let body: ErrorEnvelope = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::FORBIDDEN));
        assert_eq!(body.message, "not your cart");

        Ok(())
    }
}
