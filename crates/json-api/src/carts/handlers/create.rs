//! Create Cart Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, oapi::extract::JsonBody, prelude::*};

use crate::{
    carts::{
        errors::into_api_error,
        models::{CartRequest, CartResponse},
    },
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Create Cart Handler
///
/// Creates the customer's active cart from the requested lines.
#[endpoint(
    tags("cart"),
    summary = "Create Cart",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Cart created"),
    ),
)]
#[tracing::instrument(
    name = "cart.create",
    skip(json, depot, res),
    fields(customer_uuid = tracing::field::Empty, lines = tracing::field::Empty),
    err(Debug)
)]
pub(crate) async fn handler(
    json: JsonBody<CartRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("lines", request.lines.len());

    let cart = state
        .app
        .carts
        .create_cart(customer, request.into_lines())
        .await
        .map_err(into_api_error)?;

    res.add_header(LOCATION, format!("/cart/{}", cart.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(Envelope::ok("cart created", cart.into())))
}
