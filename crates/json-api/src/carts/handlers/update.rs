//! Update Cart Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

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

/// Update Cart Handler
///
/// Replaces the lines of the customer's active cart.
#[endpoint(tags("cart"), summary = "Update Cart", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "cart.update",
    skip(cart, json, depot),
    fields(
        customer_uuid = tracing::field::Empty,
        cart_uuid = tracing::field::Empty,
        lines = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    json: JsonBody<CartRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let request = json.into_inner();
    let cart = cart.into_inner();

    let span = tracing::Span::current();

    span.record("customer_uuid", tracing::field::display(customer));
    span.record("cart_uuid", tracing::field::display(cart));
    span.record("lines", request.lines.len());

    let cart = state
        .app
        .carts
        .update_cart(customer, cart.into(), request.into_lines())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok("cart updated", cart.into())))
}
