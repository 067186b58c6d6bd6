//! Show Cart Handler

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Show Cart Handler
///
/// Returns one of the customer's carts, active or not.
#[endpoint(tags("cart"), summary = "Get Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    cart: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let cart = state
        .app
        .carts
        .get_cart(customer, cart.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok("cart", cart.into())))
}
