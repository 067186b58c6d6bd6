//! Get Active Cart Handler

use std::sync::Arc;

use salvo::prelude::*;

use crate::{
    carts::{errors::into_api_error, models::CartResponse},
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    state::State,
};

/// Get Active Cart Handler
///
/// Returns the customer's active cart with freshly computed prices.
#[endpoint(tags("cart"), summary = "Get Active Cart", security(("bearer_auth" = [])))]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let cart = state
        .app
        .carts
        .get_active_cart(customer)
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok("active cart", cart.into())))
}
