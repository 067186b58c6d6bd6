//! Remove Cart Line Handler

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

/// Remove Cart Line Handler
///
/// Removes one line from the customer's active cart and returns the repriced cart.
#[endpoint(tags("cart"), summary = "Remove Cart Line", security(("bearer_auth" = [])))]
pub(crate) async fn handler(
    line: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<CartResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;
    let line = line.into_inner();

    let cart = state
        .app
        .carts
        .remove_line(customer, line.into())
        .await
        .map_err(into_api_error)?;

    tracing::info!(line_uuid = %line, cart_uuid = %cart.uuid, "removed cart line");

    Ok(Json(Envelope::ok("cart line removed", cart.into())))
}
