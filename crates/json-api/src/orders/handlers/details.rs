//! Order Details Handlers

use std::sync::Arc;

use salvo::{oapi::extract::PathParam, prelude::*};
use uuid::Uuid;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    orders::{errors::into_api_error, models::OrderDetailResponse},
    state::State,
};

/// Customer Order Details Handler
///
/// Returns the line snapshots of one of the customer's orders.
#[endpoint(tags("orders"), summary = "Customer Order Details", security(("bearer_auth" = [])))]
pub(crate) async fn customer_handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<OrderDetailResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let customer = depot.customer_or_403()?;

    let details = state
        .app
        .orders
        .customer_order_details(customer, order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(
        "order details",
        details.into_iter().map(Into::into).collect(),
    )))
}

/// Seller Order Details Handler
///
/// Returns the line snapshots of one of the seller's orders.
#[endpoint(tags("orders"), summary = "Seller Order Details", security(("bearer_auth" = [])))]
pub(crate) async fn seller_handler(
    order: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<Envelope<Vec<OrderDetailResponse>>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.seller_or_403()?;

    let details = state
        .app
        .orders
        .seller_order_details(seller, order.into_inner().into())
        .await
        .map_err(into_api_error)?;

    Ok(Json(Envelope::ok(
        "order details",
        details.into_iter().map(Into::into).collect(),
    )))
}
