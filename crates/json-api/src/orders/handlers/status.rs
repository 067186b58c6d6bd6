//! Order Status Handler

use std::sync::Arc;

use salvo::{
    oapi::extract::{JsonBody, PathParam},
    prelude::*,
};
use uuid::Uuid;

use bazaar_app::domain::orders::records::OrderStatus;

use crate::{
    envelope::Envelope,
    errors::ApiError,
    extensions::*,
    orders::{
        errors::into_api_error,
        models::{OrderResponse, OrderStatusRequest},
    },
    state::State,
};

/// Order Status Handler
///
/// Moves one of the seller's orders to the next status.
#[endpoint(tags("orders"), summary = "Advance Order Status", security(("bearer_auth" = [])))]
#[tracing::instrument(
    name = "orders.status",
    skip(order, json, depot),
    fields(
        seller_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty,
        status = tracing::field::Empty
    ),
    err(Debug)
)]
pub(crate) async fn handler(
    order: PathParam<Uuid>,
    json: JsonBody<OrderStatusRequest>,
    depot: &mut Depot,
) -> Result<Json<Envelope<OrderResponse>>, ApiError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let seller = depot.seller_or_403()?;
    let order = order.into_inner();

    let status = json
        .into_inner()
        .status
        .parse::<OrderStatus>()
        .map_err(|error| ApiError::bad_request(error.to_string()))?;

    let span = tracing::Span::current();

    span.record("seller_uuid", tracing::field::display(seller));
    span.record("order_uuid", tracing::field::display(order));
    span.record("status", status.as_str());

    let updated = state
        .app
        .orders
        .advance_status(seller, order.into(), status)
        .await
        .map_err(into_api_error)?;

    tracing::info!(order_uuid = %order, status = %updated.status, "advanced order status");

    Ok(Json(Envelope::ok("order status updated", updated.into())))
}
