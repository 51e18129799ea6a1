use crate::{
    ApiApplication, Session,
    error::{ApiError, api_error},
    openapi::datetime_schema,
};

use axum::{
    Json,
    extract::{Path, Query, State},
};
use pousada_core::{
    models::{AvailableRoom, RoomAvailability},
    services::availability,
};
use schemars::JsonSchema;
use serde::Deserialize;
use time::OffsetDateTime;

/// The stay to check, as query parameters
#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StayQuery {
    /// The first instant of the stay, RFC3339
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_in: OffsetDateTime,
    /// The first instant after the stay, RFC3339
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_out: OffsetDateTime,
}

#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomPath {
    /// The room to check
    room_id: String,
}

/// Check whether one room is free for a stay.
pub(crate) async fn check_room<T: ApiApplication>(
    State(app): State<T>,
    Session(_): Session,
    Path(RoomPath { room_id }): Path<RoomPath>,
    Query(stay): Query<StayQuery>,
) -> Result<Json<RoomAvailability>, ApiError> {
    let available =
        availability::check_availability(&app, &room_id, stay.check_in, stay.check_out)
            .await
            .map_err(api_error)?;
    Ok(Json(RoomAvailability { room_id, available }))
}

/// Several rooms to check against one stay
#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct RoomsQuery {
    /// The rooms to check; answered in this order
    room_ids: Vec<String>,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_in: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_out: OffsetDateTime,
}

/// Check several rooms for the same stay.
pub(crate) async fn check_rooms<T: ApiApplication>(
    State(app): State<T>,
    Session(_): Session,
    Json(body): Json<RoomsQuery>,
) -> Result<Json<Vec<RoomAvailability>>, ApiError> {
    availability::check_availability_for_multiple_rooms(
        &app,
        &body.room_ids,
        body.check_in,
        body.check_out,
    )
    .await
    .map(Json)
    .map_err(api_error)
}

#[derive(Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct AvailableRoomsQuery {
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_in: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    #[schemars(schema_with = "datetime_schema")]
    check_out: OffsetDateTime,
    /// Comma-separated room types to restrict the listing to, ignoring case
    #[serde(default)]
    room_type: Option<String>,
}

/// List the catalog rooms free for a stay, with the price of the stay.
pub(crate) async fn available_rooms<T: ApiApplication>(
    State(app): State<T>,
    Session(_): Session,
    Query(query): Query<AvailableRoomsQuery>,
) -> Result<Json<Vec<AvailableRoom>>, ApiError> {
    let room_types: Vec<String> = query
        .room_type
        .as_deref()
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|kind| !kind.is_empty())
        .map(str::to_owned)
        .collect();

    availability::available_rooms_for_period(&app, query.check_in, query.check_out, &room_types)
        .await
        .map(Json)
        .map_err(api_error)
}
