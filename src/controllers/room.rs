//! Controllers for room availability and time slots

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use booking::{Booking, generate_time_slots};
use building::OperatingHours;
use common::{DbPool, Error};
use primitive_room::PrimitiveRoom;
use room::{Room, RoomUpdate};
use validator::Validate;

use crate::controllers::booking::{check_booking_length, check_time_range};
use crate::schemas::booking::BookingResponse;
use crate::schemas::room::{
	AvailabilityQuery,
	AvailabilityResponse,
	DateQuery,
	RoomResponse,
	UpdateRoomRequest,
};
use crate::{AdminSession, Config};

/// Check if a room is free for a given date and time range
///
/// Failing to read the existing bookings reports the room as unavailable
#[instrument(skip(pool, config))]
pub(crate) async fn get_room_availability(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	Path(r_id): Path<i32>,
	Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, Error> {
	let range = check_time_range(query.start_time, query.end_time)?;

	check_booking_length(&range, config.max_booking_length)?;

	let conn = pool.get().await?;

	let available = match Booking::is_slot_free(r_id, query.date, range, &conn)
		.await
	{
		Ok(available) => available,
		Err(e) => {
			warn!("could not check availability of room {r_id} -- {e:?}");

			false
		},
	};

	Ok((StatusCode::OK, Json(AvailabilityResponse { available })))
}

/// Get the bookable time slots of a room on a given date
#[instrument(skip(pool))]
pub(crate) async fn get_room_slots(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let room = Room::get_by_id(r_id, &conn).await?;
	let hours = OperatingHours::parse(&room.building.hours);

	let booked = Booking::booked_ranges(r_id, query.date, &conn).await?;

	let slots = generate_time_slots(hours.range(), &booked);

	Ok((StatusCode::OK, Json(slots)))
}

/// Get the confirmed bookings of a room on a given date
#[instrument(skip(pool))]
pub(crate) async fn get_room_bookings(
	State(pool): State<DbPool>,
	Path(r_id): Path<i32>,
	Query(query): Query<DateQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	PrimitiveRoom::get_by_id(r_id, &conn).await?;

	let bookings = Booking::for_room_on_date(r_id, query.date, &conn).await?;
	let response: Vec<BookingResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn update_room(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(r_id): Path<i32>,
	Json(request): Json<UpdateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let room = RoomUpdate::from(request).apply_to(r_id, &conn).await?;

	info!("profile {} updated room {r_id}", session.data.profile_id);

	Ok((StatusCode::OK, Json(RoomResponse::from(room))))
}
