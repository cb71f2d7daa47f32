//! Controllers for room bookings

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use booking::{Booking, NewBooking};
use building::OperatingHours;
use chrono::{Local, NaiveDate, NaiveTime};
use common::{BookingError, DbPool, Error};
use db::BookingStatus;
use primitive_booking::TimeRange;
use room::Room;
use validator::Validate;

use crate::schemas::booking::{
	BookingResponse,
	CreateBookingRequest,
	UpdateBookingStatusRequest,
};
use crate::{AdminSession, Config, Session};

#[instrument(skip(pool, config))]
pub(crate) async fn create_booking(
	State(pool): State<DbPool>,
	State(config): State<Config>,
	session: Session,
	Json(request): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let range = check_time_range(request.start_time, request.end_time)?;

	check_booking_length(&range, config.max_booking_length)?;

	let today = Local::now().date_naive();

	check_booking_date(request.booking_date, today)?;

	let conn = pool.get().await?;

	let room = Room::get_by_id(request.room_id, &conn).await?;

	check_room_open(room.room.available, room.room.id)?;

	let hours = OperatingHours::parse(&room.building.hours);

	check_within_hours(&hours, &range)?;

	let new_booking = NewBooking::new(
		session.data.profile_id,
		&room.room,
		request.booking_date,
		range,
		request.notes,
	);

	let booking = new_booking.insert(&conn).await?;

	Ok((StatusCode::CREATED, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;

	check_owner_or_admin(&session, booking.booking.profile_id)?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn cancel_booking(
	State(pool): State<DbPool>,
	session: Session,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::get_by_id(b_id, &conn).await?;

	check_owner_or_admin(&session, booking.booking.profile_id)?;

	let booking =
		Booking::set_status(b_id, BookingStatus::Cancelled, &conn).await?;

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn update_booking_status(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(b_id): Path<i32>,
	Json(request): Json<UpdateBookingStatusRequest>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let booking = Booking::set_status(b_id, request.status, &conn).await?;

	info!(
		"profile {} set status of booking {b_id} to {}",
		session.data.profile_id,
		request.status.as_str()
	);

	Ok((StatusCode::OK, Json(BookingResponse::from(booking))))
}

#[instrument(skip(pool))]
pub(crate) async fn delete_booking(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(b_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	Booking::delete_by_id(b_id, &conn).await?;

	info!("profile {} deleted booking {b_id}", session.data.profile_id);

	Ok(NoContent)
}

/// Check that a booking ends after it starts, an end of midnight closes the
/// day
pub(crate) fn check_time_range(
	start: NaiveTime,
	end: NaiveTime,
) -> Result<TimeRange, Error> {
	TimeRange::from_times(start, end)
		.ok_or(BookingError::InvalidTimeRange { start, end }.into())
}

pub(crate) fn check_booking_length(
	range: &TimeRange,
	max: i64,
) -> Result<(), Error> {
	if i64::from(range.duration_minutes()) > max {
		return Err(BookingError::TooLong(max).into());
	}

	Ok(())
}

fn check_booking_date(date: NaiveDate, today: NaiveDate) -> Result<(), Error> {
	if date < today {
		return Err(BookingError::InPast(date).into());
	}

	Ok(())
}

fn check_room_open(is_open: bool, room_id: i32) -> Result<(), Error> {
	if !is_open {
		return Err(BookingError::RoomClosed(room_id).into());
	}

	Ok(())
}

fn check_within_hours(
	hours: &OperatingHours,
	range: &TimeRange,
) -> Result<(), Error> {
	if !hours.range().contains(range) {
		return Err(BookingError::OutsideHours {
			open:  hours.opens_at(),
			close: hours.closes_at(),
		}
		.into());
	}

	Ok(())
}

fn check_owner_or_admin(session: &Session, owner_id: i32) -> Result<(), Error> {
	if session.data.profile_id != owner_id && !session.data.profile_is_admin {
		return Err(Error::Forbidden);
	}

	Ok(())
}
