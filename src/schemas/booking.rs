use booking::{Booking, BookingScope};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use db::BookingStatus;
use primitive_booking::PrimitiveBooking;
use primitive_building::PrimitiveBuilding;
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

use crate::schemas::room::RoomResponse;

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
	pub room_id:      i32,
	pub booking_date: NaiveDate,
	pub start_time:   NaiveTime,
	pub end_time:     NaiveTime,
	#[validate(length(
		max = 500,
		message = "notes can be at most 500 characters long",
		code = "notes-length"
	))]
	pub notes:        Option<String>,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct UpdateBookingStatusRequest {
	pub status: BookingStatus,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
pub struct BookingScopeQuery {
	#[serde(default)]
	pub scope: BookingScope,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingSummary {
	pub id:        i32,
	pub name:      String,
	pub latitude:  f64,
	pub longitude: f64,
	pub hours:     String,
}

impl From<PrimitiveBuilding> for BuildingSummary {
	fn from(value: PrimitiveBuilding) -> Self {
		Self {
			id:        value.id,
			name:      value.name,
			latitude:  value.latitude,
			longitude: value.longitude,
			hours:     value.hours,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
	pub id:               i32,
	pub profile_id:       i32,
	pub room_id:          i32,
	pub building_id:      i32,
	pub booking_date:     NaiveDate,
	pub start_time:       NaiveTime,
	pub end_time:         NaiveTime,
	pub duration_minutes: i32,
	pub status:           BookingStatus,
	pub notes:            Option<String>,
	pub created_at:       NaiveDateTime,
	pub updated_at:       NaiveDateTime,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub room:             Option<RoomResponse>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub building:         Option<BuildingSummary>,
}

impl From<PrimitiveBooking> for BookingResponse {
	fn from(value: PrimitiveBooking) -> Self {
		Self {
			id:               value.id,
			profile_id:       value.profile_id,
			room_id:          value.room_id,
			building_id:      value.building_id,
			booking_date:     value.booking_date,
			start_time:       value.start_time,
			end_time:         value.end_time,
			duration_minutes: value.duration_minutes,
			status:           value.status,
			notes:            value.notes,
			created_at:       value.created_at,
			updated_at:       value.updated_at,
			room:             None,
			building:         None,
		}
	}
}

impl From<Booking> for BookingResponse {
	fn from(value: Booking) -> Self {
		let mut response = Self::from(value.booking);

		response.room = Some(value.room.into());
		response.building = Some(value.building.into());

		response
	}
}
