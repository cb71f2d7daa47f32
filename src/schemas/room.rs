use building::{RoomState, RoomStatus};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use primitive_room::PrimitiveRoom;
use room::{NewRoom, RoomUpdate};
use serde::{Deserialize, Serialize};
use validator_derive::Validate;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
	pub id:          i32,
	pub building_id: i32,
	pub room_name:   String,
	pub capacity:    i32,
	pub floor:       String,
	pub is_open:     bool,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl From<PrimitiveRoom> for RoomResponse {
	fn from(value: PrimitiveRoom) -> Self {
		Self {
			id:          value.id,
			building_id: value.building_id,
			room_name:   value.room_name,
			capacity:    value.capacity,
			floor:       value.floor,
			is_open:     value.available,
			created_at:  value.created_at,
			updated_at:  value.updated_at,
		}
	}
}

/// A room as seen in a building overview
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomStateResponse {
	pub id:           i32,
	pub room_name:    String,
	pub capacity:     i32,
	pub floor:        String,
	pub is_open:      bool,
	pub is_available: bool,
	pub status:       RoomStatus,
}

impl From<RoomState> for RoomStateResponse {
	fn from(value: RoomState) -> Self {
		Self {
			id:           value.room.id,
			room_name:    value.room.room_name,
			capacity:     value.room.capacity,
			floor:        value.room.floor,
			is_open:      value.room.available,
			is_available: value.is_available,
			status:       value.status,
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
	#[validate(length(
		min = 1,
		max = 64,
		message = "room name must be between 1 and 64 characters long",
		code = "room-name-length"
	))]
	pub room_name: String,
	#[validate(range(
		min = 1,
		max = 1000,
		message = "capacity must be between 1 and 1000",
		code = "capacity-range"
	))]
	pub capacity:  i32,
	#[validate(length(
		min = 1,
		max = 16,
		message = "floor must be between 1 and 16 characters long",
		code = "floor-length"
	))]
	pub floor:     String,
	#[serde(default = "default_open")]
	pub is_open:   bool,
}

const fn default_open() -> bool { true }

impl CreateRoomRequest {
	#[must_use]
	pub fn into_new_room(self, building_id: i32) -> NewRoom {
		NewRoom {
			building_id,
			room_name: self.room_name,
			capacity: self.capacity,
			floor: self.floor,
			available: self.is_open,
		}
	}
}

#[derive(Clone, Debug, Default, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
	#[validate(length(
		min = 1,
		max = 64,
		message = "room name must be between 1 and 64 characters long",
		code = "room-name-length"
	))]
	pub room_name: Option<String>,
	#[validate(range(
		min = 1,
		max = 1000,
		message = "capacity must be between 1 and 1000",
		code = "capacity-range"
	))]
	pub capacity:  Option<i32>,
	#[validate(length(
		min = 1,
		max = 16,
		message = "floor must be between 1 and 16 characters long",
		code = "floor-length"
	))]
	pub floor:     Option<String>,
	pub is_open:   Option<bool>,
}

impl From<UpdateRoomRequest> for RoomUpdate {
	fn from(value: UpdateRoomRequest) -> Self {
		Self {
			room_name: value.room_name,
			capacity:  value.capacity,
			floor:     value.floor,
			available: value.is_open,
		}
	}
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
	pub date:       NaiveDate,
	pub start_time: NaiveTime,
	pub end_time:   NaiveTime,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct AvailabilityResponse {
	pub available: bool,
}

#[derive(Clone, Copy, Debug, Deserialize, Serialize)]
pub struct DateQuery {
	pub date: NaiveDate,
}
