use building::{AvailabilityStatus, Building, Floor, NewBuilding};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utils::{Coordinates, HasDistance, format_distance};
use validator_derive::Validate;

use crate::schemas::room::RoomStateResponse;

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FloorResponse {
	pub label: String,
	pub rooms: Vec<RoomStateResponse>,
}

impl From<Floor> for FloorResponse {
	fn from(value: Floor) -> Self {
		Self {
			label: value.label,
			rooms: value.rooms.into_iter().map(Into::into).collect(),
		}
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingResponse {
	pub id:              i32,
	pub name:            String,
	pub category:        String,
	pub sub_area:        String,
	pub latitude:        f64,
	pub longitude:       f64,
	pub hours:           String,
	pub opens_at:        String,
	pub closes_at:       String,
	pub total_rooms:     usize,
	pub available_rooms: usize,
	pub status:          AvailabilityStatus,
	pub floors:          Vec<FloorResponse>,
	pub distance:        Option<f64>,
	pub distance_label:  Option<String>,
	pub created_at:      NaiveDateTime,
	pub updated_at:      NaiveDateTime,
}

impl BuildingResponse {
	/// Build a response for a building, including how far away it is when
	/// the position of the user is known
	#[must_use]
	pub fn new(value: Building, origin: Option<Coordinates>) -> Self {
		let b = value.building;

		let distance = origin.map(|o| {
			o.distance_to(&Coordinates::new(b.latitude, b.longitude))
		});

		Self {
			id:              b.id,
			name:            b.name,
			category:        b.category,
			sub_area:        b.sub_area,
			latitude:        b.latitude,
			longitude:       b.longitude,
			hours:           b.hours,
			opens_at:        value.opens_at,
			closes_at:       value.closes_at,
			total_rooms:     value.total_rooms,
			available_rooms: value.available_rooms,
			status:          value.status,
			floors:          value.floors.into_iter().map(Into::into).collect(),
			distance,
			distance_label:  distance.map(format_distance),
			created_at:      b.created_at,
			updated_at:      b.updated_at,
		}
	}
}

impl HasDistance for BuildingResponse {
	fn distance(&self) -> Option<f64> { self.distance }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBuildingRequest {
	#[validate(length(
		min = 1,
		max = 128,
		message = "name must be between 1 and 128 characters long",
		code = "name-length"
	))]
	pub name:      String,
	#[validate(length(
		min = 1,
		max = 64,
		message = "category must be between 1 and 64 characters long",
		code = "category-length"
	))]
	pub category:  String,
	#[validate(length(
		min = 1,
		max = 64,
		message = "sub area must be between 1 and 64 characters long",
		code = "sub-area-length"
	))]
	pub sub_area:  String,
	#[validate(range(
		min = -90.0,
		max = 90.0,
		message = "latitude must be between -90 and 90",
		code = "latitude-range"
	))]
	pub latitude:  f64,
	#[validate(range(
		min = -180.0,
		max = 180.0,
		message = "longitude must be between -180 and 180",
		code = "longitude-range"
	))]
	pub longitude: f64,
	#[serde(default = "default_hours")]
	pub hours:     String,
}

fn default_hours() -> String { "8 AM - 10 PM".to_string() }

impl From<CreateBuildingRequest> for NewBuilding {
	fn from(value: CreateBuildingRequest) -> Self {
		Self {
			name:      value.name,
			category:  value.category,
			sub_area:  value.sub_area,
			latitude:  value.latitude,
			longitude: value.longitude,
			hours:     value.hours,
		}
	}
}
