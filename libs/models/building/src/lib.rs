#[macro_use]
extern crate tracing;

use std::collections::{BTreeMap, HashSet};

use ::room::Room;
use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::building;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::Bool;
use models_common::{BoxedCondition, ToFilter};
use primitive_building::PrimitiveBuilding;
use primitive_room::PrimitiveRoom;
use serde::{Deserialize, Serialize};

mod hours;
mod status;

pub use hours::*;
pub use status::*;

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingFilter {
	pub category: Option<String>,
	pub sub_area: Option<String>,
}

impl<S> ToFilter<S> for BuildingFilter
where
	S: 'static,
	building::category: SelectableExpression<S>,
	building::sub_area: SelectableExpression<S>,
{
	type SqlType = Bool;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType> {
		let mut filter: BoxedCondition<S, Self::SqlType> =
			Box::new(true.into_sql::<Bool>());

		if let Some(category) = self.category.clone() {
			filter = Box::new(filter.and(building::category.eq(category)));
		}

		if let Some(sub_area) = self.sub_area.clone() {
			filter = Box::new(filter.and(building::sub_area.eq(sub_area)));
		}

		filter
	}
}

/// Whether a room can be walked into right now
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoomStatus {
	Available,
	InUse,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RoomState {
	pub room:         PrimitiveRoom,
	pub is_available: bool,
	pub status:       RoomStatus,
}

impl RoomState {
	/// A room is available when it is open and nobody has booked it for the
	/// current moment
	#[must_use]
	pub fn new(room: PrimitiveRoom, occupied: &HashSet<i32>) -> Self {
		let is_available = room.available && !occupied.contains(&room.id);
		let status = if is_available {
			RoomStatus::Available
		} else {
			RoomStatus::InUse
		};

		Self { room, is_available, status }
	}
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Floor {
	pub label: String,
	pub rooms: Vec<RoomState>,
}

/// A building along with the live availability of its rooms
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Building {
	pub building:        PrimitiveBuilding,
	pub opens_at:        String,
	pub closes_at:       String,
	pub total_rooms:     usize,
	pub available_rooms: usize,
	pub status:          AvailabilityStatus,
	pub floors:          Vec<Floor>,
}

impl Building {
	/// Aggregate a building from its rooms and the set of rooms that are
	/// booked at this moment
	#[must_use]
	pub fn from_parts(
		building: PrimitiveBuilding,
		rooms: Vec<PrimitiveRoom>,
		occupied: &HashSet<i32>,
	) -> Self {
		let hours = OperatingHours::parse(&building.hours);

		let rooms: Vec<RoomState> =
			rooms.into_iter().map(|r| RoomState::new(r, occupied)).collect();

		let total_rooms = rooms.len();
		let available_rooms = rooms.iter().filter(|r| r.is_available).count();
		let status =
			AvailabilityStatus::from_counts(available_rooms, total_rooms);

		Self {
			building,
			opens_at: hours.opens_at(),
			closes_at: hours.closes_at(),
			total_rooms,
			available_rooms,
			status,
			floors: group_by_floor(rooms),
		}
	}

	/// Get all [`Building`]s matching the given filter, ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(
		b_filter: BuildingFilter,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let buildings = conn
			.interact(move |conn| {
				use self::building::dsl::*;

				building
					.filter(b_filter.to_filter())
					.order(name.asc())
					.select(PrimitiveBuilding::as_select())
					.load(conn)
			})
			.await??;

		let ids = buildings.iter().map(|b| b.id).collect();
		let rooms = Room::for_buildings(ids, conn).await?;
		let occupied = Room::occupied_at(now, conn).await?;

		let mut by_building: BTreeMap<i32, Vec<PrimitiveRoom>> =
			BTreeMap::new();

		for room in rooms {
			by_building.entry(room.building_id).or_default().push(room);
		}

		let buildings = buildings
			.into_iter()
			.map(|b| {
				let rooms = by_building.remove(&b.id).unwrap_or_default();

				Self::from_parts(b, rooms, &occupied)
			})
			.collect();

		Ok(buildings)
	}

	/// Get a single [`Building`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(
		b_id: i32,
		now: NaiveDateTime,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let building = PrimitiveBuilding::get_by_id(b_id, conn).await?;
		let rooms = Room::for_building(b_id, conn).await?;
		let occupied = Room::occupied_at(now, conn).await?;

		Ok(Self::from_parts(building, rooms, &occupied))
	}
}

/// Group rooms by floor, floors ordered by their numeric label with
/// non-numeric labels counting as floor 0, rooms ordered by name
fn group_by_floor(rooms: Vec<RoomState>) -> Vec<Floor> {
	let mut floors: Vec<Floor> = vec![];

	for room in rooms {
		match floors.iter_mut().find(|f| f.label == room.room.floor) {
			Some(floor) => floor.rooms.push(room),
			None => {
				floors.push(Floor {
					label: room.room.floor.clone(),
					rooms: vec![room],
				});
			},
		}
	}

	for floor in &mut floors {
		floor.rooms.sort_by(|a, b| a.room.room_name.cmp(&b.room.room_name));
	}

	floors.sort_by_key(|f| f.label.trim().parse::<i32>().unwrap_or(0));

	floors
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = building)]
#[diesel(check_for_backend(Pg))]
pub struct NewBuilding {
	pub name:      String,
	pub category:  String,
	pub sub_area:  String,
	pub latitude:  f64,
	pub longitude: f64,
	pub hours:     String,
}

impl NewBuilding {
	/// Insert this [`NewBuilding`]
	#[instrument(skip(conn))]
	pub async fn insert(
		self,
		conn: &DbConn,
	) -> Result<PrimitiveBuilding, Error> {
		let building = conn
			.interact(|conn| {
				use self::building::dsl::*;

				diesel::insert_into(building)
					.values(self)
					.returning(PrimitiveBuilding::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created building {} with id {}", building.name, building.id);

		Ok(building)
	}
}
