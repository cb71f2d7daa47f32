#[macro_use]
extern crate tracing;

use std::collections::HashSet;

use chrono::{NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{BookingStatus, booking, building, room};
use diesel::pg::Pg;
use diesel::prelude::*;
use primitive_building::PrimitiveBuilding;
use primitive_room::PrimitiveRoom;
use serde::{Deserialize, Serialize};

pub type JoinedRoomData = (PrimitiveRoom, PrimitiveBuilding);

/// A room together with the building it is in
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Room {
	pub room:     PrimitiveRoom,
	pub building: PrimitiveBuilding,
}

impl Room {
	fn from_joined(data: JoinedRoomData) -> Self {
		Self { room: data.0, building: data.1 }
	}

	/// Get a [`Room`] and its building given the room id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let room = conn
			.interact(move |conn| {
				room::table
					.inner_join(building::table)
					.filter(room::id.eq(r_id))
					.select((
						PrimitiveRoom::as_select(),
						PrimitiveBuilding::as_select(),
					))
					.get_result(conn)
			})
			.await??;

		Ok(Self::from_joined(room))
	}

	/// Get all the rooms of a building ordered by floor and name
	#[instrument(skip(conn))]
	pub async fn for_building(
		b_id: i32,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveRoom>, Error> {
		let rooms = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				room.filter(building_id.eq(b_id))
					.order((floor.asc(), room_name.asc()))
					.select(PrimitiveRoom::as_select())
					.load(conn)
			})
			.await??;

		Ok(rooms)
	}

	/// Get all the rooms of the given buildings
	#[instrument(skip(conn))]
	pub async fn for_buildings(
		b_ids: Vec<i32>,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveRoom>, Error> {
		let rooms = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				room.filter(building_id.eq_any(b_ids))
					.order((floor.asc(), room_name.asc()))
					.select(PrimitiveRoom::as_select())
					.load(conn)
			})
			.await??;

		Ok(rooms)
	}

	/// Get the ids of all rooms that have a confirmed booking covering the
	/// given moment
	#[instrument(skip(conn))]
	pub async fn occupied_at(
		moment: NaiveDateTime,
		conn: &DbConn,
	) -> Result<HashSet<i32>, Error> {
		let date = moment.date();
		let time = moment.time();

		let ids: Vec<i32> = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				booking
					.filter(status.eq(BookingStatus::Confirmed))
					.filter(booking_date.eq(date))
					.filter(start_time.le(time))
					.filter(
						end_time.gt(time).or(end_time.eq(NaiveTime::default())),
					)
					.select(room_id)
					.distinct()
					.load(conn)
			})
			.await??;

		Ok(ids.into_iter().collect())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct NewRoom {
	pub building_id: i32,
	pub room_name:   String,
	pub capacity:    i32,
	pub floor:       String,
	pub available:   bool,
}

impl NewRoom {
	/// Insert this [`NewRoom`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<PrimitiveRoom, Error> {
		let room = conn
			.interact(|conn| {
				use self::room::dsl::*;

				diesel::insert_into(room)
					.values(self)
					.returning(PrimitiveRoom::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created room {room:?}");

		Ok(room)
	}

	/// Insert a list of [`NewRoom`]s in one go
	#[instrument(skip(conn))]
	pub async fn bulk_insert(
		rooms: Vec<Self>,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveRoom>, Error> {
		let rooms = conn
			.interact(|conn| {
				use self::room::dsl::*;

				diesel::insert_into(room)
					.values(rooms)
					.returning(PrimitiveRoom::as_returning())
					.get_results(conn)
			})
			.await??;

		info!("created {} rooms", rooms.len());

		Ok(rooms)
	}
}

#[derive(AsChangeset, Clone, Debug, Default, Deserialize, Serialize)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct RoomUpdate {
	pub room_name: Option<String>,
	pub capacity:  Option<i32>,
	pub floor:     Option<String>,
	pub available: Option<bool>,
}

impl RoomUpdate {
	fn is_empty(&self) -> bool {
		self.room_name.is_none()
			&& self.capacity.is_none()
			&& self.floor.is_none()
			&& self.available.is_none()
	}

	/// Apply this update to the room with the given id
	#[instrument(skip(conn))]
	pub async fn apply_to(
		self,
		r_id: i32,
		conn: &DbConn,
	) -> Result<PrimitiveRoom, Error> {
		if self.is_empty() {
			return PrimitiveRoom::get_by_id(r_id, conn).await;
		}

		let room = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				diesel::update(room.find(r_id))
					.set(self)
					.returning(PrimitiveRoom::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("updated room {room:?}");

		Ok(room)
	}
}
