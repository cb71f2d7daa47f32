#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::room;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = room)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveRoom {
	pub id:          i32,
	pub building_id: i32,
	pub room_name:   String,
	pub capacity:    i32,
	pub floor:       String,
	/// Whether the room is open for use, independent of any bookings
	pub available:   bool,
	pub created_at:  NaiveDateTime,
	pub updated_at:  NaiveDateTime,
}

impl PrimitiveRoom {
	/// Get a [`PrimitiveRoom`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(r_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let room = conn
			.interact(move |conn| {
				use self::room::dsl::*;

				room.find(r_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(room)
	}
}
