#[macro_use]
extern crate tracing;

use chrono::NaiveDateTime;
use common::{DbConn, Error};
use db::building;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = building)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveBuilding {
	pub id:         i32,
	pub name:       String,
	pub category:   String,
	pub sub_area:   String,
	pub latitude:   f64,
	pub longitude:  f64,
	pub hours:      String,
	pub created_at: NaiveDateTime,
	pub updated_at: NaiveDateTime,
}

impl PrimitiveBuilding {
	/// Get a [`PrimitiveBuilding`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let building = conn
			.interact(move |conn| {
				use self::building::dsl::*;

				building.find(b_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(building)
	}

	/// Get all [`PrimitiveBuilding`]s ordered by name
	#[instrument(skip(conn))]
	pub async fn get_all(conn: &DbConn) -> Result<Vec<Self>, Error> {
		let buildings = conn
			.interact(|conn| {
				use self::building::dsl::*;

				building.order(name.asc()).select(Self::as_select()).load(conn)
			})
			.await??;

		Ok(buildings)
	}
}
