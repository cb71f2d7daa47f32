#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use common::{DbConn, Error};
use db::{BookingStatus, booking};
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

mod range;

pub use range::*;

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveBooking {
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
}

impl PrimitiveBooking {
	/// The span of the day this booking covers
	#[must_use]
	pub fn time_range(&self) -> Option<TimeRange> {
		TimeRange::from_times(self.start_time, self.end_time)
	}

	/// Get a [`PrimitiveBooking`] by its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let booking = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				booking.find(b_id).select(Self::as_select()).get_result(conn)
			})
			.await??;

		Ok(booking)
	}
}
