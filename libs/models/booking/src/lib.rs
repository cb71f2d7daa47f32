#[macro_use]
extern crate tracing;

use chrono::{NaiveDate, NaiveTime};
use common::{BookingError, DbConn, Error};
use db::{BookingStatus, booking, building, room};
use diesel::pg::Pg;
use diesel::prelude::*;
use primitive_booking::{PrimitiveBooking, TimeRange};
use primitive_building::PrimitiveBuilding;
use primitive_room::PrimitiveRoom;
use serde::{Deserialize, Serialize};

mod slot;

pub use slot::*;

pub type JoinedBookingData =
	(PrimitiveBooking, PrimitiveRoom, PrimitiveBuilding);

/// Check that `range` does not overlap any of the `booked` ranges
#[must_use]
pub fn is_free(range: &TimeRange, booked: &[TimeRange]) -> bool {
	!booked.iter().any(|b| b.overlaps(range))
}

/// Which bookings of a profile to list
#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
	#[default]
	All,
	Upcoming,
	Past,
}

/// A booking along with the room and building it is for
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Booking {
	pub booking:  PrimitiveBooking,
	pub room:     PrimitiveRoom,
	pub building: PrimitiveBuilding,
}

impl Booking {
	/// Build a query with all required joins to select a full booking data
	/// tuple
	#[diesel::dsl::auto_type(no_type_alias)]
	fn joined_query() -> _ {
		booking::table
			.inner_join(room::table.on(booking::room_id.eq(room::id)))
			.inner_join(
				building::table.on(booking::building_id.eq(building::id)),
			)
	}

	/// Construct a full [`Booking`] struct from the data returned by a
	/// joined query
	fn from_joined(data: JoinedBookingData) -> Self {
		Self { booking: data.0, room: data.1, building: data.2 }
	}

	/// Get a [`Booking`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(b_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let query = Self::joined_query();

		let booking = conn
			.interact(move |conn| {
				query
					.filter(booking::id.eq(b_id))
					.select((
						PrimitiveBooking::as_select(),
						PrimitiveRoom::as_select(),
						PrimitiveBuilding::as_select(),
					))
					.get_result(conn)
			})
			.await??;

		Ok(Self::from_joined(booking))
	}

	/// Get the bookings made by a profile
	///
	/// Upcoming bookings only include confirmed ones and are sorted soonest
	/// first, past bookings are sorted most recent first
	#[instrument(skip(conn))]
	pub async fn for_profile(
		p_id: i32,
		scope: BookingScope,
		today: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let query = Self::joined_query();

		let bookings = conn
			.interact(move |conn| {
				let mut query = query
					.filter(booking::profile_id.eq(p_id))
					.select((
						PrimitiveBooking::as_select(),
						PrimitiveRoom::as_select(),
						PrimitiveBuilding::as_select(),
					))
					.into_boxed();

				query = match scope {
					BookingScope::All => {
						query.order((
							booking::booking_date.asc(),
							booking::start_time.asc(),
						))
					},
					BookingScope::Upcoming => {
						query
							.filter(booking::booking_date.ge(today))
							.filter(booking::status.eq(BookingStatus::Confirmed))
							.order((
								booking::booking_date.asc(),
								booking::start_time.asc(),
							))
					},
					BookingScope::Past => {
						query.filter(booking::booking_date.lt(today)).order((
							booking::booking_date.desc(),
							booking::start_time.desc(),
						))
					},
				};

				query.load(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(bookings)
	}

	/// Get the confirmed bookings of a room on a given date, ordered by start
	/// time
	#[instrument(skip(conn))]
	pub async fn for_room_on_date(
		r_id: i32,
		date: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<PrimitiveBooking>, Error> {
		let bookings = conn
			.interact(move |conn| confirmed_for_room(r_id, date, conn))
			.await??;

		Ok(bookings)
	}

	/// Get the time ranges a room is booked for on a given date
	#[instrument(skip(conn))]
	pub async fn booked_ranges(
		r_id: i32,
		date: NaiveDate,
		conn: &DbConn,
	) -> Result<Vec<TimeRange>, Error> {
		let bookings = Self::for_room_on_date(r_id, date, conn).await?;

		Ok(to_ranges(&bookings))
	}

	/// Check whether a room is free for the given range on the given date
	#[instrument(skip(conn))]
	pub async fn is_slot_free(
		r_id: i32,
		date: NaiveDate,
		range: TimeRange,
		conn: &DbConn,
	) -> Result<bool, Error> {
		let booked = Self::booked_ranges(r_id, date, conn).await?;

		Ok(is_free(&range, &booked))
	}

	/// Move the booking with the given id to a new status
	#[instrument(skip(conn))]
	pub async fn set_status(
		b_id: i32,
		next: BookingStatus,
		conn: &DbConn,
	) -> Result<Self, Error> {
		let current = PrimitiveBooking::get_by_id(b_id, conn).await?;

		if !current.status.can_transition_to(next) {
			return Err(BookingError::InvalidTransition {
				from: current.status.as_str().to_string(),
				to:   next.as_str().to_string(),
			}
			.into());
		}

		let from = current.status;

		let updated = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				diesel::update(booking.find(b_id))
					.filter(status.eq(from))
					.set(status.eq(next))
					.execute(conn)
			})
			.await??;

		// Someone else changed the status between reading and writing
		if updated == 0 {
			return Err(BookingError::InvalidTransition {
				from: from.as_str().to_string(),
				to:   next.as_str().to_string(),
			}
			.into());
		}

		info!("booking {b_id} moved from {:?} to {next:?}", current.status);

		Self::get_by_id(b_id, conn).await
	}

	/// Delete a booking given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(b_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::booking::dsl::*;

				diesel::delete(booking.find(b_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!("booking with id {b_id}")));
		}

		info!("deleted booking with id {b_id}");

		Ok(())
	}
}

fn confirmed_for_room(
	r_id: i32,
	date: NaiveDate,
	conn: &mut PgConnection,
) -> QueryResult<Vec<PrimitiveBooking>> {
	use self::booking::dsl::*;

	booking
		.filter(room_id.eq(r_id))
		.filter(booking_date.eq(date))
		.filter(status.eq(BookingStatus::Confirmed))
		.order(start_time.asc())
		.select(PrimitiveBooking::as_select())
		.load(conn)
}

fn to_ranges(bookings: &[PrimitiveBooking]) -> Vec<TimeRange> {
	bookings.iter().filter_map(PrimitiveBooking::time_range).collect()
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = booking)]
#[diesel(check_for_backend(Pg))]
pub struct NewBooking {
	pub profile_id:       i32,
	pub room_id:          i32,
	pub building_id:      i32,
	pub booking_date:     NaiveDate,
	pub start_time:       NaiveTime,
	pub end_time:         NaiveTime,
	pub duration_minutes: i32,
	pub notes:            Option<String>,
}

impl NewBooking {
	/// Create a new booking for a room, the building and duration are taken
	/// from the room and the range
	#[must_use]
	pub fn new(
		profile_id: i32,
		room: &PrimitiveRoom,
		booking_date: NaiveDate,
		range: TimeRange,
		notes: Option<String>,
	) -> Self {
		#[allow(clippy::cast_possible_wrap)]
		let duration_minutes = range.duration_minutes() as i32;

		Self {
			profile_id,
			room_id: room.id,
			building_id: room.building_id,
			booking_date,
			start_time: range.start_time(),
			end_time: range.end_time(),
			duration_minutes,
			notes,
		}
	}

	/// Insert this [`NewBooking`]
	///
	/// The overlap check is repeated inside a serializable transaction so two
	/// concurrent requests for the same slot can not both succeed
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Booking, Error> {
		let range = TimeRange::from_times(self.start_time, self.end_time)
			.ok_or(BookingError::InvalidTimeRange {
				start: self.start_time,
				end:   self.end_time,
			})?;

		let inserted = conn
			.interact(move |conn| {
				conn.build_transaction().serializable().run::<_, Error, _>(
					|conn| {
						let existing = confirmed_for_room(
							self.room_id,
							self.booking_date,
							conn,
						)?;

						if !is_free(&range, &to_ranges(&existing)) {
							return Err(BookingError::Conflict.into());
						}

						let inserted = diesel::insert_into(booking::table)
							.values(&self)
							.returning(PrimitiveBooking::as_returning())
							.get_result(conn)?;

						Ok(inserted)
					},
				)
			})
			.await??;

		info!(
			"created booking {} for room {} on {}",
			inserted.id, inserted.room_id, inserted.booking_date
		);

		Booking::get_by_id(inserted.id, conn).await
	}
}
