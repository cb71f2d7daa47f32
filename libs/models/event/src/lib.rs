#[macro_use]
extern crate tracing;

use chrono::NaiveDate;
use common::{DbConn, Error};
use db::{event, profile};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Date};
use models_common::{BoxedCondition, QUERY_HARD_LIMIT, ToFilter};
use primitive_event::PrimitiveEvent;
use serde::{Deserialize, Serialize};

pub type JoinedEventData = (PrimitiveEvent, Option<String>);

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct EventFilter {
	pub category: Option<String>,
	pub from:     Option<NaiveDate>,
	pub until:    Option<NaiveDate>,
}

impl<S> ToFilter<S> for EventFilter
where
	S: 'static,
	event::category: SelectableExpression<S>,
	event::event_date: SelectableExpression<S>,
{
	type SqlType = Bool;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType> {
		let mut filter: BoxedCondition<S, Self::SqlType> =
			Box::new(true.into_sql::<Bool>());

		if let Some(category) = self.category.clone() {
			filter = Box::new(filter.and(event::category.eq(category)));
		}

		if let Some(from) = self.from {
			filter = Box::new(
				filter.and(from.into_sql::<Date>().le(event::event_date)),
			);
		}

		if let Some(until) = self.until {
			filter = Box::new(
				filter.and(until.into_sql::<Date>().ge(event::event_date)),
			);
		}

		filter
	}
}

/// An event along with the username of whoever posted it
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Event {
	pub event:      PrimitiveEvent,
	pub created_by: Option<String>,
}

impl Event {
	/// Construct a full [`Event`] struct from the data returned by a joined
	/// query
	fn from_joined(data: JoinedEventData) -> Self {
		Self { event: data.0, created_by: data.1 }
	}

	/// Get an [`Event`] given its id
	#[instrument(skip(conn))]
	pub async fn get_by_id(e_id: i32, conn: &DbConn) -> Result<Self, Error> {
		let event = conn
			.interact(move |conn| {
				event::table
					.left_join(profile::table)
					.filter(event::id.eq(e_id))
					.select((
						PrimitiveEvent::as_select(),
						profile::username.nullable(),
					))
					.get_result(conn)
			})
			.await??;

		Ok(Self::from_joined(event))
	}

	/// Get all [`Event`]s matching the filter ordered by date and time
	///
	/// At most [`QUERY_HARD_LIMIT`] events are returned
	#[instrument(skip(conn))]
	pub async fn get_all(
		e_filter: EventFilter,
		conn: &DbConn,
	) -> Result<Vec<Self>, Error> {
		let events = conn
			.interact(move |conn| {
				event::table
					.left_join(profile::table)
					.filter(e_filter.to_filter())
					.order((event::event_date.asc(), event::event_time.asc()))
					.limit(QUERY_HARD_LIMIT)
					.select((
						PrimitiveEvent::as_select(),
						profile::username.nullable(),
					))
					.load(conn)
			})
			.await??
			.into_iter()
			.map(Self::from_joined)
			.collect();

		Ok(events)
	}

	/// Delete an event given its id
	#[instrument(skip(conn))]
	pub async fn delete_by_id(e_id: i32, conn: &DbConn) -> Result<(), Error> {
		let deleted = conn
			.interact(move |conn| {
				use self::event::dsl::*;

				diesel::delete(event.find(e_id)).execute(conn)
			})
			.await??;

		if deleted == 0 {
			return Err(Error::NotFound(format!("event with id {e_id}")));
		}

		info!("deleted event with id {e_id}");

		Ok(())
	}
}

#[derive(Clone, Debug, Deserialize, Insertable, Serialize)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(Pg))]
pub struct NewEvent {
	pub title:                    String,
	pub description:              String,
	pub location_name:            String,
	pub room:                     Option<String>,
	pub latitude:                 f64,
	pub longitude:                f64,
	pub event_date:               NaiveDate,
	pub event_time:               String,
	pub category:                 String,
	pub organization_name:        Option<String>,
	pub organization_description: Option<String>,
	pub organization_logo:        Option<String>,
	pub instagram_link:           Option<String>,
	pub website_link:             Option<String>,
	pub doorlist_link:            Option<String>,
	pub image_url:                Option<String>,
	pub created_by:               Option<i32>,
}

impl NewEvent {
	/// Insert this [`NewEvent`]
	#[instrument(skip(conn))]
	pub async fn insert(self, conn: &DbConn) -> Result<Event, Error> {
		let event = conn
			.interact(|conn| {
				use self::event::dsl::*;

				diesel::insert_into(event)
					.values(self)
					.returning(PrimitiveEvent::as_returning())
					.get_result(conn)
			})
			.await??;

		info!("created event {} with id {}", event.title, event.id);

		Event::get_by_id(event.id, conn).await
	}

	/// Insert a list of [`NewEvent`]s in one go
	#[instrument(skip(conn))]
	pub async fn bulk_insert(
		events: Vec<Self>,
		conn: &DbConn,
	) -> Result<usize, Error> {
		let count = conn
			.interact(|conn| {
				use self::event::dsl::*;

				diesel::insert_into(event).values(events).execute(conn)
			})
			.await??;

		info!("created {count} events");

		Ok(count)
	}
}
