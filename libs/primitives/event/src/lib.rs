use chrono::{NaiveDate, NaiveDateTime};
use db::event;
use diesel::pg::Pg;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Debug, Deserialize, Identifiable, Queryable, Selectable, Serialize,
)]
#[diesel(table_name = event)]
#[diesel(check_for_backend(Pg))]
pub struct PrimitiveEvent {
	pub id:                       i32,
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
	pub created_at:               NaiveDateTime,
	pub updated_at:               NaiveDateTime,
}
