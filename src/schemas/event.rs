use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use event::{Event, NewEvent};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utils::{Coordinates, HasDistance, format_distance};
use validator_derive::Validate;

static CATEGORY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(Social|Academic|Sports|Entertainment|Arts|Other)$").unwrap()
});

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationResponse {
	pub name:        Option<String>,
	pub description: Option<String>,
	pub logo:        Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventLinksResponse {
	pub instagram: Option<String>,
	pub website:   Option<String>,
	pub doorlist:  Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
	pub id:             i32,
	pub title:          String,
	pub description:    String,
	pub location_name:  String,
	pub room:           Option<String>,
	pub latitude:       f64,
	pub longitude:      f64,
	pub event_date:     NaiveDate,
	pub event_time:     String,
	pub category:       String,
	pub organization:   OrganizationResponse,
	pub links:          EventLinksResponse,
	pub image_url:      Option<String>,
	pub created_by:     Option<String>,
	pub distance:       Option<f64>,
	pub distance_label: Option<String>,
	pub created_at:     NaiveDateTime,
	pub updated_at:     NaiveDateTime,
}

impl EventResponse {
	/// Build a response for an event, including how far away it is when the
	/// position of the user is known
	#[must_use]
	pub fn new(value: Event, origin: Option<Coordinates>) -> Self {
		let e = value.event;

		let distance = origin.map(|o| {
			o.distance_to(&Coordinates::new(e.latitude, e.longitude))
		});

		Self {
			id: e.id,
			title: e.title,
			description: e.description,
			location_name: e.location_name,
			room: e.room,
			latitude: e.latitude,
			longitude: e.longitude,
			event_date: e.event_date,
			event_time: e.event_time,
			category: e.category,
			organization: OrganizationResponse {
				name:        e.organization_name,
				description: e.organization_description,
				logo:        e.organization_logo,
			},
			links: EventLinksResponse {
				instagram: e.instagram_link,
				website:   e.website_link,
				doorlist:  e.doorlist_link,
			},
			image_url: e.image_url,
			created_by: value.created_by,
			distance,
			distance_label: distance.map(format_distance),
			created_at: e.created_at,
			updated_at: e.updated_at,
		}
	}
}

impl HasDistance for EventResponse {
	fn distance(&self) -> Option<f64> { self.distance }
}

#[derive(Clone, Debug, Deserialize, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
	#[validate(length(
		min = 1,
		max = 100,
		message = "title must be between 1 and 100 characters long",
		code = "title-length"
	))]
	pub title:                    String,
	#[validate(length(
		min = 1,
		max = 500,
		message = "description must be between 1 and 500 characters long",
		code = "description-length"
	))]
	pub description:              String,
	#[validate(length(
		min = 1,
		message = "location name is required",
		code = "location-name-length"
	))]
	pub location_name:            String,
	pub room:                     Option<String>,
	#[validate(range(
		min = -90.0,
		max = 90.0,
		message = "latitude must be between -90 and 90",
		code = "latitude-range"
	))]
	pub latitude:                 f64,
	#[validate(range(
		min = -180.0,
		max = 180.0,
		message = "longitude must be between -180 and 180",
		code = "longitude-range"
	))]
	pub longitude:                f64,
	pub event_date:               NaiveDate,
	#[validate(length(
		min = 1,
		max = 32,
		message = "time must be between 1 and 32 characters long",
		code = "time-length"
	))]
	pub event_time:               String,
	#[validate(regex(
		path = *CATEGORY_REGEX,
		message = "category must be one of Social, Academic, Sports, Entertainment, Arts or Other",
		code = "category"
	))]
	pub category:                 String,
	pub organization_name:        Option<String>,
	pub organization_description: Option<String>,
	#[validate(url(message = "invalid instagram link", code = "url"))]
	pub instagram_link:           Option<String>,
	#[validate(url(message = "invalid website link", code = "url"))]
	pub website_link:             Option<String>,
	#[validate(url(message = "invalid doorlist link", code = "url"))]
	pub doorlist_link:            Option<String>,
	#[validate(url(message = "invalid image url", code = "url"))]
	pub image_url:                Option<String>,
}

impl CreateEventRequest {
	/// Turn this request into an insertable event posted by the given
	/// profile, empty optional fields are dropped
	#[must_use]
	pub fn into_new_event(self, created_by: i32) -> NewEvent {
		let non_empty = |v: Option<String>| v.filter(|s| !s.trim().is_empty());

		NewEvent {
			title:                    self.title,
			description:              self.description,
			location_name:            self.location_name,
			room:                     non_empty(self.room),
			latitude:                 self.latitude,
			longitude:                self.longitude,
			event_date:               self.event_date,
			event_time:               self.event_time,
			category:                 self.category,
			organization_name:        non_empty(self.organization_name),
			organization_description: non_empty(
				self.organization_description,
			),
			organization_logo:        None,
			instagram_link:           non_empty(self.instagram_link),
			website_link:             non_empty(self.website_link),
			doorlist_link:            non_empty(self.doorlist_link),
			image_url:                non_empty(self.image_url),
			created_by:               Some(created_by),
		}
	}
}
