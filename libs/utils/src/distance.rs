//! Great-circle distances between campus coordinates

use serde::{Deserialize, Serialize};

/// Mean radius of the earth in miles
const EARTH_RADIUS_MILES: f64 = 3958.8;

const FEET_PER_MILE: f64 = 5280.0;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Serialize)]
pub struct Coordinates {
	pub latitude:  f64,
	pub longitude: f64,
}

impl Coordinates {
	#[must_use]
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self { latitude, longitude }
	}

	/// Haversine distance to another point in miles
	#[must_use]
	pub fn distance_to(&self, other: &Self) -> f64 {
		let lat1 = self.latitude.to_radians();
		let lat2 = other.latitude.to_radians();
		let delta_lat = (other.latitude - self.latitude).to_radians();
		let delta_lon = (other.longitude - self.longitude).to_radians();

		let a = (delta_lat / 2.0).sin().powi(2)
			+ lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);

		let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

		EARTH_RADIUS_MILES * c
	}
}

/// Anything that may know how far away it is from the user
pub trait HasDistance {
	fn distance(&self) -> Option<f64>;
}

/// Human readable distance, feet below a tenth of a mile
#[must_use]
pub fn format_distance(miles: f64) -> String {
	if miles < 0.1 {
		#[allow(clippy::cast_possible_truncation)]
		let feet = (miles * FEET_PER_MILE).round() as i64;

		format!("{feet} ft")
	} else {
		format!("{miles:.1} mi")
	}
}

/// Sort items by ascending distance, items without a distance go last
pub fn sort_by_distance<T: HasDistance>(items: &mut [T]) {
	items.sort_by(|a, b| {
		match (a.distance(), b.distance()) {
			(Some(a), Some(b)) => a.total_cmp(&b),
			(Some(_), None) => std::cmp::Ordering::Less,
			(None, Some(_)) => std::cmp::Ordering::Greater,
			(None, None) => std::cmp::Ordering::Equal,
		}
	});
}

/// Keep only the items with a known distance of at most `max` miles
#[must_use]
pub fn filter_by_distance<T: HasDistance>(items: Vec<T>, max: f64) -> Vec<T> {
	items
		.into_iter()
		.filter(|i| i.distance().is_some_and(|d| d <= max))
		.collect()
}
