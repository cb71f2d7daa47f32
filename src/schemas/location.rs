//! Query parameters for sorting results by distance from the user

use serde::{Deserialize, Serialize};
use serde_with::DisplayFromStr;
use utils::{Coordinates, HasDistance, filter_by_distance, sort_by_distance};

#[serde_as]
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NearbyQuery {
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(default)]
	pub lat:          Option<f64>,
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(default)]
	pub lng:          Option<f64>,
	/// Maximum distance in miles
	#[serde_as(as = "Option<DisplayFromStr>")]
	#[serde(default)]
	pub max_distance: Option<f64>,
}

impl NearbyQuery {
	/// The position of the user, only known when both coordinates were given
	#[must_use]
	pub fn origin(&self) -> Option<Coordinates> {
		Some(Coordinates::new(self.lat?, self.lng?))
	}

	/// Sort items by distance and drop the ones that are too far away
	///
	/// Does nothing when no position was given
	#[must_use]
	pub fn apply<T: HasDistance>(&self, mut items: Vec<T>) -> Vec<T> {
		if self.origin().is_none() {
			return items;
		}

		sort_by_distance(&mut items);

		match self.max_distance {
			Some(max) => filter_by_distance(items, max),
			None => items,
		}
	}
}
