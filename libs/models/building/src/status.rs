use serde::{Deserialize, Serialize};

/// Summary of how many rooms of a building can currently be used
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum AvailabilityStatus {
	Available,
	Limited,
	Full,
}

impl AvailabilityStatus {
	/// Derive the status of a building from its room counts
	///
	/// A building without rooms is always available, fewer than half of the
	/// rooms being available makes it limited
	#[must_use]
	pub fn from_counts(available: usize, total: usize) -> Self {
		if total == 0 {
			Self::Available
		} else if available == 0 {
			Self::Full
		} else if available * 2 < total {
			Self::Limited
		} else {
			Self::Available
		}
	}

	/// Derive the status of a building from the availability of each room
	#[must_use]
	pub fn from_rooms<I>(rooms: I) -> Self
	where
		I: IntoIterator<Item = bool>,
	{
		let (available, total) = rooms
			.into_iter()
			.fold((0, 0), |(a, t), is_available| {
				(a + usize::from(is_available), t + 1)
			});

		Self::from_counts(available, total)
	}
}
