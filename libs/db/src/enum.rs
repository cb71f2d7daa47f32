use diesel_derive_enum::DbEnum;
use serde::{Deserialize, Serialize};

#[derive(
	Clone, Copy, DbEnum, Debug, Default, Deserialize, PartialEq, Eq, Serialize,
)]
#[ExistingTypePath = "crate::sql_types::BookingStatus"]
#[serde(rename_all = "kebab-case")]
pub enum BookingStatus {
	#[default]
	Confirmed,
	Cancelled,
	Completed,
	NoShow,
}

impl BookingStatus {
	#[must_use]
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Confirmed => "confirmed",
			Self::Cancelled => "cancelled",
			Self::Completed => "completed",
			Self::NoShow => "no-show",
		}
	}

	/// Check if a booking in this status may move to the given status
	///
	/// Only confirmed bookings change status, and they never return to
	/// confirmed
	#[must_use]
	pub fn can_transition_to(self, next: Self) -> bool {
		self == Self::Confirmed && next != Self::Confirmed
	}
}
