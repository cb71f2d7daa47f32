//! Fixed length bookable windows within a building's opening hours

use chrono::NaiveTime;
use models_common::SLOT_LENGTH_MINUTES;
use primitive_booking::TimeRange;
use serde::{Deserialize, Serialize};

use crate::is_free;

#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
	pub start_time:   NaiveTime,
	pub end_time:     NaiveTime,
	pub is_available: bool,
}

/// Split the opening hours of a day into consecutive slots, a slot is taken
/// when it overlaps any of the booked ranges
///
/// A trailing window shorter than a full slot is not offered
#[must_use]
pub fn generate_time_slots(
	open: TimeRange,
	booked: &[TimeRange],
) -> Vec<TimeSlot> {
	let mut slots = vec![];
	let mut start = open.start();

	while start + SLOT_LENGTH_MINUTES <= open.end() {
		let Some(range) = TimeRange::new(start, start + SLOT_LENGTH_MINUTES)
		else {
			break;
		};

		slots.push(TimeSlot {
			start_time:   range.start_time(),
			end_time:     range.end_time(),
			is_available: is_free(&range, booked),
		});

		start += SLOT_LENGTH_MINUTES;
	}

	slots
}
