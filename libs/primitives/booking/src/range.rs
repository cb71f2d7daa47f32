//! Half-open spans of time within a single day

use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// A half-open `[start, end)` span of minutes since midnight
///
/// An end of [`MINUTES_PER_DAY`] is midnight at the end of the day, which a
/// [`NaiveTime`] writes as `00:00:00`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub struct TimeRange {
	start: u32,
	end:   u32,
}

impl TimeRange {
	/// Create a new non-empty [`TimeRange`] inside a single day
	#[must_use]
	pub const fn new(start: u32, end: u32) -> Option<Self> {
		if start < end && end <= MINUTES_PER_DAY {
			Some(Self { start, end })
		} else {
			None
		}
	}

	/// Create a [`TimeRange`] from two times of day, an `end` of midnight
	/// closes the range at the end of the day
	#[must_use]
	pub fn from_times(start: NaiveTime, end: NaiveTime) -> Option<Self> {
		let end = match minute_of_day(end) {
			0 => MINUTES_PER_DAY,
			m => m,
		};

		Self::new(minute_of_day(start), end)
	}

	#[must_use]
	pub fn start(&self) -> u32 { self.start }

	#[must_use]
	pub fn end(&self) -> u32 { self.end }

	#[must_use]
	pub fn start_time(&self) -> NaiveTime { time_of_minute(self.start) }

	#[must_use]
	pub fn end_time(&self) -> NaiveTime { time_of_minute(self.end) }

	#[must_use]
	pub fn duration_minutes(&self) -> u32 { self.end - self.start }

	/// Two half-open ranges intersect iff each one starts before the other
	/// ends, so back-to-back ranges never overlap
	#[must_use]
	pub fn overlaps(&self, other: &Self) -> bool {
		self.start < other.end && other.start < self.end
	}

	/// Check if `other` lies completely inside this range
	#[must_use]
	pub fn contains(&self, other: &Self) -> bool {
		self.start <= other.start && other.end <= self.end
	}

}

/// Minutes elapsed since midnight, seconds are ignored
#[must_use]
pub fn minute_of_day(time: NaiveTime) -> u32 {
	time.hour() * 60 + time.minute()
}

/// Convert minutes since midnight back into a time of day, wrapping the end
/// of the day to midnight
#[must_use]
pub fn time_of_minute(minute: u32) -> NaiveTime {
	let minute = minute % MINUTES_PER_DAY;

	NaiveTime::from_hms_opt(minute / 60, minute % 60, 0).unwrap_or_default()
}

/// Format minutes since midnight as `HH:MM:SS`, the end of the day is written
/// as `24:00:00`
#[must_use]
pub fn format_minute(minute: u32) -> String {
	format!("{:02}:{:02}:00", minute / 60, minute % 60)
}

/// Signed length in minutes from `start` to `end`
#[must_use]
pub fn calculate_duration(start: NaiveTime, end: NaiveTime) -> i64 {
	i64::from(minute_of_day(end)) - i64::from(minute_of_day(start))
}

#[cfg(test)]
mod tests {
	use super::*;

	fn time(s: &str) -> NaiveTime { s.parse().unwrap() }

	fn range(start: &str, end: &str) -> TimeRange {
		TimeRange::from_times(time(start), time(end)).unwrap()
	}

	#[test]
	fn disjoint_ranges_do_not_overlap() {
		let existing = range("09:00:00", "10:00:00");

		assert!(!existing.overlaps(&range("11:00:00", "12:00:00")));
		assert!(!existing.overlaps(&range("07:00:00", "08:30:00")));
	}

	#[test]
	fn intersecting_ranges_overlap() {
		let existing = range("09:00:00", "10:00:00");

		assert!(existing.overlaps(&range("09:30:00", "10:30:00")));
		assert!(existing.overlaps(&range("08:30:00", "09:30:00")));
		assert!(existing.overlaps(&range("08:00:00", "11:00:00")));
		assert!(existing.overlaps(&range("09:15:00", "09:45:00")));
		assert!(range("09:30:00", "10:30:00").overlaps(&existing));
	}

	#[test]
	fn back_to_back_ranges_do_not_overlap() {
		let existing = range("09:00:00", "10:00:00");

		assert!(!existing.overlaps(&range("10:00:00", "11:00:00")));
		assert!(!existing.overlaps(&range("08:00:00", "09:00:00")));
	}

	#[test]
	fn midnight_end_closes_the_day() {
		let late = range("23:30:00", "00:00:00");

		assert_eq!(late.end(), MINUTES_PER_DAY);
		assert_eq!(late.duration_minutes(), 30);
		assert_eq!(late.end_time(), NaiveTime::default());
		assert_eq!(format_minute(late.end()), "24:00:00");
	}

	#[test]
	fn empty_or_inverted_ranges_are_rejected() {
		let at = |s, e| TimeRange::from_times(time(s), time(e));

		assert!(at("10:00:00", "10:00:00").is_none());
		assert!(at("11:00:00", "10:00:00").is_none());
		assert!(TimeRange::new(0, MINUTES_PER_DAY + 1).is_none());
	}

	#[test]
	fn containment_is_inclusive_of_bounds() {
		let open = range("08:00:00", "22:00:00");

		assert!(open.contains(&range("08:00:00", "09:00:00")));
		assert!(open.contains(&range("21:00:00", "22:00:00")));
		assert!(!open.contains(&range("21:30:00", "22:30:00")));
	}

	#[test]
	fn duration_is_signed() {
		assert_eq!(calculate_duration(time("09:00:00"), time("10:30:00")), 90);
		assert_eq!(calculate_duration(time("10:30:00"), time("09:00:00")), -90);
	}
}
