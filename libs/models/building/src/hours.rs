//! Parsing of free-text building opening hours

use std::sync::LazyLock;

use primitive_booking::{MINUTES_PER_DAY, TimeRange, format_minute};
use regex::{Captures, Regex};

/// `<h>[:mm] [AM|PM] - <h>[:mm] [AM|PM]`, case insensitive
static HOURS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(
		r"(?i)(\d{1,2})(?::(\d{2}))?\s*(AM|PM)?\s*-\s*(\d{1,2})(?::(\d{2}))?\s*(AM|PM)?",
	)
	.unwrap()
});

const DEFAULT_OPEN_MINUTE: u32 = 8 * 60;
const DEFAULT_CLOSE_MINUTE: u32 = 22 * 60;

const DEFAULT_HOURS: TimeRange =
	match TimeRange::new(DEFAULT_OPEN_MINUTE, DEFAULT_CLOSE_MINUTE) {
		Some(range) => range,
		None => panic!("default opening hours must be a valid range"),
	};

const FULL_DAY: TimeRange = match TimeRange::new(0, MINUTES_PER_DAY) {
	Some(range) => range,
	None => panic!("a full day must be a valid range"),
};

/// The span of a day during which a building is open
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperatingHours(TimeRange);

impl Default for OperatingHours {
	/// 8 AM until 10 PM
	fn default() -> Self { Self(DEFAULT_HOURS) }
}

impl OperatingHours {
	/// Parse opening hours such as `"8 AM - 10 PM"` or `"24/7"`
	///
	/// Text that can not be understood falls back to the
	/// [default](Self::default) hours
	#[must_use]
	pub fn parse(text: &str) -> Self {
		if text.contains("24/7") {
			return Self::always();
		}

		let parsed = HOURS_REGEX.captures(text).and_then(|caps| {
			let open = clock_minute(&caps, 1, 2, 3)?;
			let close = match clock_minute(&caps, 4, 5, 6)? {
				0 => MINUTES_PER_DAY,
				m => m,
			};

			TimeRange::new(open, close)
		});

		match parsed {
			Some(range) => Self(range),
			None => {
				debug!("could not parse opening hours '{text}', using default");

				Self::default()
			},
		}
	}

	/// Open all day
	#[must_use]
	pub fn always() -> Self { Self(FULL_DAY) }

	#[must_use]
	pub fn range(&self) -> TimeRange { self.0 }

	#[must_use]
	pub fn opens_at(&self) -> String { format_minute(self.0.start()) }

	#[must_use]
	pub fn closes_at(&self) -> String { format_minute(self.0.end()) }
}

/// Read a single clock reading out of the given capture groups as minutes
/// since midnight
fn clock_minute(
	caps: &Captures,
	hour: usize,
	minute: usize,
	meridiem: usize,
) -> Option<u32> {
	let mut hour = caps.get(hour)?.as_str().parse::<u32>().ok()?;
	let minute = match caps.get(minute) {
		Some(m) => m.as_str().parse::<u32>().ok()?,
		None => 0,
	};

	if minute >= 60 {
		return None;
	}

	match caps.get(meridiem).map(|m| m.as_str().to_ascii_uppercase()) {
		Some(m) if m == "PM" => {
			if hour > 12 {
				return None;
			}

			if hour != 12 {
				hour += 12;
			}
		},
		Some(_) => {
			if hour > 12 {
				return None;
			}

			if hour == 12 {
				hour = 0;
			}
		},
		None => (),
	}

	let total = hour * 60 + minute;

	(total <= MINUTES_PER_DAY).then_some(total)
}
