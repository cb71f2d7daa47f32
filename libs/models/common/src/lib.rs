use common::{Error, PaginationError};
use diesel::BoxableExpression;
use diesel::pg::Pg;
use diesel::sql_types::{Bool, Nullable};

pub const QUERY_HARD_LIMIT: i64 = 500;

/// Length of a bookable time slot
pub const SLOT_LENGTH_MINUTES: u32 = 30;

/// Default upper bound on the length of a single booking
pub const MAX_BOOKING_LENGTH_MINUTES: i64 = 120;

pub type BoxedCondition<S, T = Nullable<Bool>> =
	Box<dyn BoxableExpression<S, Pg, SqlType = T>>;

pub type PaginatedData<T> = (usize, bool, T);

pub trait ToFilter<S> {
	type SqlType;

	fn to_filter(&self) -> BoxedCondition<S, Self::SqlType>;
}

#[derive(Clone, Copy, Debug)]
pub struct PaginationConfig {
	pub limit:  usize,
	pub offset: usize,
}

/// Paginate an already loaded list of items
///
/// Returns the total item count, whether the list was truncated by
/// [`QUERY_HARD_LIMIT`] and the requested page
#[inline]
pub fn manual_pagination<T: Clone>(
	items: Vec<T>,
	cfg: PaginationConfig,
) -> Result<PaginatedData<Vec<T>>, Error> {
	let total = items.len();

	if total == 0 {
		let data = (total, false, items);

		return Ok(data);
	}

	if cfg.offset >= total {
		return Err(PaginationError::OffsetTooLarge.into());
	}

	#[allow(clippy::cast_possible_truncation)]
	let truncated = total == (QUERY_HARD_LIMIT as usize);

	let limit = cfg.limit.min(items[cfg.offset..].len());

	let items = items[cfg.offset..cfg.offset + limit].to_vec();

	let data = (total, truncated, items);

	Ok(data)
}
