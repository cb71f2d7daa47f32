use models_common::PaginationConfig;
use serde::{Deserialize, Deserializer, Serialize};

use crate::schemas::BoundedU32Visitor;

const fn page_default() -> u32 { 1 }

const fn per_page_default() -> u32 { 12 }

/// Pagination request parameters.
#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
	#[serde(default = "page_default", deserialize_with = "ds_page_bounds")]
	pub page:     u32,
	#[serde(
		default = "per_page_default",
		deserialize_with = "ds_per_page_bounds"
	)]
	pub per_page: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResponse<T> {
	pub page:      u32,
	pub per_page:  u32,
	pub total:     usize,
	pub truncated: bool,
	pub data:      T,
}

impl Default for PaginationOptions {
	fn default() -> Self { Self { page: 1, per_page: 12 } }
}

impl From<PaginationOptions> for PaginationConfig {
	fn from(value: PaginationOptions) -> Self {
		Self { limit: value.limit(), offset: value.offset() }
	}
}

impl PaginationOptions {
	/// Create a new [`PaginationResponse`] based on the current parameters
	/// with the given data
	pub fn paginate<T>(
		&self,
		total: usize,
		truncated: bool,
		data: T,
	) -> PaginationResponse<T> {
		PaginationResponse {
			page: self.page,
			per_page: self.per_page,
			total,
			truncated,
			data,
		}
	}

	#[inline]
	#[must_use]
	pub fn limit(&self) -> usize { self.per_page as usize }

	#[inline]
	#[must_use]
	pub fn offset(&self) -> usize {
		((self.page - 1) as usize) * (self.per_page as usize)
	}
}

/// Deserialization visitor for `page` bounds.
fn ds_page_bounds<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: u32::MAX })
}

/// Deserialization visitor for `per_page` bounds.
fn ds_per_page_bounds<'de, D: Deserializer<'de>>(
	d: D,
) -> Result<u32, D::Error> {
	d.deserialize_u32(BoundedU32Visitor { start: 1, end: 50 })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn offset_follows_page() {
		let opts = PaginationOptions { page: 3, per_page: 10 };

		assert_eq!(opts.limit(), 10);
		assert_eq!(opts.offset(), 20);
	}
}
