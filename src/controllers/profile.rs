//! Controllers for the profile of the logged in user

use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use booking::Booking;
use chrono::Local;
use common::{DbPool, Error};
use profile::Profile;

use crate::Session;
use crate::schemas::booking::{BookingResponse, BookingScopeQuery};
use crate::schemas::profile::ProfileResponse;

#[instrument(skip(pool))]
pub(crate) async fn get_current_profile(
	State(pool): State<DbPool>,
	session: Session,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;
	let profile = Profile::get(session.data.profile_id, &conn).await?;

	Ok((StatusCode::OK, Json(ProfileResponse::from(profile))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_current_profile_bookings(
	State(pool): State<DbPool>,
	session: Session,
	Query(query): Query<BookingScopeQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let today = Local::now().date_naive();

	let bookings = Booking::for_profile(
		session.data.profile_id,
		query.scope,
		today,
		&conn,
	)
	.await?;

	let response: Vec<BookingResponse> =
		bookings.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}
