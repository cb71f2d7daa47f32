//! Controllers for campus events

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, NoContent};
use common::{DbPool, Error};
use event::{Event, EventFilter};
use models_common::manual_pagination;
use validator::Validate;

use crate::Session;
use crate::schemas::event::{CreateEventRequest, EventResponse};
use crate::schemas::location::NearbyQuery;
use crate::schemas::pagination::PaginationOptions;

#[instrument(skip(pool))]
pub(crate) async fn get_events(
	State(pool): State<DbPool>,
	Query(filter): Query<EventFilter>,
	Query(nearby): Query<NearbyQuery>,
	Query(p_opts): Query<PaginationOptions>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let events = Event::get_all(filter, &conn).await?;

	let origin = nearby.origin();
	let events: Vec<EventResponse> = events
		.into_iter()
		.map(|e| EventResponse::new(e, origin))
		.collect();

	let events = nearby.apply(events);

	let (total, truncated, events) =
		manual_pagination(events, p_opts.into())?;

	Ok((StatusCode::OK, Json(p_opts.paginate(total, truncated, events))))
}

#[instrument(skip(pool))]
pub(crate) async fn get_event(
	State(pool): State<DbPool>,
	Path(e_id): Path<i32>,
	Query(nearby): Query<NearbyQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let event = Event::get_by_id(e_id, &conn).await?;

	Ok((StatusCode::OK, Json(EventResponse::new(event, nearby.origin()))))
}

#[instrument(skip(pool))]
pub(crate) async fn create_event(
	State(pool): State<DbPool>,
	session: Session,
	Json(request): Json<CreateEventRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let event = request
		.into_new_event(session.data.profile_id)
		.insert(&conn)
		.await?;

	Ok((StatusCode::CREATED, Json(EventResponse::new(event, None))))
}

/// Delete an event, only its creator or an admin may do so
#[instrument(skip(pool))]
pub(crate) async fn delete_event(
	State(pool): State<DbPool>,
	session: Session,
	Path(e_id): Path<i32>,
) -> Result<NoContent, Error> {
	let conn = pool.get().await?;

	let event = Event::get_by_id(e_id, &conn).await?;

	let is_creator = event.event.created_by == Some(session.data.profile_id);

	if !is_creator && !session.data.profile_is_admin {
		return Err(Error::Forbidden);
	}

	Event::delete_by_id(e_id, &conn).await?;

	Ok(NoContent)
}
