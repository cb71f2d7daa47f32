//! Controllers for buildings and their rooms

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use building::{Building, BuildingFilter, NewBuilding};
use chrono::Local;
use common::{DbPool, Error};
use primitive_building::PrimitiveBuilding;
use room::Room;
use validator::Validate;

use crate::AdminSession;
use crate::schemas::building::{BuildingResponse, CreateBuildingRequest};
use crate::schemas::location::NearbyQuery;
use crate::schemas::room::{CreateRoomRequest, RoomResponse};

#[instrument(skip(pool))]
pub(crate) async fn get_buildings(
	State(pool): State<DbPool>,
	Query(filter): Query<BuildingFilter>,
	Query(nearby): Query<NearbyQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let now = Local::now().naive_local();
	let buildings = Building::get_all(filter, now, &conn).await?;

	let origin = nearby.origin();
	let response: Vec<BuildingResponse> = buildings
		.into_iter()
		.map(|b| BuildingResponse::new(b, origin))
		.collect();

	let response = nearby.apply(response);

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_building(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
	Query(nearby): Query<NearbyQuery>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	let now = Local::now().naive_local();
	let building = Building::get_by_id(b_id, now, &conn).await?;

	let response = BuildingResponse::new(building, nearby.origin());

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn get_building_rooms(
	State(pool): State<DbPool>,
	Path(b_id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
	let conn = pool.get().await?;

	// Unknown buildings are a 404, not an empty list
	PrimitiveBuilding::get_by_id(b_id, &conn).await?;

	let rooms = Room::for_building(b_id, &conn).await?;
	let response: Vec<RoomResponse> =
		rooms.into_iter().map(Into::into).collect();

	Ok((StatusCode::OK, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_building(
	State(pool): State<DbPool>,
	session: AdminSession,
	Json(request): Json<CreateBuildingRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	let building = NewBuilding::from(request).insert(&conn).await?;

	info!(
		"profile {} created building {}",
		session.data.profile_id, building.id
	);

	let now = Local::now().naive_local();
	let building = Building::get_by_id(building.id, now, &conn).await?;

	let response = BuildingResponse::new(building, None);

	Ok((StatusCode::CREATED, Json(response)))
}

#[instrument(skip(pool))]
pub(crate) async fn create_room(
	State(pool): State<DbPool>,
	session: AdminSession,
	Path(b_id): Path<i32>,
	Json(request): Json<CreateRoomRequest>,
) -> Result<impl IntoResponse, Error> {
	request.validate()?;

	let conn = pool.get().await?;

	PrimitiveBuilding::get_by_id(b_id, &conn).await?;

	let room = request.into_new_room(b_id).insert(&conn).await?;

	info!(
		"profile {} created room {} in building {b_id}",
		session.data.profile_id, room.id
	);

	Ok((StatusCode::CREATED, Json(RoomResponse::from(room))))
}
