use std::time::Duration;

use axum::Router;
use axum::routing::{delete, get, patch, post};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::controllers::auth::{login_profile, logout_profile, register_profile};
use crate::controllers::booking::{
	cancel_booking,
	create_booking,
	delete_booking,
	get_booking,
	update_booking_status,
};
use crate::controllers::building::{
	create_building,
	create_room,
	get_building,
	get_building_rooms,
	get_buildings,
};
use crate::controllers::event::{
	create_event,
	delete_event,
	get_event,
	get_events,
};
use crate::controllers::healthcheck;
use crate::controllers::profile::{
	get_current_profile,
	get_current_profile_bookings,
};
use crate::controllers::room::{
	get_room_availability,
	get_room_bookings,
	get_room_slots,
	update_room,
};
use crate::middleware::AuthLayer;

/// Get the app router
pub fn get_app_router(state: AppState) -> Router {
	let cors = if state.config.production {
		CorsLayer::new()
	} else {
		CorsLayer::permissive()
	};

	let api_routes = Router::new()
		.route("/healthcheck", get(healthcheck))
		.nest("/auth", auth_routes(&state))
		.nest("/profile", profile_routes(&state))
		.nest("/buildings", building_routes(&state))
		.nest("/rooms", room_routes(&state))
		.nest("/bookings", booking_routes(&state))
		.nest("/events", event_routes(&state));

	Router::new()
		.merge(api_routes)
		.layer(
			ServiceBuilder::new()
				.layer(TraceLayer::new_for_http())
				.layer(TimeoutLayer::new(Duration::from_secs(10)))
				.layer(CompressionLayer::new())
				.layer(cors),
		)
		.with_state(state)
}

/// Authentication routes
fn auth_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/register", post(register_profile))
		.route("/login", post(login_profile))
		.route(
			"/logout",
			post(logout_profile).route_layer(AuthLayer::new(state.clone())),
		)
}

/// Routes for the logged in profile
fn profile_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/me", get(get_current_profile))
		.route("/me/bookings", get(get_current_profile_bookings))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Building routes, creating buildings and rooms requires an admin
fn building_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/", post(create_building))
		.route("/{id}/rooms", post(create_room))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_buildings))
		.route("/{id}", get(get_building))
		.route("/{id}/rooms", get(get_building_rooms))
		.merge(protected)
}

/// Room availability routes, updating rooms requires an admin
fn room_routes(state: &AppState) -> Router<AppState> {
	let protected = Router::new()
		.route("/{id}", patch(update_room))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/{id}/availability", get(get_room_availability))
		.route("/{id}/slots", get(get_room_slots))
		.route("/{id}/bookings", get(get_room_bookings))
		.merge(protected)
}

/// Booking routes, all of which require a logged in profile
fn booking_routes(state: &AppState) -> Router<AppState> {
	Router::new()
		.route("/", post(create_booking))
		.route("/{id}", get(get_booking).delete(delete_booking))
		.route("/{id}/cancel", post(cancel_booking))
		.route("/{id}/status", patch(update_booking_status))
		.route_layer(AuthLayer::new(state.clone()))
}

/// Event routes with auth protection for write operations
fn event_routes(state: &AppState) -> Router<AppState> {
	let authenticated = Router::new()
		.route("/", post(create_event))
		.route("/{id}", delete(delete_event))
		.route_layer(AuthLayer::new(state.clone()));

	Router::new()
		.route("/", get(get_events))
		.route("/{id}", get(get_event))
		.merge(authenticated)
}
